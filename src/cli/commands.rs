use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bidash")]
#[command(version, about = "Inventory and governance tracking for BI reports")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new bidash project in the current directory
    Init,

    /// Manage areas
    Area(AreaCommand),

    /// Manage BIs
    Bi(BiCommand),

    /// Manage the pages of a BI
    Page(PageCommand),

    /// Summary statistics and chart breakdowns
    Stats {
        /// Filter query, e.g. "status:outdated crit:alta area:BW vendas"
        #[arg(value_name = "QUERY")]
        query: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saves (named snapshots)
    Save(SaveCommand),

    /// Compare two saves, or a save and the current session
    Compare {
        /// Base save id or name ("current" for the live session)
        base: String,

        /// Comparison save id or name ("current" for the live session)
        comparison: String,

        /// Only show BIs with changes
        #[arg(long)]
        changed: bool,

        /// Write the comparison document to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export BIs and areas as a JSON document
    Export {
        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace BIs and areas with the contents of an export document
    Import {
        /// Document to import
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Write BIs, areas and metadata as CSV sheets
    ExportSheets {
        /// Target directory
        dir: PathBuf,
    },

    /// Report governance warnings
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all BIs, areas and saves
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct AreaCommand {
    #[command(subcommand)]
    pub action: AreaAction,
}

#[derive(Subcommand, Debug)]
pub enum AreaAction {
    /// Add an area
    Add {
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List areas
    List {
        /// Only areas whose name or description contains this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename an area or change its description
    Update {
        id: u64,

        /// New name; BIs referencing the old name follow the rename
        #[arg(long)]
        name: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an area that no BI references
    Delete {
        id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct BiCommand {
    #[command(subcommand)]
    pub action: BiAction,
}

/// Editable BI fields shared by `add` and `update`.
#[derive(Args, Debug, Default)]
pub struct BiFields {
    #[arg(long)]
    pub owner: Option<String>,

    /// Area name (can be specified multiple times)
    #[arg(long = "area", short = 'a')]
    pub areas: Vec<String>,

    /// Status label, e.g. "Atualizado" or "Desatualizado desde 06/08/24"
    #[arg(long)]
    pub status: Option<String>,

    /// Criticality (alta, media, baixa, none)
    #[arg(long, short = 'c')]
    pub criticality: Option<String>,

    /// Last update (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub last_update: Option<String>,

    #[arg(long)]
    pub observations: Option<String>,

    #[arg(long)]
    pub usage: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Report URL (http or https)
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BiAction {
    /// Add a BI
    Add {
        name: String,

        #[command(flatten)]
        fields: BiFields,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List BIs, optionally filtered
    List {
        /// Filter query, e.g. "status:outdated crit:none area:BW vendas"
        #[arg(value_name = "QUERY")]
        query: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one BI with its pages
    Get {
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a BI
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: BiFields,

        /// Remove every area from the BI
        #[arg(long, conflicts_with = "areas")]
        clear_areas: bool,

        /// Remove the report link
        #[arg(long, conflicts_with = "link")]
        clear_link: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a BI and its pages
    Delete {
        id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct PageCommand {
    #[command(subcommand)]
    pub action: PageAction,
}

/// Editable page fields shared by `add` and `update`.
#[derive(Args, Debug, Default)]
pub struct PageFields {
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long, short = 'c')]
    pub criticality: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long)]
    pub last_update: Option<String>,

    #[arg(long)]
    pub usage: Option<String>,

    #[arg(long)]
    pub observations: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PageAction {
    /// Add a page to a BI
    Add {
        bi_id: u64,

        name: String,

        #[command(flatten)]
        fields: PageFields,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a page
    Update {
        bi_id: u64,

        page_id: u64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: PageFields,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a page
    Delete {
        bi_id: u64,

        page_id: u64,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct SaveCommand {
    #[command(subcommand)]
    pub action: SaveAction,
}

#[derive(Subcommand, Debug)]
pub enum SaveAction {
    /// Snapshot the current BIs and areas
    Create {
        name: String,

        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saves
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one save
    Show {
        /// Save id or name
        save: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a save
    Delete {
        /// Save id or name
        save: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
