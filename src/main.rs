use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bidash::cli::{
    find_project_root, handle_area_add, handle_area_delete, handle_area_list, handle_area_update,
    handle_bi_add, handle_bi_delete, handle_bi_get, handle_bi_list, handle_bi_update,
    handle_check, handle_clear, handle_compare, handle_export, handle_export_sheets,
    handle_import, handle_init, handle_page_add, handle_page_delete, handle_page_update,
    handle_save_create, handle_save_delete, handle_save_list, handle_save_show, handle_stats,
    AreaAction, BiAction, Cli, Commands, PageAction, SaveAction,
};
use bidash::BidashConfig;

fn init_tracing() {
    // A broken config is reported by the command itself.
    let log_level = BidashConfig::load(&find_project_root())
        .map(|config| config.log_level)
        .unwrap_or_else(|_| BidashConfig::default().log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::Area(area) => match area.action {
            AreaAction::Add {
                name,
                description,
                json,
            } => handle_area_add(name, description, json),
            AreaAction::List { search, json } => handle_area_list(search, json),
            AreaAction::Update {
                id,
                name,
                description,
                json,
            } => handle_area_update(id, name, description, json),
            AreaAction::Delete { id, force } => handle_area_delete(id, force),
        },
        Commands::Bi(bi) => match bi.action {
            BiAction::Add { name, fields, json } => handle_bi_add(name, fields, json),
            BiAction::List { query, json } => handle_bi_list(query, json),
            BiAction::Get { id, json } => handle_bi_get(id, json),
            BiAction::Update {
                id,
                name,
                fields,
                clear_areas,
                clear_link,
                json,
            } => handle_bi_update(id, name, fields, clear_areas, clear_link, json),
            BiAction::Delete { id, force } => handle_bi_delete(id, force),
        },
        Commands::Page(page) => match page.action {
            PageAction::Add {
                bi_id,
                name,
                fields,
                json,
            } => handle_page_add(bi_id, name, fields, json),
            PageAction::Update {
                bi_id,
                page_id,
                name,
                fields,
                json,
            } => handle_page_update(bi_id, page_id, name, fields, json),
            PageAction::Delete {
                bi_id,
                page_id,
                force,
            } => handle_page_delete(bi_id, page_id, force),
        },
        Commands::Stats { query, json } => handle_stats(query, json),
        Commands::Save(save) => match save.action {
            SaveAction::Create {
                name,
                description,
                json,
            } => handle_save_create(name, description, json),
            SaveAction::List { json } => handle_save_list(json),
            SaveAction::Show { save, json } => handle_save_show(save, json),
            SaveAction::Delete { save, force } => handle_save_delete(save, force),
        },
        Commands::Compare {
            base,
            comparison,
            changed,
            output,
            json,
        } => handle_compare(base, comparison, changed, output, json),
        Commands::Export { output } => handle_export(output),
        Commands::Import { file, force } => handle_import(&file, force),
        Commands::ExportSheets { dir } => handle_export_sheets(&dir),
        Commands::Check { json } => handle_check(json),
        Commands::Clear { force } => handle_clear(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
