use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::json;

use super::commands::{BiFields, PageFields};
use crate::config::{BidashConfig, PROJECT_DIR};
use crate::diff::{BiComparison, CriticalityChange, StatusChange};
use crate::entity::{BiItem, Criticality, SaveData, Status};
use crate::error::{BidashError, Result};
use crate::filter::{filter_areas, filter_bis, parse_query};
use crate::stats::{breakdown, summarize};
use crate::storage::{Persistence, SqliteStore};
use crate::transfer::{export_comparison, export_document, export_sheets};
use crate::warnings::{check_working_set, format_warning};
use crate::workspace::{AreaUpdate, BiDraft, BiUpdate, PageDraft, PersistOutcome, Workspace};

/// Find the project root by looking for .bidash/
pub fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

struct Project {
    config: BidashConfig,
    workspace: Workspace,
}

fn open_project() -> Result<Project> {
    let root = find_project_root();
    if !root.join(PROJECT_DIR).is_dir() {
        return Err(BidashError::NotInitialized);
    }
    let config = BidashConfig::load(&root)?;
    let store = SqliteStore::open(&config.store_path(&root))?;
    let workspace = Workspace::open(Persistence::new(Box::new(store)));
    Ok(Project { config, workspace })
}

/// Ask for confirmation on a terminal. Without a terminal, `--force` is
/// required.
fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if !atty::is(atty::Stream::Stdin) {
        return Err(BidashError::validation(
            "Use --force to confirm in non-interactive mode",
        ));
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("Cancelled.");
        Ok(false)
    }
}

fn report_outcome(outcome: PersistOutcome) {
    if outcome == PersistOutcome::InMemoryOnly {
        eprintln!("Warning: could not write to the store, the change was not saved");
    }
}

fn parse_criticality(value: &str) -> Result<Criticality> {
    value.parse::<Criticality>().map_err(BidashError::Validation)
}

fn parse_status(value: &str) -> Result<Status> {
    value.parse::<Status>().map_err(BidashError::Validation)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;
    let dir = root.join(PROJECT_DIR);
    if dir.exists() {
        return Err(BidashError::AlreadyInitialized);
    }

    fs::create_dir_all(&dir)?;
    let config = BidashConfig::default();
    config.write(&root)?;
    SqliteStore::open(&config.store_path(&root))?;

    println!("Initialized bidash project in {}", root.display());
    Ok(())
}

// ---- areas ----

pub fn handle_area_add(name: String, description: Option<String>, json: bool) -> Result<()> {
    let mut project = open_project()?;
    let committed = project
        .workspace
        .edit(|s| s.add_area(&name, description))?;
    report_outcome(committed.outcome);

    let area = committed.value;
    if json {
        print_json(&area)?;
    } else {
        println!("Created area {} - {}", area.id, area.name);
    }
    Ok(())
}

pub fn handle_area_list(search: Option<String>, json: bool) -> Result<()> {
    let project = open_project()?;
    let session = project.workspace.session();
    let areas = filter_areas(session.areas(), search.as_deref().unwrap_or_default());

    if json {
        return print_json(&areas);
    }
    if areas.is_empty() {
        println!("No areas found.");
        return Ok(());
    }
    for area in &areas {
        let count = session.bis_using_area(&area.name).len();
        match &area.description {
            Some(desc) => println!("{:>4}  {} ({} BIs) - {}", area.id, area.name, count, desc),
            None => println!("{:>4}  {} ({} BIs)", area.id, area.name, count),
        }
    }
    Ok(())
}

pub fn handle_area_update(
    id: u64,
    name: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let mut project = open_project()?;
    let update = AreaUpdate {
        name,
        description: description.map(Some),
    };
    let committed = project.workspace.edit(|s| s.update_area(id, update))?;
    report_outcome(committed.outcome);

    let area = committed.value;
    if json {
        print_json(&area)?;
    } else {
        println!("Updated area {} - {}", area.id, area.name);
    }
    Ok(())
}

pub fn handle_area_delete(id: u64, force: bool) -> Result<()> {
    let mut project = open_project()?;
    let session = project.workspace.session();

    // Refuse before asking anything.
    session.check_area_deletable(id)?;
    let name = session.area(id)?.name.clone();

    if !confirm(&format!("Delete area '{}'?", name), force)? {
        return Ok(());
    }

    let committed = project.workspace.edit(|s| s.delete_area(id))?;
    report_outcome(committed.outcome);
    println!("Deleted area {} - {}", id, committed.value.name);
    Ok(())
}

// ---- BIs ----

pub fn handle_bi_add(name: String, fields: BiFields, json: bool) -> Result<()> {
    let mut project = open_project()?;

    let draft = BiDraft {
        name,
        owner: fields.owner.unwrap_or_default(),
        area: fields.areas,
        status: fields.status.as_deref().map(parse_status).transpose()?,
        last_update: fields.last_update.unwrap_or_default(),
        observations: fields.observations.unwrap_or_default(),
        usage: fields.usage.unwrap_or_default(),
        criticality: fields
            .criticality
            .as_deref()
            .map(parse_criticality)
            .transpose()?
            .unwrap_or_default(),
        description: fields.description,
        link: fields.link,
    };

    let committed = project.workspace.edit(|s| s.add_bi(draft))?;
    report_outcome(committed.outcome);

    let bi = committed.value;
    if json {
        print_json(&bi)?;
    } else {
        println!("Created BI {} - {}", bi.id, bi.name);
        for area in &bi.area {
            if !project.workspace.session().areas().iter().any(|a| a.name == *area) {
                eprintln!("Warning: area '{}' does not exist", area);
            }
        }
    }
    Ok(())
}

pub fn handle_bi_list(query: Vec<String>, json: bool) -> Result<()> {
    let project = open_project()?;
    let state = parse_query(&query.join(" "))?;
    let bis = filter_bis(project.workspace.session().bis(), &state);

    if json {
        return print_json(&bis);
    }
    if bis.is_empty() {
        println!("No BIs found.");
        return Ok(());
    }
    for bi in &bis {
        print_bi_line(bi);
    }
    if !state.is_empty() {
        println!(
            "{} of {} BIs",
            bis.len(),
            project.workspace.session().bis().len()
        );
    }
    Ok(())
}

fn print_bi_line(bi: &BiItem) {
    println!(
        "{:>4}  {:<32} {:<28} {:<14} {}",
        bi.id,
        bi.name,
        bi.status,
        bi.criticality.display_label(),
        bi.area.join(", ")
    );
}

pub fn handle_bi_get(id: u64, json: bool) -> Result<()> {
    let project = open_project()?;
    let bi = project.workspace.session().bi(id)?;

    if json {
        return print_json(bi);
    }

    println!("BI {} - {}", bi.id, bi.name);
    println!("Owner: {}", bi.owner);
    println!("Areas: {}", bi.area.join(", "));
    println!("Status: {}", bi.status);
    println!("Criticality: {}", bi.criticality.display_label());
    if !bi.last_update.is_empty() {
        println!("Last update: {}", bi.last_update);
    }
    if !bi.usage.is_empty() {
        println!("Usage: {}", bi.usage);
    }
    if !bi.observations.is_empty() {
        println!("Observations: {}", bi.observations);
    }
    if let Some(desc) = &bi.description {
        println!("Description: {}", desc);
    }
    if let Some(link) = &bi.link {
        println!("Link: {}", link);
    }
    if !bi.pages.is_empty() {
        println!("Pages:");
        for page in &bi.pages {
            let status = page.status.as_ref().map(Status::as_str).unwrap_or("-");
            let criticality = page.criticality.map(|c| c.display_label()).unwrap_or("-");
            println!("  {:>3}  {} [{} / {}]", page.id, page.name, status, criticality);
        }
    }
    Ok(())
}

pub fn handle_bi_update(
    id: u64,
    name: Option<String>,
    fields: BiFields,
    clear_areas: bool,
    clear_link: bool,
    json: bool,
) -> Result<()> {
    let mut project = open_project()?;

    let area = if clear_areas {
        Some(Vec::new())
    } else if fields.areas.is_empty() {
        None
    } else {
        Some(fields.areas)
    };
    let link = if clear_link {
        Some(None)
    } else {
        fields.link.map(Some)
    };

    let update = BiUpdate {
        name,
        owner: fields.owner,
        area,
        status: fields.status.as_deref().map(parse_status).transpose()?,
        last_update: fields.last_update,
        observations: fields.observations,
        usage: fields.usage,
        criticality: fields
            .criticality
            .as_deref()
            .map(parse_criticality)
            .transpose()?,
        description: fields.description.map(Some),
        link,
    };

    let committed = project.workspace.edit(|s| s.update_bi(id, update))?;
    report_outcome(committed.outcome);

    let bi = committed.value;
    if json {
        print_json(&bi)?;
    } else {
        println!("Updated BI {} - {}", bi.id, bi.name);
    }
    Ok(())
}

pub fn handle_bi_delete(id: u64, force: bool) -> Result<()> {
    let mut project = open_project()?;
    let bi = project.workspace.session().bi(id)?;

    let prompt = format!("Delete BI '{}' and its {} page(s)?", bi.name, bi.page_count());
    if !confirm(&prompt, force)? {
        return Ok(());
    }

    let committed = project.workspace.edit(|s| s.delete_bi(id))?;
    report_outcome(committed.outcome);
    println!("Deleted BI {} - {}", id, committed.value.name);
    Ok(())
}

// ---- pages ----

fn page_draft(name: Option<String>, fields: PageFields) -> Result<PageDraft> {
    Ok(PageDraft {
        name,
        status: fields.status.as_deref().map(parse_status).transpose()?,
        criticality: fields
            .criticality
            .as_deref()
            .map(parse_criticality)
            .transpose()?,
        observations: fields.observations,
        owner: fields.owner,
        last_update: fields.last_update,
        usage: fields.usage,
        description: fields.description,
    })
}

pub fn handle_page_add(bi_id: u64, name: String, fields: PageFields, json: bool) -> Result<()> {
    let mut project = open_project()?;
    let draft = page_draft(Some(name), fields)?;

    let committed = project.workspace.edit(|s| s.add_page(bi_id, draft))?;
    report_outcome(committed.outcome);

    let page = committed.value;
    if json {
        print_json(&page)?;
    } else {
        println!("Created page {} - {} (BI {})", page.id, page.name, bi_id);
    }
    Ok(())
}

pub fn handle_page_update(
    bi_id: u64,
    page_id: u64,
    name: Option<String>,
    fields: PageFields,
    json: bool,
) -> Result<()> {
    let mut project = open_project()?;
    let draft = page_draft(name, fields)?;

    let committed = project
        .workspace
        .edit(|s| s.update_page(bi_id, page_id, draft))?;
    report_outcome(committed.outcome);

    let page = committed.value;
    if json {
        print_json(&page)?;
    } else {
        println!("Updated page {} - {} (BI {})", page.id, page.name, bi_id);
    }
    Ok(())
}

pub fn handle_page_delete(bi_id: u64, page_id: u64, force: bool) -> Result<()> {
    let mut project = open_project()?;
    let bi = project.workspace.session().bi(bi_id)?;
    let page = bi
        .page(page_id)
        .ok_or_else(|| BidashError::not_found("Page", page_id))?;

    let prompt = format!("Delete page '{}' of BI '{}'?", page.name, bi.name);
    if !confirm(&prompt, force)? {
        return Ok(());
    }

    let committed = project
        .workspace
        .edit(|s| s.delete_page(bi_id, page_id))?;
    report_outcome(committed.outcome);
    println!("Deleted page {} - {}", page_id, committed.value.name);
    Ok(())
}

// ---- stats ----

pub fn handle_stats(query: Vec<String>, json: bool) -> Result<()> {
    let project = open_project()?;
    let state = parse_query(&query.join(" "))?;
    let bis = filter_bis(project.workspace.session().bis(), &state);

    let summary = summarize(&bis);
    let charts = breakdown(&bis);

    if json {
        return print_json(&json!({
            "summary": summary,
            "percentages": {
                "updated": summary.updated_percent(),
                "outdated": summary.outdated_percent(),
                "discontinued": summary.discontinued_percent(),
            },
            "breakdown": charts,
        }));
    }

    println!("BIs: {} ({} pages)", summary.total, summary.total_pages);
    println!(
        "  Atualizados:    {:>5} ({:.1}%)",
        summary.updated,
        summary.updated_percent()
    );
    println!(
        "  Desatualizados: {:>5} ({:.1}%)",
        summary.outdated,
        summary.outdated_percent()
    );
    println!(
        "  Descontinuados: {:>5} ({:.1}%)",
        summary.discontinued,
        summary.discontinued_percent()
    );

    for (title, counts) in [
        ("By status", &charts.by_status_kind),
        ("By criticality", &charts.by_criticality),
        ("By area", &charts.by_area),
    ] {
        if counts.is_empty() {
            continue;
        }
        println!("{}:", title);
        for (label, count) in counts {
            println!("  {:<28} {:>5}", label, count);
        }
    }
    Ok(())
}

// ---- saves ----

/// First eight characters of a save id, for one-line listings.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn print_save_line(save: &SaveData) {
    let stats = save.stats();
    println!(
        "{}  {:<24} {}  {} BIs ({} updated, {} outdated, {} discontinued)",
        short_id(save.id()),
        save.name(),
        save.created_at(),
        stats.total,
        stats.updated,
        stats.outdated,
        stats.discontinued
    );
}

pub fn handle_save_create(name: String, description: Option<String>, json: bool) -> Result<()> {
    let mut project = open_project()?;
    let committed = project
        .workspace
        .edit_saves(|saves, set| saves.create(&name, description, set).cloned())?;
    report_outcome(committed.outcome);

    let save = committed.value;
    if json {
        print_json(&save)?;
    } else {
        println!(
            "Created save '{}' ({}) with {} BIs",
            save.name(),
            save.id(),
            save.stats().total
        );
    }
    Ok(())
}

pub fn handle_save_list(json: bool) -> Result<()> {
    let project = open_project()?;
    let saves = project.workspace.saves().list();

    if json {
        return print_json(saves);
    }
    if saves.is_empty() {
        println!("No saves found.");
        return Ok(());
    }
    for save in saves {
        print_save_line(save);
    }
    Ok(())
}

pub fn handle_save_show(reference: String, json: bool) -> Result<()> {
    let project = open_project()?;
    let save = project.workspace.saves().get(&reference)?;

    if json {
        return print_json(save);
    }
    println!("Save '{}' ({})", save.name(), save.id());
    println!("Created: {}", save.created_at());
    if let Some(desc) = save.description() {
        println!("Description: {}", desc);
    }
    println!("Areas: {}", save.areas().len());
    let stats = save.stats();
    println!(
        "BIs: {} ({} updated, {} outdated, {} discontinued)",
        stats.total, stats.updated, stats.outdated, stats.discontinued
    );
    for bi in save.bis() {
        print_bi_line(bi);
    }
    Ok(())
}

pub fn handle_save_delete(reference: String, force: bool) -> Result<()> {
    let mut project = open_project()?;
    let save = project.workspace.saves().get(&reference)?;
    let id = save.id().to_string();

    if !confirm(&format!("Delete save '{}'?", save.name()), force)? {
        return Ok(());
    }

    let committed = project.workspace.edit_saves(|saves, _| saves.delete(&id))?;
    report_outcome(committed.outcome);
    println!("Deleted save '{}'", committed.value.name());
    Ok(())
}

// ---- compare ----

fn describe(record: &BiComparison) -> String {
    let mut parts = Vec::new();
    match record.status_change {
        StatusChange::New | StatusChange::Removed => {}
        _ => {
            if let (Some(before), Some(after)) = (&record.save1_data, &record.save2_data) {
                if before.status != after.status {
                    parts.push(format!("status: {} -> {}", before.status, after.status));
                }
            }
        }
    }
    if record.criticality_change != CriticalityChange::Unchanged {
        parts.push(format!("criticality {}", record.criticality_change));
    }
    if record.pages_change != 0 {
        parts.push(format!("pages {:+}", record.pages_change));
    }
    if record.owner_change {
        parts.push("owner changed".to_string());
    }
    parts.join(", ")
}

pub fn handle_compare(
    base: String,
    comparison: String,
    changed: bool,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let project = open_project()?;
    let workspace = &project.workspace;
    let result = workspace.compare(&base, &comparison)?;
    let left = workspace.side(&base)?;
    let right = workspace.side(&comparison)?;

    if let Some(path) = &output {
        fs::write(path, export_comparison(&left, &right, &result)?)?;
        eprintln!("Wrote comparison to {}", path.display());
    }

    if json {
        println!("{}", export_comparison(&left, &right, &result)?);
        return Ok(());
    }

    println!("Comparing '{}' -> '{}'", left.name(), right.name());
    let stats = &result.stats;
    println!(
        "  {} improved, {} declined, {} unchanged, {} new, {} removed",
        stats.improved, stats.declined, stats.unchanged, stats.new_bis, stats.removed_bis
    );
    println!(
        "  {} status changes, {} criticality changes, {} owner changes",
        stats.status_changes, stats.criticality_changes, stats.owner_changes
    );

    let records: Vec<&BiComparison> = if changed {
        result.changed().collect()
    } else {
        result.records.iter().collect()
    };
    for record in records {
        let details = describe(record);
        if details.is_empty() {
            println!("  {:<10} {}", record.status_change, record.name);
        } else {
            println!("  {:<10} {} ({})", record.status_change, record.name, details);
        }
    }
    Ok(())
}

// ---- transfer ----

pub fn handle_export(output: Option<PathBuf>) -> Result<()> {
    let project = open_project()?;
    let session = project.workspace.session();
    let document = export_document(session.bis(), session.areas())?;

    match output {
        Some(path) => {
            fs::write(&path, document)?;
            println!(
                "Exported {} BIs and {} areas to {}",
                session.bis().len(),
                session.areas().len(),
                path.display()
            );
        }
        None => println!("{}", document),
    }
    Ok(())
}

pub fn handle_import(file: &Path, force: bool) -> Result<()> {
    let mut project = open_project()?;
    let raw = fs::read_to_string(file)?;

    let current = project.workspace.session().working_set();
    if !current.is_empty() {
        let prompt = format!(
            "Replace {} BIs and {} areas with the imported data?",
            current.bis.len(),
            current.areas.len()
        );
        if !confirm(&prompt, force)? {
            return Ok(());
        }
    }

    let committed = project.workspace.import(&raw)?;
    report_outcome(committed.outcome);
    println!(
        "Imported {} BIs and {} areas",
        committed.value.bis.len(),
        committed.value.areas.len()
    );
    Ok(())
}

pub fn handle_export_sheets(dir: &Path) -> Result<()> {
    let project = open_project()?;
    let session = project.workspace.session();
    let files = export_sheets(dir, session.bis(), session.areas())?;
    for file in files {
        println!("Wrote {}", file.display());
    }
    Ok(())
}

// ---- governance ----

pub fn handle_check(json: bool) -> Result<()> {
    let project = open_project()?;
    let session = project.workspace.session();
    let warnings = check_working_set(
        session.bis(),
        session.areas(),
        project.workspace.saves().list(),
        project.config.item_warning_threshold,
    );

    if json {
        return print_json(&warnings);
    }
    if warnings.is_empty() {
        println!("No warnings.");
    }
    for warning in &warnings {
        println!("{}", format_warning(warning));
    }
    Ok(())
}

pub fn handle_clear(force: bool) -> Result<()> {
    let mut project = open_project()?;

    let prompt = format!(
        "Delete all {} BIs, {} areas and {} saves?",
        project.workspace.session().bis().len(),
        project.workspace.session().areas().len(),
        project.workspace.saves().len()
    );
    if !confirm(&prompt, force)? {
        return Ok(());
    }

    report_outcome(project.workspace.clear());
    println!("Cleared all data.");
    Ok(())
}
