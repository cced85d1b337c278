//! Spreadsheet export: one `;`-separated CSV file per sheet.
//!
//! Files start with a UTF-8 BOM so spreadsheet tools pick the right encoding
//! for accented labels.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::DOCUMENT_VERSION;
use crate::entity::{Area, BiItem};
use crate::error::Result;
use crate::stats::summarize;

pub const BIS_SHEET: &str = "BIs.csv";
pub const AREAS_SHEET: &str = "Areas.csv";
pub const METADATA_SHEET: &str = "Metadados.csv";

/// A row type that can be written to a sheet.
pub trait SheetRow {
    fn headers() -> Vec<&'static str>;

    fn to_row(&self) -> Vec<String>;
}

impl SheetRow for BiItem {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Nome",
            "Responsável",
            "Áreas",
            "Status",
            "Criticidade",
            "Última Atualização",
            "Uso",
            "Observações",
            "Descrição",
            "Link",
            "Páginas",
            "Nomes das Páginas",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.owner.clone(),
            self.area.join(", "),
            self.status.to_string(),
            self.criticality.display_label().to_string(),
            self.last_update.clone(),
            self.usage.clone(),
            self.observations.clone(),
            self.description.clone().unwrap_or_default(),
            self.link.clone().unwrap_or_default(),
            self.page_count().to_string(),
            self.pages
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ]
    }
}

/// An area plus the number of BIs referencing it.
struct AreaRow<'a> {
    area: &'a Area,
    bi_count: usize,
}

impl SheetRow for AreaRow<'_> {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Nome", "Descrição", "Quantidade de BIs"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.area.id.to_string(),
            self.area.name.clone(),
            self.area.description.clone().unwrap_or_default(),
            self.bi_count.to_string(),
        ]
    }
}

/// Write the BI, area and metadata sheets into `dir`.
pub fn export_sheets(dir: &Path, bis: &[BiItem], areas: &[Area]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let bis_path = dir.join(BIS_SHEET);
    write_sheet(&bis_path, bis)?;

    let area_rows: Vec<AreaRow<'_>> = areas
        .iter()
        .map(|area| AreaRow {
            area,
            bi_count: bis.iter().filter(|bi| bi.in_area(&area.name)).count(),
        })
        .collect();
    let areas_path = dir.join(AREAS_SHEET);
    write_sheet(&areas_path, &area_rows)?;

    let metadata_path = dir.join(METADATA_SHEET);
    write_metadata(&metadata_path, bis, areas)?;

    tracing::info!(dir = %dir.display(), "exported spreadsheet");
    Ok(vec![bis_path, areas_path, metadata_path])
}

fn write_sheet<T: SheetRow>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = sheet_writer(path)?;
    writer.write_record(T::headers())?;
    for row in rows {
        writer.write_record(row.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

fn write_metadata(path: &Path, bis: &[BiItem], areas: &[Area]) -> Result<()> {
    let summary = summarize(bis);
    let rows = [
        ("Data de exportação", Utc::now().to_rfc3339()),
        ("Versão", DOCUMENT_VERSION.to_string()),
        ("Total de BIs", summary.total.to_string()),
        ("Atualizados", summary.updated.to_string()),
        ("Desatualizados", summary.outdated.to_string()),
        ("Descontinuados", summary.discontinued.to_string()),
        ("Total de páginas", summary.total_pages.to_string()),
        ("Total de áreas", areas.len().to_string()),
    ];

    let mut writer = sheet_writer(path)?;
    writer.write_record(["Campo", "Valor"])?;
    for (field, value) in rows {
        writer.write_record([field, value.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn sheet_writer(path: &Path) -> Result<csv::Writer<File>> {
    let mut file = File::create(path)?;
    file.write_all("\u{FEFF}".as_bytes())?;
    Ok(csv::WriterBuilder::new().delimiter(b';').from_writer(file))
}
