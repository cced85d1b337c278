//! Documents that leave or enter the tool: the portable export/import
//! document, the comparison export and the spreadsheet export.

mod comparison;
mod document;
mod sheets;

pub use comparison::{export_comparison, ComparisonDocument, SideReference};
pub use document::{export_document, import_document, ExportDocument, DOCUMENT_VERSION};
pub use sheets::{export_sheets, SheetRow, AREAS_SHEET, BIS_SHEET, METADATA_SHEET};
