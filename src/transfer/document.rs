//! Portable JSON document for moving a working set between installations.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{Area, BiItem, WorkingSet};
use crate::error::{BidashError, Result};

pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub bis: Vec<BiItem>,
    pub areas: Vec<Area>,
    pub export_date: String,
    pub version: String,
}

impl ExportDocument {
    pub fn new(bis: &[BiItem], areas: &[Area]) -> Self {
        Self {
            bis: bis.to_vec(),
            areas: areas.to_vec(),
            export_date: Utc::now().to_rfc3339(),
            version: DOCUMENT_VERSION.to_string(),
        }
    }
}

/// Serialize the working set as a pretty-printed export document.
pub fn export_document(bis: &[BiItem], areas: &[Area]) -> Result<String> {
    let document = ExportDocument::new(bis, areas);
    let json = serde_json::to_string_pretty(&document)?;
    tracing::info!(bis = bis.len(), areas = areas.len(), "exported document");
    Ok(json)
}

/// Validate and decode an export document.
///
/// The document must be a JSON object whose `bis` and `areas` fields are
/// both arrays, and every element must decode into its entity type. Any
/// failure rejects the whole document.
pub fn import_document(raw: &str) -> Result<WorkingSet> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| BidashError::validation(format!("Invalid JSON document: {}", e)))?;

    let Value::Object(object) = value else {
        return Err(BidashError::validation(
            "Invalid document: expected a JSON object with 'bis' and 'areas'",
        ));
    };

    let bis_raw = array_field(&object, "bis")?;
    let areas_raw = array_field(&object, "areas")?;

    match object.get("version").and_then(Value::as_str) {
        Some(DOCUMENT_VERSION) | None => {}
        Some(other) => tracing::warn!(version = other, "importing document with unknown version"),
    }

    let bis: Vec<BiItem> = decode_elements("bis", bis_raw)?;
    let areas: Vec<Area> = decode_elements("areas", areas_raw)?;

    tracing::info!(bis = bis.len(), areas = areas.len(), "imported document");
    Ok(WorkingSet { bis, areas })
}

fn array_field<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>> {
    match object.get(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(BidashError::validation(format!(
            "Invalid document: '{}' must be an array",
            field
        ))),
        None => Err(BidashError::validation(format!(
            "Invalid document: missing '{}' field",
            field
        ))),
    }
}

fn decode_elements<T: DeserializeOwned>(field: &str, items: &[Value]) -> Result<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| {
                BidashError::validation(format!("Invalid document: {}[{}]: {}", field, index, e))
            })
        })
        .collect()
}
