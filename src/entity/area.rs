// src/entity/area.rs
use serde::{Deserialize, Serialize};

/// Organizational or system grouping that BIs reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Area {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
        }
    }
}
