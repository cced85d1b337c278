// src/entity/save.rs
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Area, BiItem};
use crate::stats::Summary;

/// Counters cached on a save when it is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStats {
    pub total: usize,
    pub updated: usize,
    pub outdated: usize,
    pub discontinued: usize,
}

impl From<&Summary> for SaveStats {
    fn from(summary: &Summary) -> Self {
        Self {
            total: summary.total,
            updated: summary.updated,
            outdated: summary.outdated,
            discontinued: summary.discontinued,
        }
    }
}

/// A named, immutable point-in-time copy of the working set.
///
/// There is no API that edits a save after creation; `stats` is computed
/// once from `bis` and is only ever read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: String,
    #[serde(default)]
    bis: Vec<BiItem>,
    #[serde(default)]
    areas: Vec<Area>,
    #[serde(default)]
    stats: SaveStats,
}

impl SaveData {
    /// Copy the given collections into a new save.
    pub fn capture(
        name: String,
        description: Option<String>,
        bis: &[BiItem],
        areas: &[Area],
    ) -> Self {
        let stats = SaveStats::from(&crate::stats::summarize(bis));
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            created_at: Utc::now().to_rfc3339(),
            bis: bis.to_vec(),
            areas: areas.to_vec(),
            stats,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn bis(&self) -> &[BiItem] {
        &self.bis
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn stats(&self) -> SaveStats {
        self.stats
    }

    /// Whether the cached stats still match the stored BIs. Saves loaded
    /// from hand-edited documents may disagree.
    pub fn stats_are_current(&self) -> bool {
        SaveStats::from(&crate::stats::summarize(&self.bis)) == self.stats
    }
}
