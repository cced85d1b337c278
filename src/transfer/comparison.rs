//! Write-only document describing one save comparison.

use chrono::Utc;
use serde::Serialize;

use crate::diff::{BiComparison, Comparison, ComparisonSide, ComparisonStats};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideReference {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&ComparisonSide<'_>> for SideReference {
    fn from(side: &ComparisonSide<'_>) -> Self {
        Self {
            id: side.id().to_string(),
            name: side.name().to_string(),
            created_at: side.created_at().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDocument<'a> {
    pub comparison_date: String,
    pub save1: SideReference,
    pub save2: SideReference,
    pub stats: ComparisonStats,
    pub comparisons: &'a [BiComparison],
}

impl<'a> ComparisonDocument<'a> {
    pub fn new(
        base: &ComparisonSide<'_>,
        comparison: &ComparisonSide<'_>,
        result: &'a Comparison,
    ) -> Self {
        Self {
            comparison_date: Utc::now().to_rfc3339(),
            save1: SideReference::from(base),
            save2: SideReference::from(comparison),
            stats: result.stats,
            comparisons: &result.records,
        }
    }
}

pub fn export_comparison(
    base: &ComparisonSide<'_>,
    comparison: &ComparisonSide<'_>,
    result: &Comparison,
) -> Result<String> {
    let document = ComparisonDocument::new(base, comparison, result);
    Ok(serde_json::to_string_pretty(&document)?)
}
