//! Summary statistics and chart breakdowns over a list of BIs.
//!
//! Everything here is a pure function of its input slice: the result does
//! not depend on item order and recomputing it gives the same value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entity::{BiItem, Criticality, StatusKind};

/// Bucket for BIs that have no area assigned.
pub const NO_AREA_LABEL: &str = "(sem área)";

/// Counts over a list of BIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub updated: usize,
    pub outdated: usize,
    pub discontinued: usize,
    pub total_pages: usize,
}

impl Summary {
    pub fn updated_percent(&self) -> f64 {
        percent(self.updated, self.total)
    }

    pub fn outdated_percent(&self) -> f64 {
        percent(self.outdated, self.total)
    }

    pub fn discontinued_percent(&self) -> f64 {
        percent(self.discontinued, self.total)
    }
}

/// `count / total` as a percentage, 0 when `total` is 0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}

pub fn summarize(bis: &[BiItem]) -> Summary {
    bis.iter().fold(Summary::default(), |mut summary, bi| {
        summary.total += 1;
        if bi.status.is_updated() {
            summary.updated += 1;
        }
        if bi.status.is_outdated() {
            summary.outdated += 1;
        }
        if bi.status.is_discontinued() {
            summary.discontinued += 1;
        }
        summary.total_pages += bi.page_count();
        summary
    })
}

/// Data behind the dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub by_status_kind: BTreeMap<String, usize>,
    pub by_criticality: BTreeMap<String, usize>,
    pub by_area: BTreeMap<String, usize>,
}

pub fn breakdown(bis: &[BiItem]) -> Breakdown {
    let mut by_status_kind: BTreeMap<StatusKind, usize> = BTreeMap::new();
    let mut by_criticality: BTreeMap<Criticality, usize> = BTreeMap::new();
    let mut by_area: BTreeMap<String, usize> = BTreeMap::new();

    for bi in bis {
        *by_status_kind.entry(bi.status.kind()).or_default() += 1;
        *by_criticality.entry(bi.criticality).or_default() += 1;

        if bi.area.is_empty() {
            *by_area.entry(NO_AREA_LABEL.to_string()).or_default() += 1;
        }
        // An area listed twice on one BI still counts once.
        let mut seen: Vec<&str> = Vec::with_capacity(bi.area.len());
        for area in &bi.area {
            if !seen.contains(&area.as_str()) {
                seen.push(area.as_str());
                *by_area.entry(area.clone()).or_default() += 1;
            }
        }
    }

    Breakdown {
        by_status_kind: by_status_kind
            .into_iter()
            .map(|(kind, count)| (kind.label().to_string(), count))
            .collect(),
        by_criticality: by_criticality
            .into_iter()
            .map(|(crit, count)| (crit.display_label().to_string(), count))
            .collect(),
        by_area,
    }
}
