//! Pairwise comparison of two BI collections.
//!
//! BIs are paired by name: ids are assigned per save and are not stable
//! across snapshots. A rename therefore shows up as one removed and one new
//! record.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::entity::{BiItem, Criticality, SaveData, Status};

/// Label of the live session when it takes part in a comparison.
pub const SESSION_ID: &str = "current";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusChange {
    /// Only present on the comparison side.
    New,
    /// Only present on the base side.
    Removed,
    /// Became "Atualizado".
    Improved,
    /// Stopped being "Atualizado".
    Declined,
    /// Same status, or a move between two non-updated statuses.
    Unchanged,
}

impl std::fmt::Display for StatusChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusChange::New => write!(f, "new"),
            StatusChange::Removed => write!(f, "removed"),
            StatusChange::Improved => write!(f, "improved"),
            StatusChange::Declined => write!(f, "declined"),
            StatusChange::Unchanged => write!(f, "unchanged"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriticalityChange {
    Added,
    Removed,
    Increased,
    Decreased,
    Unchanged,
}

impl std::fmt::Display for CriticalityChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriticalityChange::Added => write!(f, "added"),
            CriticalityChange::Removed => write!(f, "removed"),
            CriticalityChange::Increased => write!(f, "increased"),
            CriticalityChange::Decreased => write!(f, "decreased"),
            CriticalityChange::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Outcome for one BI name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiComparison {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save1_data: Option<BiItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save2_data: Option<BiItem>,
    pub status_change: StatusChange,
    pub criticality_change: CriticalityChange,
    /// Comparison page count minus base page count.
    pub pages_change: i64,
    pub owner_change: bool,
    pub has_changes: bool,
}

/// Rollup counts.
///
/// `unchanged` counts records without any change at all, which is narrower
/// than `StatusChange::Unchanged`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
    pub improved: usize,
    pub declined: usize,
    pub unchanged: usize,
    pub new_bis: usize,
    pub removed_bis: usize,
    pub status_changes: usize,
    pub criticality_changes: usize,
    pub owner_changes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// One record per distinct name, sorted by name.
    pub records: Vec<BiComparison>,
    pub stats: ComparisonStats,
}

impl Comparison {
    pub fn get(&self, name: &str) -> Option<&BiComparison> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn changed(&self) -> impl Iterator<Item = &BiComparison> {
        self.records.iter().filter(|r| r.has_changes)
    }

    pub fn with_status_change(&self, change: StatusChange) -> impl Iterator<Item = &BiComparison> {
        self.records.iter().filter(move |r| r.status_change == change)
    }
}

/// One side of a comparison: a stored save or the live session.
#[derive(Debug, Clone, Copy)]
pub enum ComparisonSide<'a> {
    Save(&'a SaveData),
    Session(&'a [BiItem]),
}

impl<'a> ComparisonSide<'a> {
    pub fn bis(&self) -> &'a [BiItem] {
        match self {
            ComparisonSide::Save(save) => save.bis(),
            ComparisonSide::Session(bis) => bis,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            ComparisonSide::Save(save) => save.id(),
            ComparisonSide::Session(_) => SESSION_ID,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ComparisonSide::Save(save) => save.name(),
            ComparisonSide::Session(_) => "Sessão atual",
        }
    }

    pub fn created_at(&self) -> Option<&'a str> {
        match self {
            ComparisonSide::Save(save) => Some(save.created_at()),
            ComparisonSide::Session(_) => None,
        }
    }
}

pub fn compare_sides(base: &ComparisonSide<'_>, comparison: &ComparisonSide<'_>) -> Comparison {
    compare(base.bis(), comparison.bis())
}

/// Compare `base` (left) against `comparison` (right).
///
/// When a side lists the same name twice, its last entry is used.
pub fn compare(base: &[BiItem], comparison: &[BiItem]) -> Comparison {
    let left = index_by_name(base);
    let right = index_by_name(comparison);

    let names: BTreeSet<&str> = left.keys().chain(right.keys()).copied().collect();

    let mut result = Comparison::default();
    for name in names {
        let record = compare_one(name, left.get(name).copied(), right.get(name).copied());
        tally(&mut result.stats, &record);
        result.records.push(record);
    }
    result
}

fn index_by_name(bis: &[BiItem]) -> HashMap<&str, &BiItem> {
    let mut index = HashMap::with_capacity(bis.len());
    for bi in bis {
        index.insert(bi.name.as_str(), bi);
    }
    index
}

fn compare_one(name: &str, left: Option<&BiItem>, right: Option<&BiItem>) -> BiComparison {
    let (status_change, criticality_change, pages_change, owner_change, has_changes) =
        match (left, right) {
            (Some(l), Some(r)) => {
                let criticality_change = classify_criticality(l.criticality, r.criticality);
                let pages_change = r.page_count() as i64 - l.page_count() as i64;
                let owner_change = l.owner != r.owner;
                let has_changes = l.status != r.status
                    || l.criticality != r.criticality
                    || pages_change != 0
                    || owner_change;
                (
                    classify_status(&l.status, &r.status),
                    criticality_change,
                    pages_change,
                    owner_change,
                    has_changes,
                )
            }
            (None, _) => (StatusChange::New, CriticalityChange::Unchanged, 0, false, true),
            (_, None) => (StatusChange::Removed, CriticalityChange::Unchanged, 0, false, true),
        };

    BiComparison {
        name: name.to_string(),
        save1_data: left.cloned(),
        save2_data: right.cloned(),
        status_change,
        criticality_change,
        pages_change,
        owner_change,
        has_changes,
    }
}

fn classify_status(left: &Status, right: &Status) -> StatusChange {
    if left == right {
        StatusChange::Unchanged
    } else if right.is_updated() && !left.is_updated() {
        StatusChange::Improved
    } else if left.is_updated() && !right.is_updated() {
        StatusChange::Declined
    } else {
        StatusChange::Unchanged
    }
}

fn classify_criticality(left: Criticality, right: Criticality) -> CriticalityChange {
    match (left.is_present(), right.is_present()) {
        (false, true) => CriticalityChange::Added,
        (true, false) => CriticalityChange::Removed,
        _ => match right.rank().cmp(&left.rank()) {
            std::cmp::Ordering::Greater => CriticalityChange::Increased,
            std::cmp::Ordering::Less => CriticalityChange::Decreased,
            std::cmp::Ordering::Equal => CriticalityChange::Unchanged,
        },
    }
}

fn tally(stats: &mut ComparisonStats, record: &BiComparison) {
    match record.status_change {
        StatusChange::Improved => stats.improved += 1,
        StatusChange::Declined => stats.declined += 1,
        StatusChange::New => stats.new_bis += 1,
        StatusChange::Removed => stats.removed_bis += 1,
        StatusChange::Unchanged => {}
    }
    if !record.has_changes {
        stats.unchanged += 1;
    }
    if let (Some(l), Some(r)) = (&record.save1_data, &record.save2_data) {
        if l.status != r.status {
            stats.status_changes += 1;
        }
        if l.criticality != r.criticality {
            stats.criticality_changes += 1;
        }
    }
    if record.owner_change {
        stats.owner_changes += 1;
    }
}
