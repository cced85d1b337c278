//! Governance checks over a working set.
//!
//! None of these conditions is enforced when data is written; `check`
//! reports them so they can be fixed by hand.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entity::{Area, BiItem, SaveData};

/// A soft-invariant violation or size concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A BI references an area name with no matching Area.
    DanglingAreaReference { bi: String, area: String },
    /// Several BIs share a name, so comparisons will only see the last one.
    DuplicateBiName { name: String, count: usize },
    /// A save whose cached stats disagree with its stored BIs.
    StaleSaveStats { save: String },
    /// BI count exceeds the configured threshold.
    HighItemCount { count: usize, threshold: usize },
}

/// Check the live collections and the saves, returning every warning found.
pub fn check_working_set(
    bis: &[BiItem],
    areas: &[Area],
    saves: &[SaveData],
    threshold: usize,
) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for bi in bis {
        for area in &bi.area {
            if !areas.iter().any(|a| a.name == *area) {
                warnings.push(Warning::DanglingAreaReference {
                    bi: bi.name.clone(),
                    area: area.clone(),
                });
            }
        }
    }

    let mut names: BTreeMap<&str, usize> = BTreeMap::new();
    for bi in bis {
        *names.entry(bi.name.as_str()).or_default() += 1;
    }
    for (name, count) in names {
        if count > 1 {
            warnings.push(Warning::DuplicateBiName {
                name: name.to_string(),
                count,
            });
        }
    }

    for save in saves.iter().filter(|s| !s.stats_are_current()) {
        warnings.push(Warning::StaleSaveStats {
            save: save.name().to_string(),
        });
    }

    if bis.len() > threshold {
        warnings.push(Warning::HighItemCount {
            count: bis.len(),
            threshold,
        });
    }

    warnings
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::DanglingAreaReference { bi, area } => {
            format!("Warning: BI '{}' references unknown area '{}'", bi, area)
        }
        Warning::DuplicateBiName { name, count } => {
            format!(
                "Warning: {} BIs are named '{}' - comparisons pair BIs by name",
                count, name
            )
        }
        Warning::StaleSaveStats { save } => {
            format!(
                "Warning: save '{}' has stats that do not match its BIs",
                save
            )
        }
        Warning::HighItemCount { count, threshold } => {
            format!(
                "Warning: {} BIs exceeds recommended {} - filtering may slow down",
                count, threshold
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bi(id: u64, name: &str, areas: &[&str]) -> BiItem {
        let mut bi = BiItem::new(id, name.to_string());
        bi.area = areas.iter().map(|a| a.to_string()).collect();
        bi
    }

    #[test]
    fn test_no_warnings_for_consistent_set() {
        let bis = vec![bi(1, "Vendas", &["BW"])];
        let areas = vec![Area::new(1, "BW".to_string())];
        let save = SaveData::capture("S".to_string(), None, &bis, &areas);
        assert!(check_working_set(&bis, &areas, &[save], 100).is_empty());
    }

    #[test]
    fn test_dangling_area_reference() {
        let bis = vec![bi(1, "Vendas", &["BW", "Fantasma"])];
        let areas = vec![Area::new(1, "BW".to_string())];
        let warnings = check_working_set(&bis, &areas, &[], 100);
        assert_eq!(
            warnings,
            vec![Warning::DanglingAreaReference {
                bi: "Vendas".to_string(),
                area: "Fantasma".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_names() {
        let bis = vec![bi(1, "Vendas", &[]), bi(2, "Vendas", &[]), bi(3, "RH", &[])];
        let warnings = check_working_set(&bis, &[], &[], 100);
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            Warning::DuplicateBiName { name, count } => {
                assert_eq!(name, "Vendas");
                assert_eq!(*count, 2);
            }
            _ => panic!("Expected DuplicateBiName warning"),
        }
    }

    #[test]
    fn test_stale_save_stats() {
        let json = r#"{"id": "s1", "name": "Manual", "createdAt": "2024-01-01T00:00:00Z",
            "bis": [], "areas": [], "stats": {"total": 3, "updated": 3, "outdated": 0, "discontinued": 0}}"#;
        let save: SaveData = serde_json::from_str(json).unwrap();
        let warnings = check_working_set(&[], &[], &[save], 100);
        assert_eq!(
            warnings,
            vec![Warning::StaleSaveStats {
                save: "Manual".to_string()
            }]
        );
    }

    #[test]
    fn test_high_item_count() {
        let bis: Vec<BiItem> = (1..=3).map(|i| bi(i, &format!("BI {}", i), &[])).collect();
        let warnings = check_working_set(&bis, &[], &[], 2);
        assert_eq!(
            warnings,
            vec![Warning::HighItemCount {
                count: 3,
                threshold: 2
            }]
        );
    }

    #[test]
    fn test_format_dangling() {
        let msg = format_warning(&Warning::DanglingAreaReference {
            bi: "Vendas".to_string(),
            area: "X".to_string(),
        });
        assert!(msg.contains("Vendas"));
        assert!(msg.contains("'X'"));
    }

    #[test]
    fn test_format_high_item_count() {
        let msg = format_warning(&Warning::HighItemCount {
            count: 2500,
            threshold: 2000,
        });
        assert!(msg.contains("2500"));
        assert!(msg.contains("2000"));
    }
}
