//! Filter engine for the BI and area lists.
//!
//! Filters are held in an explicit [`FilterState`] value and applied by pure
//! functions. Dimensions are ANDed together; an empty selection on a
//! dimension does not restrict it.

mod query;
mod selection;

pub use query::parse_query;
pub use selection::Selection;

use crate::entity::{Area, BiItem, Criticality, StatusCategory};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring over name, owner, observations and areas.
    pub search: String,
    pub statuses: Selection<StatusCategory>,
    /// `Criticality::NotApplicable` stands for the "none" category.
    pub criticalities: Selection<Criticality>,
    pub areas: Selection<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.statuses.is_empty()
            && self.criticalities.is_empty()
            && self.areas.is_empty()
    }

    pub fn toggle_status(&mut self, category: StatusCategory, range: bool) {
        if range {
            self.statuses.toggle_range(category, &StatusCategory::ORDER);
        } else {
            self.statuses.toggle(category);
        }
    }

    pub fn toggle_criticality(&mut self, criticality: Criticality, range: bool) {
        if range {
            self.criticalities
                .toggle_range(criticality, &Criticality::ORDER);
        } else {
            self.criticalities.toggle(criticality);
        }
    }

    /// `areas` is the full area list; range toggles walk it alphabetically.
    pub fn toggle_area(&mut self, name: &str, range: bool, areas: &[Area]) {
        if range {
            self.areas.toggle_range(name.to_string(), &area_order(areas));
        } else {
            self.areas.toggle(name.to_string());
        }
    }

    pub fn matches(&self, bi: &BiItem) -> bool {
        matches_search(bi, &self.search)
            && matches_status(bi, &self.statuses)
            && matches_criticality(bi, &self.criticalities)
            && matches_areas(bi, &self.areas)
    }
}

/// Area names in the fixed order used for range selection.
pub fn area_order(areas: &[Area]) -> Vec<String> {
    let mut names: Vec<String> = areas.iter().map(|a| a.name.clone()).collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    names.dedup();
    names
}

pub fn filter_bis(bis: &[BiItem], state: &FilterState) -> Vec<BiItem> {
    bis.iter().filter(|bi| state.matches(bi)).cloned().collect()
}

/// Narrow the area list by search text over name and description.
pub fn filter_areas(areas: &[Area], search: &str) -> Vec<Area> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return areas.to_vec();
    }
    areas
        .iter()
        .filter(|area| {
            area.name.to_lowercase().contains(&needle)
                || area
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

fn matches_search(bi: &BiItem, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    bi.name.to_lowercase().contains(&needle)
        || bi.owner.to_lowercase().contains(&needle)
        || bi.observations.to_lowercase().contains(&needle)
        || bi.area.iter().any(|a| a.to_lowercase().contains(&needle))
}

fn matches_status(bi: &BiItem, selection: &Selection<StatusCategory>) -> bool {
    if selection.is_empty() {
        return true;
    }
    bi.status
        .category()
        .is_some_and(|category| selection.contains(&category))
}

fn matches_criticality(bi: &BiItem, selection: &Selection<Criticality>) -> bool {
    selection.is_empty() || selection.contains(&bi.criticality)
}

fn matches_areas(bi: &BiItem, selection: &Selection<String>) -> bool {
    selection.is_empty() || bi.area.iter().any(|a| selection.contains(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Status;

    fn bi(name: &str, owner: &str, areas: &[&str], status: Status, crit: Criticality) -> BiItem {
        let mut bi = BiItem::new(1, name.to_string());
        bi.owner = owner.to_string();
        bi.area = areas.iter().map(|a| a.to_string()).collect();
        bi.status = status;
        bi.criticality = crit;
        bi
    }

    fn sample() -> Vec<BiItem> {
        vec![
            bi("Vendas", "Ana", &["BW", "Controladoria"], Status::updated(), Criticality::High),
            bi(
                "Estoque",
                "Bruno",
                &["Logística"],
                Status::parse("Desatualizado desde 06/08/24"),
                Criticality::Low,
            ),
            bi("Folha", "Carla", &[], Status::discontinued(), Criticality::NotApplicable),
            bi("Metas", "Ana", &["BW"], Status::parse("Em revisão"), Criticality::Medium),
        ]
    }

    fn names(bis: &[BiItem]) -> Vec<&str> {
        bis.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_empty_state_keeps_everything() {
        let bis = sample();
        let state = FilterState::new();
        assert!(state.is_empty());
        assert_eq!(filter_bis(&bis, &state).len(), bis.len());
    }

    #[test]
    fn test_search_is_case_insensitive_over_fields() {
        let bis = sample();
        let mut state = FilterState::new();

        state.search = "ANA".to_string();
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Vendas", "Metas"]);

        state.search = "controlad".to_string();
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Vendas"]);

        state.search = "estoque".to_string();
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Estoque"]);
    }

    #[test]
    fn test_status_filter_uses_categories() {
        let bis = sample();
        let mut state = FilterState::new();
        state.toggle_status(StatusCategory::Outdated, false);
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Estoque"]);

        state.toggle_status(StatusCategory::Updated, false);
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Vendas", "Estoque"]);
    }

    #[test]
    fn test_status_range_toggle() {
        let mut state = FilterState::new();
        state.toggle_status(StatusCategory::Updated, false);
        state.toggle_status(StatusCategory::Discontinued, true);
        assert_eq!(state.statuses.values().len(), 3);
    }

    #[test]
    fn test_criticality_none_matches_absent() {
        let bis = sample();
        let mut state = FilterState::new();
        state.toggle_criticality(Criticality::NotApplicable, false);
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Folha"]);
    }

    #[test]
    fn test_criticality_range_toggle_uses_fixed_order() {
        let mut state = FilterState::new();
        state.toggle_criticality(Criticality::High, false);
        state.toggle_criticality(Criticality::Low, true);
        assert!(state.criticalities.contains(&Criticality::Medium));
        assert!(!state.criticalities.contains(&Criticality::NotApplicable));
    }

    #[test]
    fn test_area_filter_intersects() {
        let bis = sample();
        let mut state = FilterState::new();
        state.areas = Selection::from_values(["BW".to_string()]);
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Vendas", "Metas"]);
    }

    #[test]
    fn test_area_range_toggle_is_alphabetical() {
        let areas = vec![
            Area::new(1, "Vendas".to_string()),
            Area::new(2, "BW".to_string()),
            Area::new(3, "Logística".to_string()),
            Area::new(4, "controladoria".to_string()),
        ];
        let mut state = FilterState::new();
        state.toggle_area("BW", false, &areas);
        state.toggle_area("Logística", true, &areas);

        assert!(state.areas.contains(&"BW".to_string()));
        assert!(state.areas.contains(&"controladoria".to_string()));
        assert!(state.areas.contains(&"Logística".to_string()));
        assert!(!state.areas.contains(&"Vendas".to_string()));
    }

    #[test]
    fn test_dimensions_are_anded() {
        let bis = sample();
        let mut state = FilterState::new();
        state.search = "ana".to_string();
        state.toggle_status(StatusCategory::Updated, false);
        state.areas = Selection::from_values(["BW".to_string()]);
        assert_eq!(names(&filter_bis(&bis, &state)), vec!["Vendas"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let bis = sample();
        let mut state = FilterState::new();
        state.search = "a".to_string();
        state.toggle_criticality(Criticality::High, false);
        state.toggle_criticality(Criticality::Medium, false);

        let once = filter_bis(&bis, &state);
        let twice = filter_bis(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_areas_by_search() {
        let mut bw = Area::new(1, "BW".to_string());
        bw.description = Some("SAP Business Warehouse".to_string());
        let areas = vec![bw, Area::new(2, "Controladoria".to_string())];

        assert_eq!(filter_areas(&areas, "warehouse").len(), 1);
        assert_eq!(filter_areas(&areas, "CONTROL").len(), 1);
        assert_eq!(filter_areas(&areas, "").len(), 2);
    }
}
