//! Query-string form of a [`FilterState`].

use super::FilterState;
use crate::entity::{Criticality, StatusCategory};
use crate::error::{BidashError, Result};

/// Parse a raw query string into a filter state.
///
/// Tokens with a prefix populate the selections, everything else is joined
/// back into the search text:
/// - `status:outdated` - status category (updated, outdated, discontinued)
/// - `crit:alta` - criticality (alta, media, baixa, none)
/// - `area:BW` - area name (can specify multiple)
///
/// # Examples
///
/// ```ignore
/// let state = parse_query("status:outdated area:BW vendas")?;
/// assert_eq!(state.search, "vendas");
/// ```
pub fn parse_query(raw: &str) -> Result<FilterState> {
    let mut state = FilterState::new();
    let mut remaining = Vec::new();

    for token in raw.split_whitespace() {
        if let Some(value) = token.strip_prefix("status:") {
            let category = value
                .parse::<StatusCategory>()
                .map_err(BidashError::Validation)?;
            state.statuses.select(category);
        } else if let Some(value) = token
            .strip_prefix("crit:")
            .or_else(|| token.strip_prefix("criticality:"))
        {
            let criticality = value
                .parse::<Criticality>()
                .map_err(BidashError::Validation)?;
            state.criticalities.select(criticality);
        } else if let Some(value) = token.strip_prefix("area:") {
            if !value.is_empty() {
                state.areas.select(value.to_string());
            }
        } else {
            remaining.push(token);
        }
    }

    state.search = remaining.join(" ");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_no_filters() {
        let state = parse_query("painel vendas").unwrap();
        assert_eq!(state.search, "painel vendas");
        assert!(state.statuses.is_empty());
        assert!(state.areas.is_empty());
    }

    #[test]
    fn test_parse_query_status_filter() {
        let state = parse_query("status:outdated estoque").unwrap();
        assert_eq!(state.search, "estoque");
        assert!(state.statuses.contains(&StatusCategory::Outdated));
    }

    #[test]
    fn test_parse_query_criticality_none() {
        let state = parse_query("crit:none crit:alta").unwrap();
        assert!(state.criticalities.contains(&Criticality::NotApplicable));
        assert!(state.criticalities.contains(&Criticality::High));
    }

    #[test]
    fn test_parse_query_multiple_areas() {
        let state = parse_query("area:BW area:Controladoria").unwrap();
        assert_eq!(state.search, "");
        assert_eq!(
            state.areas.values(),
            &["BW".to_string(), "Controladoria".to_string()]
        );
    }

    #[test]
    fn test_parse_query_invalid_category() {
        let result = parse_query("status:maybe");
        assert!(matches!(result, Err(BidashError::Validation(_))));
    }

    #[test]
    fn test_parse_query_does_not_set_anchor() {
        let state = parse_query("status:updated").unwrap();
        assert_eq!(state.statuses.last(), None);
    }
}
