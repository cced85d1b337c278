// src/entity/bi_item.rs
use serde::{Deserialize, Deserializer, Serialize};

use super::{Criticality, Page, Status};

/// A tracked BI report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    /// Area names, in the order they were assigned.
    #[serde(default, deserialize_with = "area_names")]
    pub area: Vec<String>,
    #[serde(default)]
    pub status: Status,
    /// Always `YYYY-MM-DD` or empty.
    #[serde(default)]
    pub last_update: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub criticality: Criticality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl BiItem {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            owner: String::new(),
            area: Vec::new(),
            status: Status::default(),
            last_update: String::new(),
            observations: String::new(),
            usage: String::new(),
            criticality: Criticality::default(),
            description: None,
            link: None,
            pages: Vec::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn in_area(&self, area: &str) -> bool {
        self.area.iter().any(|a| a == area)
    }

    pub fn page(&self, page_id: u64) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }
}

/// Older documents store a single area name instead of a list.
fn area_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) if name.trim().is_empty() => Vec::new(),
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
        OneOrMany::Null(()) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_uses_defaults() {
        let bi: BiItem = serde_json::from_str(r#"{"id": 7, "name": "Vendas"}"#).unwrap();
        assert_eq!(bi.id, 7);
        assert_eq!(bi.name, "Vendas");
        assert!(bi.area.is_empty());
        assert!(bi.status.is_updated());
        assert_eq!(bi.criticality, Criticality::NotApplicable);
        assert!(bi.pages.is_empty());
    }

    #[test]
    fn test_single_string_area_is_read_as_list() {
        let bi: BiItem =
            serde_json::from_str(r#"{"id": 1, "name": "X", "area": "BW"}"#).unwrap();
        assert_eq!(bi.area, vec!["BW".to_string()]);

        let bi: BiItem = serde_json::from_str(r#"{"id": 1, "name": "X", "area": ""}"#).unwrap();
        assert!(bi.area.is_empty());

        let bi: BiItem =
            serde_json::from_str(r#"{"id": 1, "name": "X", "area": null}"#).unwrap();
        assert!(bi.area.is_empty());
    }

    #[test]
    fn test_camel_case_field_names() {
        let mut bi = BiItem::new(1, "Financeiro".to_string());
        bi.last_update = "2024-05-01".to_string();
        bi.area = vec!["Controladoria".to_string()];
        let json = serde_json::to_value(&bi).unwrap();
        assert_eq!(json["lastUpdate"], "2024-05-01");
        assert_eq!(json["area"][0], "Controladoria");
        assert_eq!(json["criticality"], "");
        assert!(json.get("link").is_none());
    }

    #[test]
    fn test_in_area() {
        let mut bi = BiItem::new(1, "X".to_string());
        bi.area = vec!["BW".to_string(), "Controladoria".to_string()];
        assert!(bi.in_area("BW"));
        assert!(!bi.in_area("bw"));
    }
}
