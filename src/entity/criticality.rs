// src/entity/criticality.rs
use serde::{Deserialize, Serialize};

/// Ordinal importance of a BI. The empty label means "Não Aplicável".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(try_from = "String", into = "String")]
pub enum Criticality {
    #[default]
    NotApplicable,
    Low,
    Medium,
    High,
}

impl Criticality {
    /// Fixed order used for range selection.
    pub const ORDER: [Criticality; 4] = [
        Criticality::High,
        Criticality::Medium,
        Criticality::Low,
        Criticality::NotApplicable,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            Criticality::High => 3,
            Criticality::Medium => 2,
            Criticality::Low => 1,
            Criticality::NotApplicable => 0,
        }
    }

    pub fn is_present(&self) -> bool {
        *self != Criticality::NotApplicable
    }

    /// Stored label; absent criticality is the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::High => "Alta",
            Criticality::Medium => "Média",
            Criticality::Low => "Baixa",
            Criticality::NotApplicable => "",
        }
    }

    /// Label for display, where absence reads as "Não Aplicável".
    pub fn display_label(&self) -> &'static str {
        match self {
            Criticality::NotApplicable => "Não Aplicável",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

impl std::str::FromStr for Criticality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alta" | "high" => Ok(Criticality::High),
            "média" | "media" | "medium" => Ok(Criticality::Medium),
            "baixa" | "low" => Ok(Criticality::Low),
            "" | "none" | "não aplicável" | "nao aplicavel" | "n/a" => {
                Ok(Criticality::NotApplicable)
            }
            _ => Err(format!("Invalid criticality: {}", s)),
        }
    }
}

impl TryFrom<String> for Criticality {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Criticality> for String {
    fn from(criticality: Criticality) -> Self {
        criticality.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(Criticality::High.rank() > Criticality::Medium.rank());
        assert!(Criticality::Medium.rank() > Criticality::Low.rank());
        assert!(Criticality::Low.rank() > Criticality::NotApplicable.rank());
        assert_eq!(Criticality::NotApplicable.rank(), 0);
    }

    #[test]
    fn test_parse_labels_and_aliases() {
        assert_eq!("Alta".parse::<Criticality>(), Ok(Criticality::High));
        assert_eq!("Média".parse::<Criticality>(), Ok(Criticality::Medium));
        assert_eq!("media".parse::<Criticality>(), Ok(Criticality::Medium));
        assert_eq!("low".parse::<Criticality>(), Ok(Criticality::Low));
        assert_eq!("".parse::<Criticality>(), Ok(Criticality::NotApplicable));
        assert_eq!(
            "Não Aplicável".parse::<Criticality>(),
            Ok(Criticality::NotApplicable)
        );
        assert!("urgente".parse::<Criticality>().is_err());
    }

    #[test]
    fn test_absent_serializes_as_empty_string() {
        let json = serde_json::to_string(&Criticality::NotApplicable).unwrap();
        assert_eq!(json, "\"\"");
        let json = serde_json::to_string(&Criticality::Medium).unwrap();
        assert_eq!(json, "\"Média\"");
    }

    #[test]
    fn test_unknown_label_fails_deserialization() {
        let result: Result<Criticality, _> = serde_json::from_str("\"Crítica\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_label() {
        assert_eq!(Criticality::NotApplicable.to_string(), "Não Aplicável");
        assert_eq!(Criticality::High.to_string(), "Alta");
    }
}
