// src/entity/status.rs
use serde::{Deserialize, Serialize};

/// Substring that marks a status as outdated. Dated suffixes are allowed,
/// e.g. "Desatualizado desde 06/08/24".
pub const OUTDATED_MARKER: &str = "Desatualizado";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusKind {
    Updated,
    Outdated,
    InReview,
    Discontinued,
    NoOwner,
    NoPermission,
    NotFound,
    /// Any label outside the known vocabulary, kept verbatim.
    Other,
}

impl StatusKind {
    pub const ALL: [StatusKind; 8] = [
        StatusKind::Updated,
        StatusKind::Outdated,
        StatusKind::InReview,
        StatusKind::Discontinued,
        StatusKind::NoOwner,
        StatusKind::NoPermission,
        StatusKind::NotFound,
        StatusKind::Other,
    ];

    /// Canonical label as stored in documents.
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Updated => "Atualizado",
            StatusKind::Outdated => OUTDATED_MARKER,
            StatusKind::InReview => "Em revisão",
            StatusKind::Discontinued => "Descontinuado",
            StatusKind::NoOwner => "Sem responsável",
            StatusKind::NoPermission => "Sem permissão",
            StatusKind::NotFound => "Não encontrado",
            StatusKind::Other => "Outro",
        }
    }

    /// Exact-label match; surrounding whitespace makes the label `Other`.
    fn classify(text: &str) -> Self {
        if text.contains(OUTDATED_MARKER) {
            return StatusKind::Outdated;
        }
        match text {
            "Atualizado" => StatusKind::Updated,
            "Em revisão" => StatusKind::InReview,
            "Descontinuado" => StatusKind::Discontinued,
            "Sem responsável" => StatusKind::NoOwner,
            "Sem permissão" => StatusKind::NoPermission,
            "Não encontrado" => StatusKind::NotFound,
            _ => StatusKind::Other,
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The three status groups the dashboard counts and filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Updated,
    Outdated,
    Discontinued,
}

impl StatusCategory {
    /// Fixed order used for range selection.
    pub const ORDER: [StatusCategory; 3] = [
        StatusCategory::Updated,
        StatusCategory::Outdated,
        StatusCategory::Discontinued,
    ];
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCategory::Updated => write!(f, "updated"),
            StatusCategory::Outdated => write!(f, "outdated"),
            StatusCategory::Discontinued => write!(f, "discontinued"),
        }
    }
}

impl std::str::FromStr for StatusCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "updated" | "atualizado" => Ok(StatusCategory::Updated),
            "outdated" | "desatualizado" => Ok(StatusCategory::Outdated),
            "discontinued" | "descontinuado" => Ok(StatusCategory::Discontinued),
            _ => Err(format!("Invalid status category: {}", s)),
        }
    }
}

/// A BI or page status: the verbatim label plus the kind derived from it.
///
/// Serializes as the plain label so stored documents keep their exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Status {
    kind: StatusKind,
    text: String,
}

impl Status {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: StatusKind::classify(&text),
            text,
        }
    }

    pub fn updated() -> Self {
        Self::parse(StatusKind::Updated.label())
    }

    pub fn discontinued() -> Self {
        Self::parse(StatusKind::Discontinued.label())
    }

    /// Build an outdated status, optionally with a free-text suffix.
    pub fn outdated(detail: Option<&str>) -> Self {
        match detail.map(str::trim).filter(|d| !d.is_empty()) {
            Some(detail) => Self::parse(format!("{} {}", OUTDATED_MARKER, detail)),
            None => Self::parse(OUTDATED_MARKER),
        }
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_updated(&self) -> bool {
        self.kind == StatusKind::Updated
    }

    pub fn is_outdated(&self) -> bool {
        self.kind == StatusKind::Outdated
    }

    pub fn is_discontinued(&self) -> bool {
        self.kind == StatusKind::Discontinued
    }

    pub fn category(&self) -> Option<StatusCategory> {
        match self.kind {
            StatusKind::Updated => Some(StatusCategory::Updated),
            StatusKind::Outdated => Some(StatusCategory::Outdated),
            StatusKind::Discontinued => Some(StatusCategory::Discontinued),
            _ => None,
        }
    }

    /// Free text after the outdated marker ("desde 06/08/24").
    pub fn detail(&self) -> Option<&str> {
        if self.kind != StatusKind::Outdated {
            return None;
        }
        let (_, rest) = self.text.split_once(OUTDATED_MARKER)?;
        let rest = rest.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::updated()
    }
}

impl From<String> for Status {
    fn from(text: String) -> Self {
        Status::parse(text)
    }
}

impl From<&str> for Status {
    fn from(text: &str) -> Self {
        Status::parse(text)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.text
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    /// Accepts the Portuguese labels verbatim plus short English aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Status cannot be empty".to_string());
        }
        let status = match trimmed.to_lowercase().replace('-', "_").as_str() {
            "updated" => Status::updated(),
            "outdated" => Status::outdated(None),
            "in_review" | "review" => Status::parse(StatusKind::InReview.label()),
            "discontinued" => Status::discontinued(),
            "no_owner" => Status::parse(StatusKind::NoOwner.label()),
            "no_permission" => Status::parse(StatusKind::NoPermission.label()),
            "not_found" => Status::parse(StatusKind::NotFound.label()),
            _ => Status::parse(trimmed),
        };
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_classify() {
        assert_eq!(Status::parse("Atualizado").kind(), StatusKind::Updated);
        assert_eq!(Status::parse("Em revisão").kind(), StatusKind::InReview);
        assert_eq!(Status::parse("Descontinuado").kind(), StatusKind::Discontinued);
        assert_eq!(Status::parse("Sem responsável").kind(), StatusKind::NoOwner);
        assert_eq!(Status::parse("Sem permissão").kind(), StatusKind::NoPermission);
        assert_eq!(Status::parse("Não encontrado").kind(), StatusKind::NotFound);
    }

    #[test]
    fn test_outdated_is_substring_match() {
        let status = Status::parse("Desatualizado desde 06/08/24");
        assert!(status.is_outdated());
        assert_eq!(status.detail(), Some("desde 06/08/24"));
        assert_eq!(status.category(), Some(StatusCategory::Outdated));

        let bare = Status::parse("Desatualizado");
        assert!(bare.is_outdated());
        assert_eq!(bare.detail(), None);
    }

    #[test]
    fn test_padded_label_is_not_updated() {
        let padded = Status::parse(" Atualizado ");
        assert_eq!(padded.kind(), StatusKind::Other);
        assert!(!padded.is_updated());
        assert_eq!(padded.as_str(), " Atualizado ");

        let typed: Status = " Atualizado ".parse().unwrap();
        assert!(typed.is_updated());
    }

    #[test]
    fn test_unknown_label_is_kept_verbatim() {
        let status = Status::parse("Em migração");
        assert_eq!(status.kind(), StatusKind::Other);
        assert_eq!(status.as_str(), "Em migração");
        assert_eq!(status.category(), None);
    }

    #[test]
    fn test_serializes_as_plain_label() {
        let status = Status::outdated(Some("desde 01/01"));
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"Desatualizado desde 01/01\"");

        let parsed: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }

    #[test]
    fn test_from_str_aliases() {
        assert!("updated".parse::<Status>().unwrap().is_updated());
        assert!("outdated".parse::<Status>().unwrap().is_outdated());
        assert_eq!(
            "in-review".parse::<Status>().unwrap().kind(),
            StatusKind::InReview
        );
        assert_eq!(
            "Desatualizado desde 02/03".parse::<Status>().unwrap().detail(),
            Some("desde 02/03")
        );
        assert!("  ".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_category_from_str() {
        assert_eq!("outdated".parse::<StatusCategory>(), Ok(StatusCategory::Outdated));
        assert_eq!("Atualizado".parse::<StatusCategory>(), Ok(StatusCategory::Updated));
        assert!("review".parse::<StatusCategory>().is_err());
    }
}
