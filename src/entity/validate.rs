// src/entity/validate.rs
//! Input normalization shared by the workspace and the import boundary.

use chrono::{DateTime, NaiveDate};

use crate::error::{BidashError, Result};

pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_URL_LENGTH: usize = 2048;

/// Trim a name and reject empty or oversized values.
pub fn normalize_name(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BidashError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(BidashError::validation(format!(
            "{} too long: {} characters (max {})",
            field,
            trimmed.chars().count(),
            MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalize a last-update date to `YYYY-MM-DD`.
///
/// Accepts ISO dates, `DD/MM/YYYY`, `DD-MM-YYYY` and RFC 3339 timestamps.
/// An empty value stays empty.
pub fn normalize_date(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive().format("%Y-%m-%d").to_string());
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }

    Err(BidashError::validation(format!(
        "Invalid date '{}'. Expected YYYY-MM-DD or DD/MM/YYYY",
        value
    )))
}

/// Check a report link. Only absolute http(s) URLs are accepted.
pub fn validate_url(url: &str) -> Result<()> {
    if url.len() > MAX_URL_LENGTH {
        return Err(BidashError::validation(format!(
            "URL exceeds maximum length of {}",
            MAX_URL_LENGTH
        )));
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    let valid = match rest {
        Some(host) => {
            !host.is_empty() && !host.starts_with('/') && !url.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(BidashError::validation(format!("Invalid URL: {}", url)));
    }
    Ok(())
}

/// Normalize an optional link: blank becomes `None`, anything else must be a URL.
pub fn normalize_link(value: Option<&str>) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => {
            validate_url(url)?;
            Ok(Some(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("name", "  Vendas  ").unwrap(), "Vendas");
    }

    #[test]
    fn test_normalize_name_rejects_blank() {
        let err = normalize_name("name", "   ").unwrap_err();
        assert!(matches!(err, BidashError::Validation(_)));
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn test_normalize_name_rejects_oversized() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(normalize_name("name", &long).is_err());
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2024-08-06").unwrap(), "2024-08-06");
        assert_eq!(normalize_date("06/08/2024").unwrap(), "2024-08-06");
        assert_eq!(normalize_date("06-08-2024").unwrap(), "2024-08-06");
        assert_eq!(
            normalize_date("2024-08-06T13:45:00Z").unwrap(),
            "2024-08-06"
        );
        assert_eq!(normalize_date("").unwrap(), "");
    }

    #[test]
    fn test_normalize_date_invalid() {
        assert!(normalize_date("ontem").is_err());
        assert!(normalize_date("2024-13-40").is_err());
        assert!(normalize_date("31/02/2024").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://app.powerbi.com/groups/me/reports/1").is_ok());
        assert!(validate_url("http://intranet/bi").is_ok());
        assert!(validate_url("ftp://files").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("https://has space").is_err());
        assert!(validate_url("relatorio").is_err());
    }

    #[test]
    fn test_normalize_link() {
        assert_eq!(normalize_link(None).unwrap(), None);
        assert_eq!(normalize_link(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_link(Some(" https://bi.example.com ")).unwrap(),
            Some("https://bi.example.com".to_string())
        );
        assert!(normalize_link(Some("bi.example.com")).is_err());
    }
}
