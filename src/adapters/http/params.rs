//! Path and query parameter parsing shared by the endpoint modules.
//!
//! Values arrive as strings so malformed input yields the JSON error body
//! instead of axum's plain-text rejection.

use std::str::FromStr;

use axum::response::Response;
use chrono::NaiveDate;

use super::error::ErrorResponse;

/// Parses an id from a path segment.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, Response> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ErrorResponse::invalid_input(format!("Invalid {} id", what)))
}

/// Parses an optional id from a query value; blank counts as absent.
pub fn parse_optional_id<T: FromStr>(raw: Option<&str>, what: &str) -> Result<Option<T>, Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_id(raw, what).map(Some),
        None => Ok(None),
    }
}

/// Parses an optional `YYYY-MM-DD` date; blank counts as absent.
pub fn parse_optional_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>, Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ErrorResponse::invalid_input(format!("'{}' must be a date like 2024-05-20", field))
            }),
        None => Ok(None),
    }
}

/// Blank search strings count as no search.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ClassSessionId;
    use axum::http::StatusCode;

    #[test]
    fn parses_uuid_ids() {
        let id = ClassSessionId::new();
        let parsed: ClassSessionId = parse_id(&id.to_string(), "session").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn bad_id_is_400() {
        let err = parse_id::<ClassSessionId>("nope", "session").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_optional_values_are_absent() {
        assert_eq!(
            parse_optional_id::<ClassSessionId>(Some("  "), "class type").unwrap(),
            None
        );
        assert_eq!(parse_optional_date(Some(""), "date").unwrap(), None);
        assert_eq!(non_blank(Some("  ".to_string())), None);
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_optional_date(Some("2024-05-20"), "date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 20)
        );
        assert!(parse_optional_date(Some("20/05/2024"), "date").is_err());
    }
}
