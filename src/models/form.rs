//! Sanitizers and validation helpers shared by the HTML forms
//!
//! Submitted fields are trimmed and HTML-escaped first, then checked
//! against the rules declared on each form struct with `validator`.
//! Failures come back as an ordered list of [`FieldError`]s so the form
//! can echo them in the order the fields appear on the page.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// A submitted HTML form
pub trait SubmittedForm: Validate + Sized {
    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// Trim and escape the free-text fields
    fn sanitize(self) -> Self;

    /// Sanitize, then run the declared rules
    fn sanitize_and_validate(self) -> (Self, Vec<FieldError>) {
        let form = self.sanitize();
        let errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_errors(Self::FIELDS, &errors),
        };
        (form, errors)
    }
}

/// Flatten `validator` errors into display order
pub fn collect_errors(fields: &'static [&'static str], errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();

    for field in fields {
        if let Some(list) = by_field.get(*field) {
            for err in list.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(FieldError { field: *field, message });
            }
        }
    }

    out
}

/// HTML-escape a value before it is stored or echoed back
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim, then escape
pub fn sanitize_text(input: &str) -> String {
    escape(input.trim())
}

/// Parse a calendar date: `YYYY-MM-DD`, or the date part of an RFC 3339
/// timestamp in its own offset.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Empty means "not provided"
pub fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_calendar_date(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("date");
    err.message = Some("Invalid date".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;&#x2F;b&gt;"
        );
        assert_eq!(escape("a\\b`c"), "a&#x5C;b&#96;c");
        assert_eq!(escape("Plain text"), "Plain text");
    }

    #[test]
    fn test_sanitize_trims_before_escaping() {
        assert_eq!(sanitize_text("   Mystery  "), "Mystery");
        assert_eq!(sanitize_text("  <i> "), "&lt;i&gt;");
        assert_eq!(sanitize_text("   "), "");
    }

    #[test]
    fn test_parse_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_calendar_date("2024-02-29"), Some(expected));
        assert_eq!(parse_calendar_date("2024-02-29T23:30:00-05:00"), Some(expected));
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date("29/02/2024"), None);
        assert_eq!(parse_calendar_date("soon"), None);
    }

    #[test]
    fn test_optional_date_rule() {
        assert!(validate_optional_date("").is_ok());
        assert!(validate_optional_date("2030-01-15").is_ok());
        let err = validate_optional_date("2030-13-01").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid date"));
    }
}
