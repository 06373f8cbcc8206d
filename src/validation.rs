//! Form sanitization and validation rules
//!
//! Submitted forms are trimmed, checked with the `validator` derive rules
//! declared on each form struct, then HTML-escaped. Rules therefore measure the
//! text as typed. Every failing rule contributes one [`FieldError`]; errors are
//! reported in form-field order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// A single field-level validation failure shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A form submission that can be cleaned and validated
pub trait SubmittedForm: Validate + Sized {
    /// Field names in the order they appear on the form
    const FIELDS: &'static [&'static str];

    /// Returns the form with surrounding whitespace stripped from every value
    fn trimmed(self) -> Self;

    /// Returns the form with every value HTML-escaped
    fn escaped(self) -> Self;
}

/// Trims `form`, validates the trimmed values, then escapes them.
///
/// The escaped form is always returned, so it is safe to render back to the
/// user when the error list is not empty.
pub fn sanitize_and_validate<F: SubmittedForm>(form: F) -> (F, Vec<FieldError>) {
    let form = form.trimmed();
    let errors = match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => collect_errors(&errors, F::FIELDS),
    };
    (form.escaped(), errors)
}

fn collect_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut ranked = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field = field.to_string();
        let rank = order.iter().position(|f| *f == field).unwrap_or(order.len());
        for error in field_errors.iter() {
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field.replace('_', " ")),
            };
            ranked.push((
                rank,
                FieldError {
                    field: field.clone(),
                    message,
                },
            ));
        }
    }
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, error)| error).collect()
}

/// Replaces markup-significant characters with HTML entities.
///
/// Unlike `tera::escape_html` this also encodes `\` and `` ` ``.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Owned copy of `value` without surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    // Blank values are reported by the required-length rule instead.
    if value.is_empty() || parse_id(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("identifier"))
    }
}

pub fn validate_identifiers(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| parse_id(v).is_some()) {
        Ok(())
    } else {
        Err(ValidationError::new("identifier"))
    }
}

/// Blank is accepted as "no date"; anything else must be an ISO-8601 date
pub fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso8601"))
    }
}

/// Parses an ISO-8601 date or timestamp, keeping its date part
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|timestamp| timestamp.date())
}

/// Parses an entity identifier
pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct NameForm {
        #[validate(
            length(min = 1, message = "Name must be specified."),
            custom(function = "validate_alphanumeric", message = "Name has non-alphanumeric characters.")
        )]
        name: String,
        #[validate(custom(function = "validate_optional_date", message = "Invalid date"))]
        born: String,
    }

    impl SubmittedForm for NameForm {
        const FIELDS: &'static [&'static str] = &["name", "born"];

        fn trimmed(self) -> Self {
            Self {
                name: trim(&self.name),
                born: trim(&self.born),
            }
        }

        fn escaped(self) -> Self {
            Self {
                name: escape(&self.name),
                born: escape(&self.born),
            }
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&'\"/\\`"), "a&lt;b&gt;&amp;&#x27;&quot;&#x2F;&#x5C;&#96;");
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim("  Tom & Jerry \n"), "Tom & Jerry");
    }

    #[test]
    fn test_alphanumeric() {
        assert!(validate_alphanumeric("Tolkien42").is_ok());
        assert!(validate_alphanumeric("").is_err());
        assert!(validate_alphanumeric("Le Guin").is_err());
        assert!(validate_alphanumeric("Brontë").is_err());
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(1892, 1, 3);
        assert_eq!(parse_date("1892-01-03"), expected);
        assert_eq!(parse_date("1892-01-03T10:00:00Z"), expected);
        assert_eq!(parse_date("1892-01-03T10:00"), expected);
        assert_eq!(parse_date("03/01/1892"), None);
        assert_eq!(parse_date("1892-13-03"), None);
    }

    #[test]
    fn test_optional_date() {
        assert!(validate_optional_date("").is_ok());
        assert!(validate_optional_date("2020-02-29").is_ok());
        assert!(validate_optional_date("2021-02-29").is_err());
    }

    #[test]
    fn test_identifiers() {
        let id = Uuid::now_v7().to_string();
        assert!(validate_identifier(&id).is_ok());
        assert!(validate_identifier("").is_ok());
        assert!(validate_identifier("not-an-id").is_err());
        assert!(validate_identifiers(&[id.clone(), id]).is_ok());
        assert!(validate_identifiers(&["nope".to_string()]).is_err());
        assert!(validate_identifiers(&[]).is_ok());
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let (form, errors) = sanitize_and_validate(NameForm {
            name: "  Ursula ".to_string(),
            born: " 1929-10-21 ".to_string(),
        });
        assert!(errors.is_empty());
        assert_eq!(form.name, "Ursula");
        assert_eq!(form.born, "1929-10-21");
    }

    #[test]
    fn test_failures_accumulate_in_field_order() {
        let (form, errors) = sanitize_and_validate(NameForm {
            name: "   ".to_string(),
            born: "yesterday".to_string(),
        });
        assert_eq!(form.name, "");
        assert_eq!(
            errors,
            vec![
                FieldError {
                    field: "name".to_string(),
                    message: "Name must be specified.".to_string()
                },
                FieldError {
                    field: "name".to_string(),
                    message: "Name has non-alphanumeric characters.".to_string()
                },
                FieldError {
                    field: "born".to_string(),
                    message: "Invalid date".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_sanitized_values_are_returned_on_failure() {
        let (form, errors) = sanitize_and_validate(NameForm {
            name: "<b>".to_string(),
            born: String::new(),
        });
        assert_eq!(form.name, "&lt;b&gt;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }
}
