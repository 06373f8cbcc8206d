//! Book instance (physical copy) model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{date_input, format_date, CATALOG_PREFIX};
use crate::validation::{
    escape, parse_date, parse_id, trim, validate_identifier, validate_optional_date,
    SubmittedForm,
};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookInstanceStatus::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// Stored copy document; `book` references a book document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    #[serde(default)]
    pub status: BookInstanceStatus,
    #[serde(default)]
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("{}/bookinstance/{}", CATALOG_PREFIX, self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.as_ref().map(format_date).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstanceData {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceData {
    pub fn into_instance(self, id: Uuid) -> BookInstance {
        BookInstance {
            id,
            book: self.book,
            imprint: self.imprint,
            status: self.status,
            due_back: self.due_back,
        }
    }
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookInstanceStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

/// Book instance create/update form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified."),
        custom(function = "validate_identifier", message = "Book selection is not valid.")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "validate_status", message = "Invalid status."))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date", message = "Invalid date"))]
    pub due_back: String,
}

impl SubmittedForm for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn trimmed(self) -> Self {
        Self {
            book: trim(&self.book),
            imprint: trim(&self.imprint),
            status: trim(&self.status),
            due_back: trim(&self.due_back),
        }
    }

    fn escaped(self) -> Self {
        Self {
            book: escape(&self.book),
            imprint: escape(&self.imprint),
            status: escape(&self.status),
            due_back: escape(&self.due_back),
        }
    }
}

impl BookInstanceForm {
    /// Converts a sanitized, validated form into stored fields
    pub fn to_data(&self) -> BookInstanceData {
        BookInstanceData {
            // Validation guarantees a well-formed identifier here.
            book: parse_id(&self.book).unwrap_or_default(),
            imprint: self.imprint.clone(),
            status: self.status.parse().unwrap_or_default(),
            due_back: parse_date(&self.due_back),
        }
    }

    pub fn is_book(&self, id: &Uuid) -> bool {
        parse_id(&self.book).as_ref() == Some(id)
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: date_input(&instance.due_back),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sanitize_and_validate;

    #[test]
    fn test_status_parsing() {
        assert_eq!("Loaned".parse::<BookInstanceStatus>(), Ok(BookInstanceStatus::Loaned));
        assert!("loaned".parse::<BookInstanceStatus>().is_err());
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
    }

    #[test]
    fn test_status_serializes_as_name() {
        let json = serde_json::to_value(BookInstanceStatus::Available).unwrap();
        assert_eq!(json, serde_json::json!("Available"));
    }

    #[test]
    fn test_blank_status_defaults_to_maintenance() {
        let (form, errors) = sanitize_and_validate(BookInstanceForm {
            book: Uuid::now_v7().to_string(),
            imprint: "Allen & Unwin, 1937".to_string(),
            status: String::new(),
            due_back: String::new(),
        });
        assert!(errors.is_empty(), "{:?}", errors);
        let data = form.to_data();
        assert_eq!(data.status, BookInstanceStatus::Maintenance);
        assert_eq!(data.imprint, "Allen &amp; Unwin, 1937");
        assert_eq!(data.due_back, None);
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let (_, errors) = sanitize_and_validate(BookInstanceForm {
            book: String::new(),
            imprint: "Penguin".to_string(),
            status: "Lost".to_string(),
            due_back: "tomorrow".to_string(),
        });
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Book must be specified.", "Invalid status.", "Invalid date"]
        );
    }

    #[test]
    fn test_due_back_formatted() {
        let instance = BookInstanceData {
            book: Uuid::now_v7(),
            imprint: "Penguin".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2026, 10, 19),
        }
        .into_instance(Uuid::now_v7());
        assert_eq!(instance.due_back_formatted(), "Oct 19, 2026");
        assert_eq!(BookInstanceForm::from(&instance).due_back, "2026-10-19");
    }
}
