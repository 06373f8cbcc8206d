//! Author model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{date_input, format_date, CATALOG_PREFIX};
use crate::validation::{
    escape, parse_date, trim, validate_alphanumeric, validate_optional_date, SubmittedForm,
};

/// Stored author document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        let birth = self.date_of_birth.as_ref().map(format_date).unwrap_or_default();
        let death = self.date_of_death.as_ref().map(format_date).unwrap_or_default();
        format!("{} - {}", birth, death).trim().to_string()
    }

    pub fn url(&self) -> String {
        format!("{}/author/{}", CATALOG_PREFIX, self.id)
    }
}

/// Author fields without the store-assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorData {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Author create/update form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(
            function = "validate_alphanumeric",
            message = "First name has non-alphanumeric characters."
        )
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(
            function = "validate_alphanumeric",
            message = "Family name has non-alphanumeric characters."
        )
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date", message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date", message = "Invalid date of death"))]
    pub date_of_death: String,
}

impl SubmittedForm for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn trimmed(self) -> Self {
        Self {
            first_name: trim(&self.first_name),
            family_name: trim(&self.family_name),
            date_of_birth: trim(&self.date_of_birth),
            date_of_death: trim(&self.date_of_death),
        }
    }

    fn escaped(self) -> Self {
        Self {
            first_name: escape(&self.first_name),
            family_name: escape(&self.family_name),
            date_of_birth: escape(&self.date_of_birth),
            date_of_death: escape(&self.date_of_death),
        }
    }
}

impl AuthorForm {
    /// Converts a sanitized, validated form into stored fields
    pub fn to_data(&self) -> AuthorData {
        AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: parse_date(&self.date_of_birth),
            date_of_death: parse_date(&self.date_of_death),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: date_input(&author.date_of_birth),
            date_of_death: date_input(&author.date_of_death),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sanitize_and_validate;

    fn author(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Author {
        Author {
            id: Uuid::now_v7(),
            first_name: "John".to_string(),
            family_name: "Tolkien".to_string(),
            date_of_birth: birth,
            date_of_death: death,
        }
    }

    #[test]
    fn test_name() {
        let mut a = author(None, None);
        assert_eq!(a.name(), "Tolkien, John");
        a.first_name.clear();
        assert_eq!(a.name(), "");
    }

    #[test]
    fn test_lifespan() {
        let birth = NaiveDate::from_ymd_opt(1892, 1, 3);
        let death = NaiveDate::from_ymd_opt(1973, 9, 2);
        assert_eq!(author(birth, death).lifespan(), "Jan 3, 1892 - Sep 2, 1973");
        assert_eq!(author(birth, None).lifespan(), "Jan 3, 1892 -");
        assert_eq!(author(None, death).lifespan(), "- Sep 2, 1973");
        assert_eq!(author(None, None).lifespan(), "");
    }

    #[test]
    fn test_url() {
        let a = author(None, None);
        assert_eq!(a.url(), format!("/catalog/author/{}", a.id));
    }

    #[test]
    fn test_form_round_trips_through_data() {
        let (form, errors) = sanitize_and_validate(AuthorForm {
            first_name: " Isaac ".to_string(),
            family_name: "Asimov".to_string(),
            date_of_birth: "1920-01-02".to_string(),
            date_of_death: String::new(),
        });
        assert!(errors.is_empty());
        let data = form.to_data();
        assert_eq!(data.first_name, "Isaac");
        assert_eq!(data.date_of_birth, NaiveDate::from_ymd_opt(1920, 1, 2));
        assert_eq!(data.date_of_death, None);

        let stored = data.into_author(Uuid::now_v7());
        let back = AuthorForm::from(&stored);
        assert_eq!(back.date_of_birth, "1920-01-02");
        assert_eq!(back.date_of_death, "");
    }

    #[test]
    fn test_form_rejects_punctuation_and_bad_dates() {
        let (_, errors) = sanitize_and_validate(AuthorForm {
            first_name: "Ursula K.".to_string(),
            family_name: String::new(),
            date_of_birth: "someday".to_string(),
            date_of_death: String::new(),
        });
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["first_name", "family_name", "family_name", "date_of_birth"]
        );
        assert_eq!(errors[3].message, "Invalid date of birth");
    }

    #[test]
    fn test_rejected_dates_come_back_escaped() {
        let (form, errors) = sanitize_and_validate(AuthorForm {
            first_name: "Mary".to_string(),
            family_name: "Shelley".to_string(),
            date_of_birth: "\"><script>alert(1)</script>".to_string(),
            date_of_death: String::new(),
        });
        assert_eq!(errors.len(), 1);
        assert!(!form.date_of_birth.contains('<'));
        assert!(!form.date_of_birth.contains('"'));
    }
}
