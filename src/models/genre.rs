//! Genre model and form

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::CATALOG_PREFIX;
use crate::validation::{escape, trim, SubmittedForm};

/// Stored genre document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("{}/genre/{}", CATALOG_PREFIX, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreData {
    pub name: String,
}

impl GenreData {
    pub fn into_genre(self, id: Uuid) -> Genre {
        Genre {
            id,
            name: self.name,
        }
    }
}

/// Genre create/update form; the same rule applies to both
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Genre name must contain between 3 and 100 characters."
    ))]
    pub name: String,
}

impl SubmittedForm for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn trimmed(self) -> Self {
        Self {
            name: trim(&self.name),
        }
    }

    fn escaped(self) -> Self {
        Self {
            name: escape(&self.name),
        }
    }
}

impl GenreForm {
    pub fn to_data(&self) -> GenreData {
        GenreData {
            name: self.name.clone(),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sanitize_and_validate;

    fn check(name: &str) -> usize {
        let (_, errors) = sanitize_and_validate(GenreForm {
            name: name.to_string(),
        });
        errors.len()
    }

    #[test]
    fn test_name_length() {
        assert_eq!(check("Fantasy"), 0);
        assert_eq!(check("Art"), 0);
        assert_eq!(check("  SF  "), 1);
        assert_eq!(check(""), 1);
        assert_eq!(check(&"x".repeat(101)), 1);
    }

    #[test]
    fn test_name_is_escaped() {
        let (form, errors) = sanitize_and_validate(GenreForm {
            name: " Sword & Sorcery ".to_string(),
        });
        assert!(errors.is_empty());
        assert_eq!(form.to_data().name, "Sword &amp; Sorcery");
    }

    #[test]
    fn test_length_counts_typed_characters() {
        assert_eq!(check("<>"), 1);
        assert_eq!(check("&"), 1);

        let name = format!("{}&", "x".repeat(99));
        let (form, errors) = sanitize_and_validate(GenreForm { name });
        assert!(errors.is_empty());
        assert_eq!(form.name, format!("{}&amp;", "x".repeat(99)));
    }
}
