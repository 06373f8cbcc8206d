//! Book model and form

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::CATALOG_PREFIX;
use crate::validation::{
    escape, parse_id, trim, validate_identifier, validate_identifiers, SubmittedForm,
};

/// Stored book document; `author` and `genre` reference other documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("{}/book/{}", CATALOG_PREFIX, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl BookData {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            summary: self.summary,
            isbn: self.isbn,
            genre: self.genre,
        }
    }
}

/// Book create/update form.
///
/// `genre` is repeatable in the submitted body; a single value or no value at
/// all both decode into a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Author must not be empty."),
        custom(function = "validate_identifier", message = "Author selection is not valid.")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = "validate_identifiers", message = "Genre selection is not valid."))]
    pub genre: Vec<String>,
}

impl SubmittedForm for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn trimmed(self) -> Self {
        Self {
            title: trim(&self.title),
            author: trim(&self.author),
            summary: trim(&self.summary),
            isbn: trim(&self.isbn),
            genre: self.genre.iter().map(|g| trim(g)).collect(),
        }
    }

    fn escaped(self) -> Self {
        Self {
            title: escape(&self.title),
            author: escape(&self.author),
            summary: escape(&self.summary),
            isbn: escape(&self.isbn),
            genre: self.genre.iter().map(|g| escape(g)).collect(),
        }
    }
}

impl BookForm {
    /// Converts a sanitized, validated form into stored fields
    pub fn to_data(&self) -> BookData {
        BookData {
            title: self.title.clone(),
            // Validation guarantees a well-formed identifier here.
            author: parse_id(&self.author).unwrap_or_default(),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.iter().filter_map(|g| parse_id(g)).collect(),
        }
    }

    pub fn is_author(&self, id: &Uuid) -> bool {
        parse_id(&self.author).as_ref() == Some(id)
    }

    pub fn has_genre(&self, id: &Uuid) -> bool {
        self.genre.iter().any(|g| parse_id(g).as_ref() == Some(id))
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre.iter().map(Uuid::to_string).collect(),
        }
    }
}
