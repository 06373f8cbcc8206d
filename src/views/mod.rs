//! Page templates and the view models rendered into them
//!
//! Templates are compiled into the binary and registered once at startup.
//! Stored text is escaped when a form is sanitized, so autoescaping is turned
//! off here to avoid escaping it a second time.

use axum::response::Html;
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{format_date, Author, Book, BookInstance, Genre},
};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("author_list.html", include_str!("../../templates/author_list.html")),
    ("author_detail.html", include_str!("../../templates/author_detail.html")),
    ("author_form.html", include_str!("../../templates/author_form.html")),
    ("author_delete.html", include_str!("../../templates/author_delete.html")),
    ("genre_list.html", include_str!("../../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../../templates/genre_delete.html")),
    ("book_list.html", include_str!("../../templates/book_list.html")),
    ("book_detail.html", include_str!("../../templates/book_detail.html")),
    ("book_form.html", include_str!("../../templates/book_form.html")),
    ("book_delete.html", include_str!("../../templates/book_delete.html")),
    ("bookinstance_list.html", include_str!("../../templates/bookinstance_list.html")),
    ("bookinstance_detail.html", include_str!("../../templates/bookinstance_detail.html")),
    ("bookinstance_form.html", include_str!("../../templates/bookinstance_form.html")),
    ("bookinstance_delete.html", include_str!("../../templates/bookinstance_delete.html")),
];

/// Compiled template registry, cheap to clone
#[derive(Clone)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera: Arc::new(tera) })
    }

    /// Renders a whole page before anything is sent to the client
    pub fn render(&self, name: &str, context: &Context) -> AppResult<Html<String>> {
        Ok(Html(self.tera.render(name, context)?))
    }
}

/// Starts a page context with its title set
pub fn page(title: &str) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub lifespan: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            url: author.url(),
            name: author.name(),
            lifespan: author.lifespan(),
            date_of_birth: author.date_of_birth.as_ref().map(format_date).unwrap_or_default(),
            date_of_death: author.date_of_death.as_ref().map(format_date).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: Uuid,
    pub url: String,
    pub name: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            url: genre.url(),
            name: genre.name.clone(),
        }
    }
}

/// A book with its author's display fields; blank when the author is gone
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_name: String,
    pub author_url: String,
}

impl BookView {
    pub fn new(book: &Book, author: Option<&Author>) -> Self {
        Self {
            id: book.id,
            url: book.url(),
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            author_name: author.map(Author::name).unwrap_or_default(),
            author_url: author.map(Author::url).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub url: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
    pub book_title: String,
    pub book_url: String,
}

impl BookInstanceView {
    pub fn new(instance: &BookInstance, book: Option<&Book>) -> Self {
        Self {
            id: instance.id,
            url: instance.url(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance.due_back_formatted(),
            book_title: book.map(|b| b.title.clone()).unwrap_or_default(),
            book_url: book.map(Book::url).unwrap_or_default(),
        }
    }
}

/// One `<option>` or checkbox of a relationship selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl ToString, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
            selected,
        }
    }
}
