//! Book service

use std::collections::HashMap;
use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookData, BookInstance, Genre},
    repository::Repository,
};

/// A book with its author resolved, as shown in listings
#[derive(Debug, Clone)]
pub struct BookListing {
    pub book: Book,
    pub author: Option<Author>,
}

/// A book with every relationship resolved
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Reference lists for the book form selectors
#[derive(Debug, Clone)]
pub struct BookFormChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books by title, each with its author
    pub async fn list(&self) -> AppResult<Vec<BookListing>> {
        let (books, authors) = tokio::try_join!(
            self.repository.books_list(),
            self.repository.authors_list(),
        )?;
        let authors: HashMap<Uuid, Author> = authors.into_iter().map(|a| (a.id, a)).collect();
        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author).cloned();
                BookListing { book, author }
            })
            .collect())
    }

    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let Some(book) = book else {
            return Ok(None);
        };
        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_get_many(&book.genre),
        )?;
        Ok(Some(BookDetail {
            book,
            author,
            genres,
            instances,
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book"))
    }

    pub async fn form_choices(&self) -> AppResult<BookFormChoices> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        Ok(BookFormChoices { authors, genres })
    }

    /// A book to edit along with the form reference lists
    pub async fn edit(&self, id: Uuid) -> AppResult<(Book, BookFormChoices)> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let book = book.ok_or_else(|| AppError::not_found("Book"))?;
        Ok((book, BookFormChoices { authors, genres }))
    }

    pub async fn create(&self, data: BookData) -> AppResult<Book> {
        let book = self.repository.books_create(data).await?;
        tracing::info!("Created book id={} ({})", book.id, book.title);
        Ok(book)
    }

    pub async fn update(&self, id: Uuid, data: BookData) -> AppResult<Book> {
        let book = self.repository.books_update(id, data).await?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    /// Delete a book unless copies of it still exist
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDetail>> {
        let Some(detail) = self.find_detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.instances.is_empty() {
            tracing::warn!(
                "Refusing to delete book id={}: {} copy(ies) reference it",
                id,
                detail.instances.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }
        self.repository.books_delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
