//! Author service

use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorData, Book},
    repository::Repository,
};

/// An author with the books referencing it
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository
            .authors_get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Author"))
    }

    /// Author and their books, fetched concurrently
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        Ok(author.map(|author| AuthorDetail { author, books }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Author"))
    }

    pub async fn create(&self, data: AuthorData) -> AppResult<Author> {
        let author = self.repository.authors_create(data).await?;
        tracing::info!("Created author id={} ({})", author.id, author.name());
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, data: AuthorData) -> AppResult<Author> {
        let author = self.repository.authors_update(id, data).await?;
        tracing::info!("Updated author id={}", id);
        Ok(author)
    }

    /// Delete an author unless books still reference them
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDetail>> {
        let Some(detail) = self.find_detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.books.is_empty() {
            tracing::warn!(
                "Refusing to delete author id={}: {} book(s) reference it",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }
        self.repository.authors_delete(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
