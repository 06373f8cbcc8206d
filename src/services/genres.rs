//! Genre service

use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreData},
    repository::Repository,
};

/// A genre with the books tagged with it
#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres_list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.repository
            .genres_get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Genre"))
    }

    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        Ok(genre.map(|genre| GenreDetail { genre, books }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Genre"))
    }

    /// Create a genre, or return the existing one with the same name.
    ///
    /// The name check is a lookup before insert, so two concurrent requests can
    /// still both insert.
    pub async fn create(&self, data: GenreData) -> AppResult<Genre> {
        if let Some(existing) = self.repository.genres_find_by_name(&data.name).await? {
            tracing::info!("Genre '{}' already exists as id={}", existing.name, existing.id);
            return Ok(existing);
        }
        let genre = self.repository.genres_create(data).await?;
        tracing::info!("Created genre id={} ({})", genre.id, genre.name);
        Ok(genre)
    }

    pub async fn update(&self, id: Uuid, data: GenreData) -> AppResult<Genre> {
        let genre = self.repository.genres_update(id, data).await?;
        tracing::info!("Updated genre id={}", id);
        Ok(genre)
    }

    /// Delete a genre unless books are still tagged with it
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDetail>> {
        let Some(detail) = self.find_detail(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.books.is_empty() {
            tracing::warn!(
                "Refusing to delete genre id={}: {} book(s) reference it",
                id,
                detail.books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }
        self.repository.genres_delete(id).await?;
        tracing::info!("Deleted genre id={}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
