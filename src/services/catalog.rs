//! Catalog-wide queries for the home page and health checks

use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::Repository,
};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.repository.books_count(),
            self.repository.book_instances_count(),
            self.repository
                .book_instances_count_by_status(BookInstanceStatus::Available),
            self.repository.authors_count(),
            self.repository.genres_count(),
        )?;
        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    /// Checks that the document store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
