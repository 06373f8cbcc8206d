//! Book instance (copy) service

use std::collections::HashMap;
use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookInstance, BookInstanceData},
    repository::Repository,
};

/// A copy with the book it belongs to
#[derive(Debug, Clone)]
pub struct BookInstanceListing {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// A copy with its book and that book's author
#[derive(Debug, Clone)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    pub book: Option<Book>,
    pub author: Option<Author>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceListing>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances_list(),
            self.repository.books_list(),
        )?;
        let books: HashMap<Uuid, Book> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.book).cloned();
                BookInstanceListing { instance, book }
            })
            .collect())
    }

    /// Copy → book → author; each lookup needs the previous one's result
    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetail> {
        let instance = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book copy"))?;
        let book = self.repository.books_get(instance.book).await?;
        let author = match &book {
            Some(book) => self.repository.authors_get(book.author).await?,
            None => None,
        };
        Ok(BookInstanceDetail {
            instance,
            book,
            author,
        })
    }

    pub async fn find_listing(&self, id: Uuid) -> AppResult<Option<BookInstanceListing>> {
        let Some(instance) = self.repository.book_instances_get(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books_get(instance.book).await?;
        Ok(Some(BookInstanceListing { instance, book }))
    }

    /// Reference list for the book selector
    pub async fn book_choices(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    /// A copy to edit along with the book reference list
    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstance, Vec<Book>)> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances_get(id),
            self.repository.books_list(),
        )?;
        let instance = instance.ok_or_else(|| AppError::not_found("Book copy"))?;
        Ok((instance, books))
    }

    pub async fn create(&self, data: BookInstanceData) -> AppResult<BookInstance> {
        let instance = self.repository.book_instances_create(data).await?;
        tracing::info!("Created book copy id={} of book id={}", instance.id, instance.book);
        Ok(instance)
    }

    pub async fn update(&self, id: Uuid, data: BookInstanceData) -> AppResult<BookInstance> {
        let instance = self.repository.book_instances_update(id, data).await?;
        tracing::info!("Updated book copy id={}", id);
        Ok(instance)
    }

    /// Copies have no dependents, so this never blocks
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookInstanceListing>> {
        if self.repository.book_instances_delete(id).await? {
            tracing::info!("Deleted book copy id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
