//! Book domain methods on Repository

use uuid::Uuid;

use super::{Filter, Repository, BOOKS};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookData},
};

impl Repository {
    /// List all books ordered by title
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        self.find_docs(BOOKS, Filter::All, Some("title")).await
    }

    pub async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.get_doc(BOOKS, id).await
    }

    /// Books written by an author
    pub async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.find_docs(BOOKS, Filter::Eq("author", author_id.to_string()), Some("title"))
            .await
    }

    /// Books tagged with a genre
    pub async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.find_docs(BOOKS, Filter::Contains("genre", genre_id.to_string()), Some("title"))
            .await
    }

    pub async fn books_create(&self, data: BookData) -> AppResult<Book> {
        let id = self.insert_doc(BOOKS, &data).await?;
        Ok(data.into_book(id))
    }

    pub async fn books_update(&self, id: Uuid, data: BookData) -> AppResult<Book> {
        if !self.replace_doc(BOOKS, id, &data).await? {
            return Err(AppError::not_found("Book"));
        }
        Ok(data.into_book(id))
    }

    pub async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove_doc(BOOKS, id).await
    }

    pub async fn books_count(&self) -> AppResult<i64> {
        self.count_docs(BOOKS, Filter::All).await
    }
}
