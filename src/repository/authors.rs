//! Author domain methods on Repository

use uuid::Uuid;

use super::{Filter, Repository, AUTHORS};
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorData},
};

impl Repository {
    /// List all authors ordered by family name
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.find_docs(AUTHORS, Filter::All, Some("family_name")).await
    }

    pub async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.get_doc(AUTHORS, id).await
    }

    pub async fn authors_create(&self, data: AuthorData) -> AppResult<Author> {
        let id = self.insert_doc(AUTHORS, &data).await?;
        Ok(data.into_author(id))
    }

    /// Replace every field of an existing author
    pub async fn authors_update(&self, id: Uuid, data: AuthorData) -> AppResult<Author> {
        if !self.replace_doc(AUTHORS, id, &data).await? {
            return Err(AppError::not_found("Author"));
        }
        Ok(data.into_author(id))
    }

    pub async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove_doc(AUTHORS, id).await
    }

    pub async fn authors_count(&self) -> AppResult<i64> {
        self.count_docs(AUTHORS, Filter::All).await
    }
}
