//! Genre domain methods on Repository

use uuid::Uuid;

use super::{Filter, Repository, GENRES};
use crate::{
    error::{AppError, AppResult},
    models::genre::{Genre, GenreData},
};

impl Repository {
    /// List all genres ordered by name
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        self.find_docs(GENRES, Filter::All, Some("name")).await
    }

    pub async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.get_doc(GENRES, id).await
    }

    /// Resolve a set of genre references, skipping dangling ones
    pub async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_docs(GENRES, Filter::Ids(ids.to_vec()), Some("name")).await
    }

    /// Find a genre by exact name
    pub async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let mut found: Vec<Genre> = self
            .find_docs(GENRES, Filter::Eq("name", name.to_string()), None)
            .await?;
        Ok(if found.is_empty() { None } else { Some(found.swap_remove(0)) })
    }

    pub async fn genres_create(&self, data: GenreData) -> AppResult<Genre> {
        let id = self.insert_doc(GENRES, &data).await?;
        Ok(data.into_genre(id))
    }

    pub async fn genres_update(&self, id: Uuid, data: GenreData) -> AppResult<Genre> {
        if !self.replace_doc(GENRES, id, &data).await? {
            return Err(AppError::not_found("Genre"));
        }
        Ok(data.into_genre(id))
    }

    pub async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        self.remove_doc(GENRES, id).await
    }

    pub async fn genres_count(&self) -> AppResult<i64> {
        self.count_docs(GENRES, Filter::All).await
    }
}
