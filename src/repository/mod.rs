//! Repository layer for document storage
//!
//! Entities are persisted as JSON documents grouped in named collections. The
//! [`DocumentStore`] trait is the seam between the typed catalog operations in
//! this module and the two storage backends: PostgreSQL (JSONB) for deployments
//! and a process-local store for tests and demos.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub const AUTHORS: &str = "authors";
pub const GENRES: &str = "genres";
pub const BOOKS: &str = "books";
pub const BOOK_INSTANCES: &str = "bookinstances";

/// Document selection criteria
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    /// Top-level string field equals the value
    Eq(&'static str, String),
    /// Top-level array field contains the string value
    Contains(&'static str, String),
    /// Document identifier is one of the given ids
    Ids(Vec<Uuid>),
}

/// Storage backend holding JSON documents by collection.
///
/// Stored bodies always carry their own `"id"` member, set by the store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `body` as a new document and returns the identifier assigned to it
    async fn insert(&self, collection: &str, body: Value) -> AppResult<Uuid>;

    async fn get(&self, collection: &str, id: Uuid) -> AppResult<Option<Value>>;

    /// Returns the matching documents, ordered by the `sort_by` string field
    /// (byte order, ties broken by id) or by id when no field is given
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort_by: Option<&str>,
    ) -> AppResult<Vec<Value>>;

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<i64>;

    /// Replaces the whole body of an existing document; false if it does not exist
    async fn replace(&self, collection: &str, id: Uuid, body: Value) -> AppResult<bool>;

    /// Removes a document; false if it did not exist
    async fn remove(&self, collection: &str, id: Uuid) -> AppResult<bool>;

    /// Checks that the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Sets the `id` member of a document body
pub(crate) fn with_id(body: Value, id: Uuid) -> AppResult<Value> {
    match body {
        Value::Object(mut map) => {
            map.insert("id".to_string(), Value::String(id.to_string()));
            Ok(Value::Object(map))
        }
        _ => Err(AppError::Store("document body must be a JSON object".to_string())),
    }
}

/// Typed catalog access over a shared store handle
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Repository over a fresh, empty in-memory store
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Opens the store described by `config`, running migrations for PostgreSQL
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.is_memory() {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            return Ok(Self::memory());
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations completed");

        Ok(Self::new(Arc::new(PgStore::new(pool))))
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    async fn find_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Filter,
        sort_by: Option<&str>,
    ) -> AppResult<Vec<T>> {
        self.store
            .find(collection, &filter, sort_by)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(AppError::from))
            .collect()
    }

    async fn get_doc<T: DeserializeOwned>(&self, collection: &str, id: Uuid) -> AppResult<Option<T>> {
        match self.store.get(collection, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    async fn insert_doc<T: Serialize>(&self, collection: &str, data: &T) -> AppResult<Uuid> {
        self.store.insert(collection, serde_json::to_value(data)?).await
    }

    async fn replace_doc<T: Serialize>(&self, collection: &str, id: Uuid, data: &T) -> AppResult<bool> {
        self.store.replace(collection, id, serde_json::to_value(data)?).await
    }

    async fn remove_doc(&self, collection: &str, id: Uuid) -> AppResult<bool> {
        self.store.remove(collection, id).await
    }

    async fn count_docs(&self, collection: &str, filter: Filter) -> AppResult<i64> {
        self.store.count(collection, &filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_id() {
        let id = Uuid::now_v7();
        let doc = with_id(json!({"name": "Poetry"}), id).unwrap();
        assert_eq!(doc["id"], json!(id.to_string()));
        assert_eq!(doc["name"], json!("Poetry"));
    }

    #[test]
    fn test_with_id_rejects_non_objects() {
        assert!(with_id(json!(["Poetry"]), Uuid::now_v7()).is_err());
    }
}
