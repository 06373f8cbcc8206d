//! In-memory document store

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{with_id, DocumentStore, Filter};
use crate::error::AppResult;

type Collection = BTreeMap<Uuid, Value>;

/// Process-local store; collections are created on first insert
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn string_field<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

fn matches(id: &Uuid, doc: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Eq(field, value) => string_field(doc, field) == Some(value.as_str()),
        Filter::Contains(field, value) => doc
            .get(*field)
            .and_then(Value::as_array)
            .map(|items| items.iter().any(|item| item.as_str() == Some(value.as_str())))
            .unwrap_or(false),
        Filter::Ids(ids) => ids.contains(id),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, body: Value) -> AppResult<Uuid> {
        let id = Uuid::now_v7();
        let body = with_id(body, id)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id, body);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: Uuid) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort_by: Option<&str>,
    ) -> AppResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        // BTreeMap iteration already yields id order.
        let mut found: Vec<(&Uuid, &Value)> =
            docs.iter().filter(|(id, doc)| matches(id, doc, filter)).collect();
        if let Some(field) = sort_by {
            found.sort_by(|(a_id, a), (b_id, b)| {
                let a_key = string_field(a, field).unwrap_or("");
                let b_key = string_field(b, field).unwrap_or("");
                a_key.cmp(b_key).then_with(|| a_id.cmp(b_id))
            });
        }
        Ok(found.into_iter().map(|(_, doc)| doc.clone()).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<i64> {
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|(id, doc)| matches(id, doc, filter)).count())
            .unwrap_or(0);
        Ok(count as i64)
    }

    async fn replace(&self, collection: &str, id: Uuid, body: Value) -> AppResult<bool> {
        let body = with_id(body, id)?;
        let mut collections = self.collections.write().await;
        match collections.get_mut(collection).and_then(|docs| docs.get_mut(&id)) {
            Some(doc) => {
                *doc = body;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, collection: &str, id: Uuid) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(&id))
            .is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
