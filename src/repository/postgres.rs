//! PostgreSQL document store (one JSONB table for every collection)

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{with_id, DocumentStore, Filter};
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Appends the `WHERE` clause selecting `filter` within `collection`
fn push_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, collection: &'a str, filter: &'a Filter) {
    builder.push(" WHERE collection = ").push_bind(collection);
    match filter {
        Filter::All => {}
        Filter::Eq(field, value) => {
            builder
                .push(" AND body ->> ")
                .push_bind(*field)
                .push(" = ")
                .push_bind(value.as_str());
        }
        Filter::Contains(field, value) => {
            builder
                .push(" AND (body -> ")
                .push_bind(*field)
                .push(") ? ")
                .push_bind(value.as_str());
        }
        Filter::Ids(ids) => {
            builder.push(" AND id = ANY(").push_bind(ids.as_slice()).push(")");
        }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, collection: &str, body: Value) -> AppResult<Uuid> {
        let id = Uuid::now_v7();
        let body = with_id(body, id)?;
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get(&self, collection: &str, id: Uuid) -> AppResult<Option<Value>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(body)| body))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort_by: Option<&str>,
    ) -> AppResult<Vec<Value>> {
        let mut builder = QueryBuilder::new("SELECT body FROM documents");
        push_filter(&mut builder, collection, filter);
        match sort_by {
            // "C" collation gives plain byte-order comparison.
            Some(field) => {
                builder
                    .push(" ORDER BY body ->> ")
                    .push_bind(field)
                    .push(r#" COLLATE "C", id"#);
            }
            None => {
                builder.push(" ORDER BY id");
            }
        }

        let rows = builder
            .build_query_scalar::<Json<Value>>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(body)| body).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM documents");
        push_filter(&mut builder, collection, filter);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn replace(&self, collection: &str, id: Uuid, body: Value) -> AppResult<bool> {
        let body = with_id(body, id)?;
        let result = sqlx::query(
            r#"
            UPDATE documents SET body = $3, modif_date = NOW()
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(body))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, collection: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Runs against a live database: `DATABASE_URL=... cargo test -- --ignored`
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        PgStore::new(pool)
    }

    #[tokio::test]
    #[ignore]
    async fn test_round_trip() {
        let store = store().await;
        let collection = format!("test_{}", Uuid::now_v7().simple());

        let b = store.insert(&collection, json!({"name": "beta", "tags": ["x"]})).await.unwrap();
        let a = store.insert(&collection, json!({"name": "alpha", "tags": []})).await.unwrap();

        let sorted = store.find(&collection, &Filter::All, Some("name")).await.unwrap();
        assert_eq!(sorted[0]["id"], json!(a.to_string()));
        assert_eq!(sorted[1]["id"], json!(b.to_string()));

        let tagged = store
            .find(&collection, &Filter::Contains("tags", "x".to_string()), None)
            .await
            .unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(
            store.count(&collection, &Filter::Eq("name", "alpha".to_string())).await.unwrap(),
            1
        );
        assert_eq!(store.count(&collection, &Filter::Ids(vec![a, b])).await.unwrap(), 2);

        assert!(store.replace(&collection, a, json!({"name": "gamma"})).await.unwrap());
        assert_eq!(store.get(&collection, a).await.unwrap().unwrap()["name"], json!("gamma"));

        assert!(store.remove(&collection, a).await.unwrap());
        assert!(store.remove(&collection, b).await.unwrap());
        assert!(store.get(&collection, a).await.unwrap().is_none());
    }
}
