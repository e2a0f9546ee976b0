//! SQLite document store
//!
//! One `documents` table holds every collection; bodies are JSON text.
//! Updates use SQLite's `json_patch`, so merge semantics match
//! [`MemoryStore`](super::MemoryStore).

use super::{DocumentStore, StoreError, StoreResult, WriteOp, strip_id, with_id};
use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::util::{new_document_id, now_millis};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePoolOptions,
    SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// Document store backed by a SQLite connection pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `url`, enable WAL and run migrations
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn parse_body(body: &str) -> StoreResult<Map<String, Value>> {
        Ok(serde_json::from_str(body)?)
    }

    async fn apply(conn: &mut SqliteConnection, op: WriteOp) -> StoreResult<()> {
        let now = now_millis();
        match op {
            WriteOp::Set {
                collection,
                id,
                data,
            } => {
                let body = serde_json::to_string(&strip_id(data)?)?;
                sqlx::query(
                    "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) \
                     ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                )
                .bind(&collection)
                .bind(&id)
                .bind(body)
                .bind(now)
                .execute(&mut *conn)
                .await?;
            }
            WriteOp::Update {
                collection,
                id,
                data,
            } => {
                let patch = serde_json::to_string(&strip_id(data)?)?;
                let rows = sqlx::query(
                    "UPDATE documents SET body = json_patch(body, ?1), updated_at = ?2 WHERE collection = ?3 AND id = ?4",
                )
                .bind(patch)
                .bind(now)
                .bind(&collection)
                .bind(&id)
                .execute(&mut *conn)
                .await?
                .rows_affected();
                if rows == 0 {
                    return Err(StoreError::not_found(&collection, &id));
                }
            }
            WriteOp::Delete { collection, id } => {
                let rows = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
                    .bind(&collection)
                    .bind(&id)
                    .execute(&mut *conn)
                    .await?
                    .rows_affected();
                if rows == 0 {
                    return Err(StoreError::not_found(&collection, &id));
                }
            }
        }
        Ok(())
    }

    async fn apply_one(&self, op: WriteOp) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::apply(&mut *conn, op).await
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let body: String = row.try_get("body")?;
                Ok(Some(with_id(id, Self::parse_body(&body)?)))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let rows = sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY id")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| -> StoreResult<Value> {
                let id: String = row.try_get("id")?;
                let body: String = row.try_get("body")?;
                Ok(with_id(&id, Self::parse_body(&body)?))
            })
            .collect()
    }

    async fn create(&self, collection: &str, data: Value) -> StoreResult<String> {
        let body = serde_json::to_string(&strip_id(data)?)?;
        let id = new_document_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO documents (collection, id, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
        )
        .bind(collection)
        .bind(&id)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        self.apply_one(WriteOp::set(collection, id, data)).await
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        self.apply_one(WriteOp::update(collection, id, data)).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.apply_one(WriteOp::delete(collection, id)).await
    }

    async fn batch(&self, ops: Vec<WriteOp>) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        for op in ops {
            // Dropping `tx` on error rolls back
            Self::apply(&mut *tx, op).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
