//! Document Store Port
//!
//! Every collection is a set of JSON documents keyed by a string id. The
//! backend is chosen once at startup (`STORAGE_BACKEND`) and handed to the
//! rest of the service as `Arc<dyn DocumentStore>`.
//!
//! Documents returned by the store always carry their `id` field; bodies
//! passed in are stored without it.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Collection names
pub mod collections {
    pub const STOCK: &str = "stock";
    pub const SALES: &str = "sales";
    pub const CASH_TRANSACTIONS: &str = "cashTransactions";
    pub const TECHNICAL_SERVICES: &str = "technicalServices";
    pub const CASH_CLOSINGS: &str = "cashClosings";
    pub const CLIENTS: &str = "clients";
    pub const SITE_CONFIG: &str = "siteConfig";
}

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// One write inside an all-or-nothing [`DocumentStore::batch`]
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace the document at `id`
    Set {
        collection: String,
        id: String,
        data: Value,
    },
    /// Merge-patch an existing document (fails the batch if missing)
    Update {
        collection: String,
        id: String,
        data: Value,
    },
    /// Remove an existing document (fails the batch if missing)
    Delete { collection: String, id: String },
}

impl WriteOp {
    pub fn set(collection: &str, id: &str, data: Value) -> Self {
        WriteOp::Set {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        }
    }

    pub fn update(collection: &str, id: &str, data: Value) -> Self {
        WriteOp::Update {
            collection: collection.to_string(),
            id: id.to_string(),
            data,
        }
    }

    pub fn delete(collection: &str, id: &str) -> Self {
        WriteOp::Delete {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// Storage port shared by every repository
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document, `None` if absent
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Every document of a collection, ordered by id
    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Insert a new document and return the id the store assigned
    async fn create(&self, collection: &str, data: Value) -> StoreResult<String>;

    /// Create or replace the document at a caller-chosen id
    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()>;

    /// Merge-patch (RFC 7396) an existing document
    async fn update(&self, collection: &str, id: &str, data: Value) -> StoreResult<()>;

    /// Remove an existing document
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Apply every op or none of them
    async fn batch(&self, ops: Vec<WriteOp>) -> StoreResult<()>;
}

/// Decode a stored document into a model
pub fn decode<T: DeserializeOwned>(doc: Value) -> StoreResult<T> {
    Ok(serde_json::from_value(doc)?)
}

/// Decode every document of a list
pub fn decode_all<T: DeserializeOwned>(docs: Vec<Value>) -> StoreResult<Vec<T>> {
    docs.into_iter().map(decode).collect()
}

/// Body as stored: a JSON object without the `id` key
pub(crate) fn strip_id(data: Value) -> StoreResult<Map<String, Value>> {
    match data {
        Value::Object(mut obj) => {
            obj.remove("id");
            Ok(obj)
        }
        other => Err(StoreError::Backend(format!(
            "document body must be a JSON object, got {other}"
        ))),
    }
}

/// Stored body plus its id, as handed back to callers
pub(crate) fn with_id(id: &str, mut body: Map<String, Value>) -> Value {
    body.insert("id".to_string(), Value::String(id.to_string()));
    Value::Object(body)
}

/// RFC 7396 merge patch, the same semantics as SQLite's `json_patch`
pub(crate) fn merge_patch(target: &mut Value, patch: Value) {
    match patch {
        Value::Object(patch) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(target) = target {
                for (key, value) in patch {
                    if value.is_null() {
                        target.remove(&key);
                    } else {
                        merge_patch(target.entry(key).or_insert(Value::Null), value);
                    }
                }
            }
        }
        other => *target = other,
    }
}
