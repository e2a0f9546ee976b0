//! In-process document store (`STORAGE_BACKEND=memory`, tests)

use super::{DocumentStore, StoreError, StoreResult, WriteOp, merge_patch, strip_id, with_id};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use shared::util::new_document_id;
use std::collections::{BTreeMap, HashMap};

type Collection = BTreeMap<String, Map<String, Value>>;

/// Documents held in a map per collection, ordered by id
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn exists(collections: &HashMap<String, Collection>, collection: &str, id: &str) -> bool {
        collections
            .get(collection)
            .is_some_and(|docs| docs.contains_key(id))
    }

    fn apply(collections: &mut HashMap<String, Collection>, op: WriteOp) -> StoreResult<()> {
        match op {
            WriteOp::Set {
                collection,
                id,
                data,
            } => {
                let body = strip_id(data)?;
                collections.entry(collection).or_default().insert(id, body);
            }
            WriteOp::Update {
                collection,
                id,
                data,
            } => {
                let patch = Value::Object(strip_id(data)?);
                let body = collections
                    .get_mut(&collection)
                    .and_then(|docs| docs.get_mut(&id))
                    .ok_or_else(|| StoreError::not_found(&collection, &id))?;
                let mut merged = Value::Object(std::mem::take(body));
                merge_patch(&mut merged, patch);
                if let Value::Object(obj) = merged {
                    *body = obj;
                }
            }
            WriteOp::Delete { collection, id } => {
                collections
                    .get_mut(&collection)
                    .and_then(|docs| docs.remove(&id))
                    .ok_or_else(|| StoreError::not_found(&collection, &id))?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|body| with_id(id, body.clone())))
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| with_id(id, body.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, data: Value) -> StoreResult<String> {
        let body = strip_id(data)?;
        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();
        let mut id = new_document_id();
        while docs.contains_key(&id) {
            id = new_document_id();
        }
        docs.insert(id.clone(), body);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        let mut collections = self.collections.write();
        Self::apply(&mut collections, WriteOp::set(collection, id, data))
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        let mut collections = self.collections.write();
        Self::apply(&mut collections, WriteOp::update(collection, id, data))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut collections = self.collections.write();
        Self::apply(&mut collections, WriteOp::delete(collection, id))
    }

    async fn batch(&self, ops: Vec<WriteOp>) -> StoreResult<()> {
        let mut collections = self.collections.write();

        // Validate every target and body before touching anything
        for op in &ops {
            match op {
                WriteOp::Set { data, .. } if !data.is_object() => {
                    return Err(StoreError::Backend(
                        "document body must be a JSON object".into(),
                    ));
                }
                WriteOp::Update {
                    collection,
                    id,
                    data,
                } => {
                    if !data.is_object() {
                        return Err(StoreError::Backend(
                            "document body must be a JSON object".into(),
                        ));
                    }
                    if !Self::exists(&collections, collection, id) {
                        return Err(StoreError::not_found(collection, id));
                    }
                }
                WriteOp::Delete { collection, id } => {
                    if !Self::exists(&collections, collection, id) {
                        return Err(StoreError::not_found(collection, id));
                    }
                }
                WriteOp::Set { .. } => {}
            }
        }

        // Stage on a copy so a delete followed by an update of the same
        // document still leaves the store untouched on failure
        let mut staged = collections.clone();
        for op in ops {
            Self::apply(&mut staged, op)?;
        }
        *collections = staged;
        Ok(())
    }
}
