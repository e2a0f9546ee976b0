//! Client Repository (`clients`)

use crate::store::{DocumentStore, StoreResult, WriteOp, collections, decode_all};
use serde_json::json;
use shared::models::Client;
use std::collections::HashMap;

const COLLECTION: &str = collections::CLIENTS;

pub async fn find_all(store: &dyn DocumentStore) -> StoreResult<Vec<Client>> {
    decode_all(store.list(COLLECTION).await?)
}

/// Set the new points balance of several clients in one batch write
pub async fn set_points(store: &dyn DocumentStore, points: &HashMap<String, i64>) -> StoreResult<()> {
    let ops = points
        .iter()
        .map(|(id, value)| WriteOp::update(COLLECTION, id, json!({ "points": value })))
        .collect();
    store.batch(ops).await
}
