//! Stock Repository (`stock`)

use super::to_body;
use crate::store::{DocumentStore, StoreResult, collections, decode, decode_all};
use shared::models::StockItem;

const COLLECTION: &str = collections::STOCK;

pub async fn find_all(store: &dyn DocumentStore) -> StoreResult<Vec<StockItem>> {
    decode_all(store.list(COLLECTION).await?)
}

pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> StoreResult<Option<StockItem>> {
    store.get(COLLECTION, id).await?.map(decode::<StockItem>).transpose()
}

pub async fn create(store: &dyn DocumentStore, mut item: StockItem) -> StoreResult<StockItem> {
    item.id = store.create(COLLECTION, to_body(&item)?).await?;
    Ok(item)
}

/// Replace the stored item (NotFound if missing)
pub async fn update(store: &dyn DocumentStore, item: &StockItem) -> StoreResult<()> {
    store.update(COLLECTION, &item.id, to_body(item)?).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> StoreResult<()> {
    store.delete(COLLECTION, id).await
}
