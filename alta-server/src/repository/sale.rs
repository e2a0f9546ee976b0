//! Sale Repository (`sales`)

use super::to_body;
use crate::store::{DocumentStore, StoreResult, collections, decode_all};
use shared::models::Sale;

const COLLECTION: &str = collections::SALES;

pub async fn find_all(store: &dyn DocumentStore) -> StoreResult<Vec<Sale>> {
    decode_all(store.list(COLLECTION).await?)
}

/// Sales not yet folded into a closing
pub async fn find_open(store: &dyn DocumentStore) -> StoreResult<Vec<Sale>> {
    let mut sales = find_all(store).await?;
    sales.retain(|sale| sale.closing_id.is_empty());
    Ok(sales)
}

pub async fn create(store: &dyn DocumentStore, mut sale: Sale) -> StoreResult<Sale> {
    sale.id = store.create(COLLECTION, to_body(&sale)?).await?;
    Ok(sale)
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> StoreResult<()> {
    store.delete(COLLECTION, id).await
}
