//! Cash Transaction Repository (`cashTransactions`)

use crate::store::{DocumentStore, StoreResult, collections, decode_all};
use shared::models::Transaction;

const COLLECTION: &str = collections::CASH_TRANSACTIONS;

pub async fn find_all(store: &dyn DocumentStore) -> StoreResult<Vec<Transaction>> {
    decode_all(store.list(COLLECTION).await?)
}

/// Rows not yet folded into a closing
pub async fn find_open(store: &dyn DocumentStore) -> StoreResult<Vec<Transaction>> {
    let mut rows = find_all(store).await?;
    rows.retain(|tx| tx.closing_id.is_empty());
    Ok(rows)
}

pub async fn create(store: &dyn DocumentStore, mut tx: Transaction) -> StoreResult<Transaction> {
    let record = tx.to_record()?;
    tx.id = store.create(COLLECTION, record).await?;
    Ok(tx)
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> StoreResult<()> {
    store.delete(COLLECTION, id).await
}
