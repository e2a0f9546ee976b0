//! Cash Closing Repository (`cashClosings`)

use crate::store::{DocumentStore, StoreResult, collections, decode_all};
use shared::models::CashClosing;

pub const COLLECTION: &str = collections::CASH_CLOSINGS;

/// Every closing, newest first
pub async fn find_all(store: &dyn DocumentStore) -> StoreResult<Vec<CashClosing>> {
    let mut closings: Vec<CashClosing> = decode_all(store.list(COLLECTION).await?)?;
    closings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(closings)
}
