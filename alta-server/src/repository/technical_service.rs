//! Technical Service Repository (`technicalServices`)

use crate::store::{DocumentStore, StoreResult, collections, decode_all};
use shared::models::TechnicalService;

pub async fn find_all(store: &dyn DocumentStore) -> StoreResult<Vec<TechnicalService>> {
    decode_all(store.list(collections::TECHNICAL_SERVICES).await?)
}
