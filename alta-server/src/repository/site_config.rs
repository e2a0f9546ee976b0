//! Site Configuration Repository (`siteConfig`, single document)

use super::to_body;
use crate::store::{DocumentStore, StoreResult, collections, decode};
use shared::models::SiteConfig;

const DOCUMENT_ID: &str = "main";

/// Stored configuration, or the empty default before the first save
pub async fn get(store: &dyn DocumentStore) -> StoreResult<SiteConfig> {
    match store.get(collections::SITE_CONFIG, DOCUMENT_ID).await? {
        Some(doc) => decode(doc),
        None => Ok(SiteConfig::default()),
    }
}

pub async fn put(store: &dyn DocumentStore, config: &SiteConfig) -> StoreResult<()> {
    store
        .set(collections::SITE_CONFIG, DOCUMENT_ID, to_body(config)?)
        .await
}
