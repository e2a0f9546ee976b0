//! Application state

use crate::cache::{CatalogCache, FlyerCache, ResourceVersions};
use crate::config::{Config, StorageBackend};
use crate::store::{DocumentStore, MemoryStore, SqliteStore, StoreResult};
use std::sync::Arc;

/// Shared application state
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage port, backend chosen at startup
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
    pub resource_versions: Arc<ResourceVersions>,
    pub catalog: Arc<CatalogCache>,
    pub flyers: Arc<FlyerCache>,
}

impl AppState {
    /// Open the configured backend and build the caches around it
    pub async fn new(config: &Config) -> StoreResult<Self> {
        let store: Arc<dyn DocumentStore> = match config.storage_backend {
            StorageBackend::Sqlite => Arc::new(SqliteStore::connect(&config.database_url).await?),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on restart");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(store, config.clone()))
    }

    /// State over an already opened store
    pub fn with_store(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let resource_versions = Arc::new(ResourceVersions::new());
        Self {
            store,
            config,
            catalog: Arc::new(CatalogCache::new(resource_versions.clone())),
            flyers: Arc::new(FlyerCache::new(resource_versions.clone())),
            resource_versions,
        }
    }

    /// Borrow the store as the repositories take it
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
