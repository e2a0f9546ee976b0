//! Site configuration (flyers) cache

use super::versions::{FLYERS, ResourceVersions};
use crate::repository::site_config;
use crate::store::{DocumentStore, StoreResult};
use chrono::Utc;
use parking_lot::RwLock;
use shared::models::SiteConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct FlyerCache {
    versions: Arc<ResourceVersions>,
    /// `(version, config)` as last read or written
    entry: RwLock<Option<(u64, SiteConfig)>>,
    /// Serializes persist and version bump across concurrent writers
    write_lock: Mutex<()>,
}

impl FlyerCache {
    pub fn new(versions: Arc<ResourceVersions>) -> Self {
        Self {
            versions,
            entry: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    fn cached(&self) -> Option<SiteConfig> {
        let current = self.versions.get(FLYERS);
        self.entry
            .read()
            .as_ref()
            .filter(|(version, _)| *version == current)
            .map(|(_, config)| config.clone())
    }

    /// Current configuration, read through to the store on a miss
    pub async fn get(&self, store: &dyn DocumentStore) -> StoreResult<SiteConfig> {
        if let Some(config) = self.cached() {
            return Ok(config);
        }
        let version = self.versions.get(FLYERS);
        let config = site_config::get(store).await?;
        if self.versions.get(FLYERS) == version {
            *self.entry.write() = Some((version, config.clone()));
        }
        Ok(config)
    }

    /// Persist a new configuration and bump the `flyers` version
    pub async fn put(&self, store: &dyn DocumentStore, mut config: SiteConfig) -> StoreResult<SiteConfig> {
        let _guard = self.write_lock.lock().await;
        config.updated_at = Some(Utc::now());
        site_config::put(store, &config).await?;
        let version = self.versions.increment(FLYERS);
        *self.entry.write() = Some((version, config.clone()));
        tracing::info!(
            version,
            banners = config.banners.len(),
            hero_slides = config.hero_slides.len(),
            "Site configuration updated"
        );
        Ok(config)
    }
}
