//! Catalog Cache - featured products from an in-memory stock snapshot
//!
//! The snapshot holds the active `stock` items, newest update first, tagged
//! with the `products` version it was taken under. Product writes call
//! [`CatalogCache::invalidate`]; the next read rescans the collection.

use super::versions::{PRODUCTS, ResourceVersions};
use crate::repository::stock;
use crate::store::{DocumentStore, StoreResult};
use parking_lot::RwLock;
use serde::Serialize;
use shared::models::StockItem;
use std::sync::Arc;

pub const DEFAULT_FEATURED_LIMIT: usize = 8;
pub const MAX_FEATURED_LIMIT: usize = 50;

/// `GET /api/featured` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Featured {
    pub liquidation: Vec<StockItem>,
    pub weekly: Vec<StockItem>,
}

#[derive(Debug)]
struct Snapshot {
    version: u64,
    items: Arc<Vec<StockItem>>,
}

pub struct CatalogCache {
    versions: Arc<ResourceVersions>,
    snapshot: RwLock<Option<Snapshot>>,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self.snapshot.read().as_ref().map(|s| (s.version, s.items.len()));
        f.debug_struct("CatalogCache")
            .field("version", &self.versions.get(PRODUCTS))
            .field("cached", &cached)
            .finish()
    }
}

/// Clamp a requested limit to `1..=50`, 8 when absent
pub fn featured_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_FEATURED_LIMIT)
        .clamp(1, MAX_FEATURED_LIMIT)
}

impl CatalogCache {
    pub fn new(versions: Arc<ResourceVersions>) -> Self {
        Self {
            versions,
            snapshot: RwLock::new(None),
        }
    }

    /// Warm the snapshot from the store; returns the number of active items
    pub async fn init(&self, store: &dyn DocumentStore) -> StoreResult<usize> {
        let items = self.load(store).await?;
        tracing::info!(items = items.len(), "Catalog cache warmed");
        Ok(items.len())
    }

    /// The snapshot, if it was taken under the current version
    pub fn get(&self) -> Option<Arc<Vec<StockItem>>> {
        let current = self.versions.get(PRODUCTS);
        self.snapshot
            .read()
            .as_ref()
            .filter(|s| s.version == current)
            .map(|s| s.items.clone())
    }

    /// Bump the `products` version and drop the snapshot
    pub fn invalidate(&self) -> u64 {
        let version = self.versions.increment(PRODUCTS);
        *self.snapshot.write() = None;
        tracing::debug!(version, "Catalog cache invalidated");
        version
    }

    /// Release the snapshot at shutdown
    pub fn dispose(&self) {
        *self.snapshot.write() = None;
        tracing::debug!("Catalog cache disposed");
    }

    /// Featured lists, each capped at `limit`
    pub async fn featured(&self, store: &dyn DocumentStore, limit: usize) -> StoreResult<Featured> {
        let items = match self.get() {
            Some(items) => items,
            None => self.load(store).await?,
        };
        let pick = |flag: fn(&StockItem) -> bool| -> Vec<StockItem> {
            items.iter().filter(|i| flag(i)).take(limit).cloned().collect()
        };
        Ok(Featured {
            liquidation: pick(|i: &StockItem| i.liquidation),
            weekly: pick(|i: &StockItem| i.weekly_offer),
        })
    }

    /// Scan `stock` and write the snapshot back, unless a write bumped the
    /// version while the scan was running
    async fn load(&self, store: &dyn DocumentStore) -> StoreResult<Arc<Vec<StockItem>>> {
        let version = self.versions.get(PRODUCTS);
        let mut items = stock::find_all(store).await?;
        items.retain(|item| item.active);
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let items = Arc::new(items);

        if self.versions.get(PRODUCTS) == version {
            *self.snapshot.write() = Some(Snapshot {
                version,
                items: items.clone(),
            });
            tracing::debug!(version, items = items.len(), "Catalog snapshot stored");
        } else {
            tracing::debug!(version, "Catalog changed during scan, snapshot discarded");
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    async fn seed(store: &MemoryStore) {
        let now = Utc::now();
        let items = [
            ("Funda", true, false, true, 3),
            ("Cargador", true, true, true, 1),
            ("Cable", false, true, true, 2),
            ("Oculto", true, true, false, 0),
        ];
        for (name, liquidation, weekly_offer, active, age) in items {
            stock::create(
                store,
                StockItem {
                    name: name.into(),
                    price: dec!(10),
                    liquidation,
                    weekly_offer,
                    active,
                    updated_at: now - Duration::minutes(age),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }
    }

    fn names(items: &[StockItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_featured_limit_bounds() {
        assert_eq!(featured_limit(None), 8);
        assert_eq!(featured_limit(Some(3)), 3);
        assert_eq!(featured_limit(Some(500)), 50);
        assert_eq!(featured_limit(Some(0)), 1);
    }

    #[tokio::test]
    async fn test_featured_lists_active_items_newest_first() {
        let store = MemoryStore::new();
        seed(&store).await;
        let cache = CatalogCache::new(Arc::new(ResourceVersions::new()));

        let featured = cache.featured(&store, 8).await.unwrap();
        assert_eq!(names(&featured.liquidation), ["Cargador", "Funda"]);
        assert_eq!(names(&featured.weekly), ["Cargador", "Cable"]);

        let featured = cache.featured(&store, 1).await.unwrap();
        assert_eq!(names(&featured.liquidation), ["Cargador"]);
    }

    #[tokio::test]
    async fn test_snapshot_served_until_invalidated() {
        let store = MemoryStore::new();
        seed(&store).await;
        let cache = CatalogCache::new(Arc::new(ResourceVersions::new()));
        assert_eq!(cache.init(&store).await.unwrap(), 3);

        // A write that bypasses the cache is not seen
        stock::create(
            &store,
            StockItem {
                name: "Nuevo".into(),
                liquidation: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let featured = cache.featured(&store, 8).await.unwrap();
        assert_eq!(featured.liquidation.len(), 2);

        assert_eq!(cache.invalidate(), 1);
        assert!(cache.get().is_none());
        let featured = cache.featured(&store, 8).await.unwrap();
        assert_eq!(featured.liquidation[0].name, "Nuevo");
        assert!(cache.get().is_some());
    }

    #[tokio::test]
    async fn test_stale_version_is_not_served() {
        let versions = Arc::new(ResourceVersions::new());
        let store = MemoryStore::new();
        seed(&store).await;
        let cache = CatalogCache::new(versions.clone());
        cache.init(&store).await.unwrap();

        versions.increment(PRODUCTS);
        assert!(cache.get().is_none());

        cache.dispose();
        assert!(cache.get().is_none());
    }
}
