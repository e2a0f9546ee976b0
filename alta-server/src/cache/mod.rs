//! In-process read caches
//!
//! Each cache is keyed by a [`ResourceVersions`] counter: a write bumps the
//! counter, and a snapshot taken under an older version is never served.

pub mod catalog;
pub mod flyers;
pub mod versions;

pub use catalog::{CatalogCache, Featured};
pub use flyers::FlyerCache;
pub use versions::ResourceVersions;
