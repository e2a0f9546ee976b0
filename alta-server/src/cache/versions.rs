//! Resource version counters

use dashmap::DashMap;

/// Catalog (`stock`) version
pub const PRODUCTS: &str = "products";
/// Site configuration version
pub const FLYERS: &str = "flyers";

/// Monotonically increasing version per resource
///
/// A resource that was never bumped is at version 0.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the version of `resource` and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}
