//! Append-only cache of decoded point clouds
//!
//! Entries are keyed by [`AssetKey`] and shared as `Arc<[CanopyPoint]>`.
//! Nothing is evicted and an existing entry is never replaced, so every
//! holder of a cloud keeps seeing the same points for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;

use super::asset::AssetKey;
use super::point::CanopyPoint;

/// Unbounded point-cloud cache.
#[derive(Default)]
pub struct PointCloudCache {
    /// Decoded clouds by asset key
    clouds: HashMap<AssetKey, Arc<[CanopyPoint]>>,
    /// Total points held across all entries
    point_count: usize,
}

impl PointCloudCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cloud by key
    pub fn get(&self, key: &AssetKey) -> Option<Arc<[CanopyPoint]>> {
        self.clouds.get(key).cloned()
    }

    /// Insert a cloud unless one is already cached for `key`
    ///
    /// # Returns
    /// The cached cloud for `key`: the existing entry if there was one,
    /// otherwise `cloud`.
    pub fn insert(&mut self, key: AssetKey, cloud: Arc<[CanopyPoint]>) -> Arc<[CanopyPoint]> {
        if let Some(existing) = self.clouds.get(&key) {
            return Arc::clone(existing);
        }
        self.point_count += cloud.len();
        self.clouds.insert(key, Arc::clone(&cloud));
        cloud
    }

    /// Check if the cache contains a cloud
    pub fn contains(&self, key: &AssetKey) -> bool {
        self.clouds.contains_key(key)
    }

    /// Number of cached clouds
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    /// Total number of points held
    pub fn point_count(&self) -> usize {
        self.point_count
    }
}
