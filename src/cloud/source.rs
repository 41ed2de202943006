//! Point Cloud Source: resolves a tree to its canopy cloud, fetching once.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::asset::AssetKey;
use super::cache::PointCloudCache;
use super::fetch::PointCloudFetcher;
use super::point::{CanopyPoint, decode_points};
use crate::core::{Error, Result};

/// Shared, immutable canopy cloud.
pub type PointCloud = Arc<[CanopyPoint]>;

/// Loads canopy clouds through a [`PointCloudFetcher`] and caches them by
/// asset key.
pub struct PointCloudSource {
    fetcher: Arc<dyn PointCloudFetcher>,
    cache: RwLock<PointCloudCache>,
}

impl PointCloudSource {
    pub fn new(fetcher: Arc<dyn PointCloudFetcher>) -> Self {
        Self {
            fetcher,
            cache: RwLock::new(PointCloudCache::new()),
        }
    }

    /// Load the cloud for `(zone, species, tree_id)`.
    pub async fn load(&self, zone: &str, species: &str, tree_id: &str) -> Result<PointCloud> {
        let key = AssetKey::new(zone, species, tree_id)?;
        self.load_key(&key).await
    }

    /// Load the cloud for an asset key, consulting the cache first.
    ///
    /// Fetch and decode failures both surface as [`Error::AssetNotFound`].
    pub async fn load_key(&self, key: &AssetKey) -> Result<PointCloud> {
        if let Some(cloud) = self.cache.read().await.get(key) {
            log::debug!("Point cloud cache hit: {}", key);
            return Ok(cloud);
        }

        log::debug!("Point cloud cache miss: {}", key);
        let bytes = self.fetcher.fetch(key).await.map_err(|e| Error::AssetNotFound {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        let points = decode_points(&bytes).map_err(|e| Error::AssetNotFound {
            key: key.to_string(),
            reason: format!("malformed point cloud: {e}"),
        })?;

        log::debug!("Decoded {} canopy points for {}", points.len(), key);
        let cloud = self.cache.write().await.insert(key.clone(), points.into());
        Ok(cloud)
    }

    /// Number of cached clouds.
    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}
