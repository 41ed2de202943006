//! Transport for point-cloud assets.
//!
//! The [`PointCloudFetcher`] trait hides where assets live. [`HttpFetcher`]
//! reads from the public object store, [`DirectoryFetcher`] from a local
//! mirror with the same layout.

use std::path::PathBuf;

use futures_util::future::BoxFuture;
use thiserror::Error;

use super::asset::AssetKey;

/// Default object-store prefix for tree point clouds.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://tree-folio.s3.amazonaws.com/folio/folio";

/// Failure to retrieve raw asset bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("asset does not exist")]
    NotFound,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Retrieves the raw bytes of a point-cloud asset.
pub trait PointCloudFetcher: Send + Sync {
    fn fetch<'a>(&'a self, key: &'a AssetKey) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

/// Fetches `GET {base_url}/{key}.json`.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Full URL of an asset.
    pub fn asset_url(&self, key: &AssetKey) -> String {
        format!("{}/{}", self.base_url, key.file_name())
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_BASE_URL)
    }
}

impl PointCloudFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, key: &'a AssetKey) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        let url = self.asset_url(key);
        Box::pin(async move {
            log::debug!("GET {}", url);
            let resp = self.client.get(&url).send().await?;

            if resp.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(FetchError::NotFound);
            }
            if !resp.status().is_success() {
                return Err(FetchError::Status(resp.status().as_u16()));
            }

            Ok(resp.bytes().await?.to_vec())
        })
    }
}

/// Reads `{root}/{key}.json` from a local directory tree.
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Local path of an asset.
    pub fn asset_path(&self, key: &AssetKey) -> PathBuf {
        self.root
            .join(key.zone())
            .join(key.zone())
            .join(key.species())
            .join(format!("{}.json", key.tree_id()))
    }
}

impl PointCloudFetcher for DirectoryFetcher {
    fn fetch<'a>(&'a self, key: &'a AssetKey) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        let path = self.asset_path(key);
        Box::pin(async move {
            match tokio::fs::read(&path).await {
                Ok(bytes) => Ok(bytes),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound),
                Err(e) => Err(FetchError::Io(e)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_asset_url() {
        let fetcher = HttpFetcher::new("https://example.com/folio/");
        let key = AssetKey::new("11215", "pin oak", "42").unwrap();
        assert_eq!(fetcher.asset_url(&key), "https://example.com/folio/11215/11215/pin oak/42.json");
    }

    #[test]
    fn test_default_base_url() {
        let fetcher = HttpFetcher::default();
        let key = AssetKey::new("10003", "honeylocust", "7").unwrap();
        assert_eq!(
            fetcher.asset_url(&key),
            "https://tree-folio.s3.amazonaws.com/folio/folio/10003/10003/honeylocust/7.json"
        );
    }

    #[tokio::test]
    async fn test_directory_fetch() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let fetcher = DirectoryFetcher::new(temp_dir.path());
        let key = AssetKey::new("10003", "honeylocust", "7").unwrap();

        let path = fetcher.asset_path(&key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"[[0,0,1,1,0,1]]").unwrap();

        let bytes = fetcher.fetch(&key).await.unwrap();
        assert_eq!(bytes, b"[[0,0,1,1,0,1]]");
    }

    #[tokio::test]
    async fn test_directory_fetch_missing() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let fetcher = DirectoryFetcher::new(temp_dir.path());
        let key = AssetKey::new("10003", "honeylocust", "missing").unwrap();

        assert!(matches!(fetcher.fetch(&key).await, Err(FetchError::NotFound)));
    }
}
