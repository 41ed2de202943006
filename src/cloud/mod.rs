//! Canopy point clouds: decoding, asset addressing, fetch and cache.

pub mod point;
pub mod asset;
pub mod fetch;
pub mod cache;
pub mod source;

pub use point::{CanopyPoint, decode_points};
pub use asset::AssetKey;
pub use fetch::{DirectoryFetcher, FetchError, HttpFetcher, PointCloudFetcher};
pub use cache::PointCloudCache;
pub use source::{PointCloud, PointCloudSource};
