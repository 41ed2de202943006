//! Error types for treeshade

use thiserror::Error;

/// Main error type for the shadow pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// The point cloud for a tree could not be fetched or decoded.
    #[error("point cloud asset not found: {key} ({reason})")]
    AssetNotFound { key: String, reason: String },

    /// A season index outside the configured solar table.
    #[error("season index {index} out of range (table has {count} profiles)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("invalid tree selection: {0}")]
    InvalidSelection(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error should surface as a "no data" result rather than
    /// abort the request.
    pub fn is_missing_asset(&self) -> bool {
        matches!(self, Error::AssetNotFound { .. })
    }
}
