//! Canopy statistics derived from the untransformed point cloud.

pub mod allometry;
pub mod metrics;

pub use allometry::expected_canopy_diameter;
pub use metrics::{CanopyMetrics, compute_metrics};
