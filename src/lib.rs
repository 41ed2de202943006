//! Treeshade - solar shadow projection and canopy statistics for street trees
//!
//! A picked tree's canopy point cloud is loaded once, projected onto the
//! ground for every sunlit hour of the selected season, and summarized into
//! height and density figures. The map shell draws the resulting layers.

pub mod core;
pub mod solar;
pub mod cloud;
pub mod shadow;
pub mod stats;
pub mod layers;
pub mod session;

pub use crate::core::{Error, Result};
pub use layers::{LayerDescriptor, LayerSnapshot, LayerUpdate, TreeSelection};
pub use session::{SelectionOutcome, ShadeConfig, ShadowSession};
