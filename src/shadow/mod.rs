//! Ground-plane shadow projection and canopy point coloring.

pub mod projector;
pub mod canopy;

pub use projector::{ShadowPoint, ShadowProjector};
pub use canopy::{canopy_color, canopy_position};
