//! Renderable layers and their lifecycle.
//!
//! The [`LayerManager`] owns every layer drawn for the active tree: one
//! canopy layer plus one shadow layer per sunlit hour of the active season.
//! Changes are published as whole [`LayerUpdate`]s so the map shell never
//! draws a mix of layers from two selections.

pub mod selection;
pub mod descriptor;
pub mod manager;

pub use selection::{SelectionTicket, TreeSelection};
pub use descriptor::{LayerDescriptor, LayerSlot, LayerSnapshot, LayerStyle, LayerUpdate};
pub use manager::{LayerManager, LoadState};
