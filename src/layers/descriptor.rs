//! Layer descriptors handed to the map shell.

use serde::Serialize;

use super::manager::LoadState;
use crate::cloud::CanopyPoint;
use crate::core::{FEET_PER_METER, GeoCoord, Rgba};
use crate::shadow::{ShadowPoint, canopy_color, canopy_position};
use crate::stats::CanopyMetrics;

/// Id of the tree's own point-cloud layer.
pub const CANOPY_LAYER_ID: &str = "tree";

/// Where a layer sits in the managed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSlot {
    Canopy,
    /// Shadow for the sample at this index of the active day profile.
    Shadow { index: usize },
}

/// Point size and opacity for each layer kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerStyle {
    pub unit_scale: f32,
    pub canopy_point_size: f32,
    pub canopy_opacity: f32,
    pub shadow_point_size: f32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            unit_scale: FEET_PER_METER,
            canopy_point_size: 3.0,
            canopy_opacity: 0.75,
            shadow_point_size: 2.0,
        }
    }
}

/// A renderable point layer in meter offsets from `origin`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerDescriptor {
    pub id: String,
    pub slot: LayerSlot,
    /// Tree the geometry was built from.
    pub tree_id: String,
    pub origin: GeoCoord,
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<Rgba>,
    pub point_size: f32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerDescriptor {
    /// Layer drawing the canopy cloud itself.
    pub fn canopy(tree_id: &str, origin: GeoCoord, points: &[CanopyPoint], style: &LayerStyle) -> Self {
        Self {
            id: CANOPY_LAYER_ID.to_string(),
            slot: LayerSlot::Canopy,
            tree_id: tree_id.to_string(),
            origin,
            positions: points
                .iter()
                .map(|p| canopy_position(p, style.unit_scale).to_array())
                .collect(),
            colors: points.iter().map(canopy_color).collect(),
            point_size: style.canopy_point_size,
            opacity: style.canopy_opacity,
            visible: true,
        }
    }

    /// Layer drawing one hour's shadow. The id is numbered from the slot, so
    /// it stays unique whatever labels the profile carries.
    pub fn shadow(tree_id: &str, origin: GeoCoord, index: usize, shadow: &[ShadowPoint], style: &LayerStyle) -> Self {
        Self {
            id: format!("shadow{}", index + 1),
            slot: LayerSlot::Shadow { index },
            tree_id: tree_id.to_string(),
            origin,
            positions: shadow.iter().map(|s| s.position.to_array()).collect(),
            colors: shadow.iter().map(|s| s.color).collect(),
            point_size: style.shadow_point_size,
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One atomic change to the drawn layer set. The shell removes every id in
/// `removed`, then adds `added`, within a single frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LayerUpdate {
    pub revision: u64,
    pub removed: Vec<String>,
    pub added: Vec<LayerDescriptor>,
}

impl LayerUpdate {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Full, consistent view of the managed layers at one revision.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub revision: u64,
    pub season: usize,
    pub tree_id: Option<String>,
    pub load_state: Option<LoadState>,
    pub metrics: Option<CanopyMetrics>,
    pub layers: Vec<LayerDescriptor>,
}

impl LayerSnapshot {
    pub fn shadow_layer_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| matches!(l.slot, LayerSlot::Shadow { .. }))
            .count()
    }

    /// Number of layers built from `tree_id`'s geometry.
    pub fn layer_count_for(&self, tree_id: &str) -> usize {
        self.layers.iter().filter(|l| l.tree_id == tree_id).count()
    }
}
