//! The tree picked on the map.

use serde::{Deserialize, Serialize};

use crate::cloud::AssetKey;
use crate::core::{GeoCoord, Result};
use crate::stats::expected_canopy_diameter;

/// Immutable description of a picked tree, as delivered by the map shell.
///
/// A new pick replaces the whole value; fields are never edited in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeSelection {
    pub tree_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Postal zone the asset store is partitioned by.
    pub zone: String,
    /// Species code, e.g. "honeylocust".
    pub species: String,
    /// Trunk diameter at breast height, inches.
    pub trunk_diameter_in: f32,
}

impl TreeSelection {
    /// Asset key of this tree's point cloud.
    pub fn asset_key(&self) -> Result<AssetKey> {
        AssetKey::new(&self.zone, &self.species, &self.tree_id)
    }

    /// Anchor for layer coordinates.
    pub fn origin(&self) -> GeoCoord {
        GeoCoord::new(self.longitude, self.latitude)
    }

    /// Allometric canopy diameter in stored units.
    pub fn expected_canopy_diameter(&self, unit_scale: f32) -> f32 {
        expected_canopy_diameter(self.trunk_diameter_in, unit_scale)
    }
}

/// Proof of which selection a load belongs to.
///
/// Issued by [`LayerManager::select`](super::LayerManager::select); a ticket
/// stops being current as soon as another tree is selected or the selection
/// is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectionTicket(pub(crate) u64);

impl SelectionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FEET_PER_METER;

    #[test]
    fn test_from_pick_event() {
        let json = r#"{
            "tree_id": "180683",
            "latitude": 40.7231,
            "longitude": -73.8443,
            "zone": "11375",
            "species": "red maple",
            "trunk_diameter_in": 3
        }"#;
        let selection: TreeSelection = serde_json::from_str(json).unwrap();

        assert_eq!(selection.asset_key().unwrap().to_string(), "11375/11375/red maple/180683");
        assert_eq!(selection.origin(), GeoCoord::new(-73.8443, 40.7231));
        assert!(selection.expected_canopy_diameter(FEET_PER_METER) > 11.48);
    }
}
