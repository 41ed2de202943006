//! Session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cloud::fetch::DEFAULT_ASSET_BASE_URL;
use crate::core::{Error, FEET_PER_METER, Result};
use crate::layers::LayerStyle;
use crate::shadow::ShadowProjector;

/// Tunables for the shadow pipeline. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeConfig {
    /// Prefix of `{zone}/{zone}/{species}/{tree_id}.json` assets.
    pub asset_base_url: String,
    /// Stored point-cloud units per map meter.
    pub unit_scale: f32,
    /// Height of shadow points above the terrain (m).
    pub ground_bias: f32,
    /// Clamp on shadow ground offset for grazing or overhead sun.
    pub max_shadow_offset: f32,
    pub shadow_point_size: f32,
    pub canopy_point_size: f32,
    pub canopy_opacity: f32,
    /// Season shown before the user picks one.
    pub initial_season: usize,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            unit_scale: FEET_PER_METER,
            ground_bias: 0.1,
            max_shadow_offset: 500.0,
            shadow_point_size: 2.0,
            canopy_point_size: 3.0,
            canopy_opacity: 0.75,
            initial_season: 0,
        }
    }
}

impl ShadeConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ShadeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&json)
    }

    /// Reject values the projector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            return Err(Error::Config(format!("unit_scale must be positive, got {}", self.unit_scale)));
        }
        if !(self.max_shadow_offset.is_finite() && self.max_shadow_offset > 0.0) {
            return Err(Error::Config(format!(
                "max_shadow_offset must be positive, got {}",
                self.max_shadow_offset
            )));
        }
        if !(0.0..=1.0).contains(&self.canopy_opacity) {
            return Err(Error::Config(format!("canopy_opacity must be in [0, 1], got {}", self.canopy_opacity)));
        }
        Ok(())
    }

    pub fn projector(&self) -> ShadowProjector {
        ShadowProjector::new(self.unit_scale, self.ground_bias, self.max_shadow_offset)
    }

    pub fn layer_style(&self) -> LayerStyle {
        LayerStyle {
            unit_scale: self.unit_scale,
            canopy_point_size: self.canopy_point_size,
            canopy_opacity: self.canopy_opacity,
            shadow_point_size: self.shadow_point_size,
        }
    }
}
