//! Canopy point samples and the JSON row codec.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single canopy sample, stored in feet relative to the trunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 6]", into = "[f32; 6]")]
pub struct CanopyPoint {
    /// East offset from the trunk.
    pub x: f32,
    /// North offset from the trunk.
    pub y: f32,
    /// Height above ground.
    pub z: f32,
    /// Normalized intensity channel.
    pub c: f32,
    /// Lower bound of the point's height band, as a fraction.
    pub h_low: f32,
    /// Upper bound of the point's height band, as a fraction.
    pub h_high: f32,
}

impl CanopyPoint {
    pub const fn new(x: f32, y: f32, z: f32, c: f32, h_low: f32, h_high: f32) -> Self {
        Self { x, y, z, c, h_low, h_high }
    }

    /// Width of the height band, drives shading intensity.
    #[inline]
    pub fn band(&self) -> f32 {
        self.h_high - self.h_low
    }
}

/// A row value that has no finite `f32` representation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("point value {0} is out of f32 range")]
pub struct OutOfRange(pub f64);

impl TryFrom<[f64; 6]> for CanopyPoint {
    type Error = OutOfRange;

    fn try_from(row: [f64; 6]) -> Result<Self, Self::Error> {
        let mut narrow = [0.0f32; 6];
        for (slot, value) in narrow.iter_mut().zip(row) {
            *slot = value as f32;
            if !slot.is_finite() {
                return Err(OutOfRange(value));
            }
        }
        let [x, y, z, c, h_low, h_high] = narrow;
        Ok(Self::new(x, y, z, c, h_low, h_high))
    }
}

impl From<CanopyPoint> for [f32; 6] {
    fn from(p: CanopyPoint) -> Self {
        [p.x, p.y, p.z, p.c, p.h_low, p.h_high]
    }
}

/// Decode a point-cloud asset: a JSON array of numeric 6-tuples
/// `[x, y, z, c, h_low, h_high]`.
///
/// Anything else (a non-array document, a row of the wrong length, a
/// non-numeric cell, a number too large for `f32`) is rejected as a whole.
pub fn decode_points(bytes: &[u8]) -> Result<Vec<CanopyPoint>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
