//! Core type aliases and re-exports

pub use glam::Vec3;

/// Standard Result type for treeshade
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Feet per meter. Point clouds are stored in feet; the map frame is metric.
pub const FEET_PER_METER: f32 = 3.28;

/// Geographic anchor of a tree on the map, WGS84 degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoCoord {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoord {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// RGBA color, 0-255 per channel.
pub type Rgba = [u8; 4];

/// Round and clamp a floating channel value into `[0, 255]`.
///
/// NaN maps to 0.
#[inline]
pub fn channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
