//! Coloring and placement of the tree's own point-cloud layer.

use glam::Vec3;

use crate::cloud::CanopyPoint;
use crate::core::{Rgba, channel};

/// Map-frame position of a canopy point. Horizontal offsets are converted to
/// meters; height keeps the stored value so the drawn crown matches the
/// heights the shadow projection uses.
#[inline]
pub fn canopy_position(point: &CanopyPoint, unit_scale: f32) -> Vec3 {
    Vec3::new(point.x / unit_scale, point.y / unit_scale, point.z)
}

/// Green-tinted color from the intensity channel; wider height bands read
/// greener and more opaque.
pub fn canopy_color(point: &CanopyPoint) -> Rgba {
    let c = point.c;
    let band = point.band();
    [
        channel(c * 255.0),
        channel(c * 125.0 + c * 225.0 * (band + 1.0)),
        channel(c * 255.0),
        channel(100.0 * band + 100.0),
    ]
}
