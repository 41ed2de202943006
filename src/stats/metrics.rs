//! Canopy Statistics Engine.
//!
//! Height and density are measured inside a square window centered on the
//! trunk, half the expected canopy diameter on a side, so that neighboring
//! crowns in the same cloud do not inflate the figures.

use serde::{Deserialize, Serialize};

use crate::cloud::CanopyPoint;

/// Summary of the canopy points inside the trunk window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanopyMetrics {
    /// Points inside the window.
    pub count: usize,
    /// Highest `z` in the window.
    pub max_height: f32,
    /// Lowest `z` in the window.
    pub min_height: f32,
    /// `(max - min) * unit_scale`.
    pub height: f32,
    /// `height / count`.
    pub density: f32,
}

/// Measure the canopy around the trunk.
///
/// Returns `None` when no point falls inside the window (including a
/// non-positive or NaN diameter); the caller reports that as "no data".
pub fn compute_metrics(points: &[CanopyPoint], expected_diameter: f32, unit_scale: f32) -> Option<CanopyMetrics> {
    let half_window = expected_diameter / 4.0;

    let mut count = 0usize;
    let mut max_z = f32::NEG_INFINITY;
    let mut min_z = f32::INFINITY;

    for p in points.iter().filter(|p| p.x.abs() <= half_window && p.y.abs() <= half_window) {
        count += 1;
        max_z = max_z.max(p.z);
        min_z = min_z.min(p.z);
    }

    if count == 0 {
        return None;
    }

    let height = (max_z - min_z) * unit_scale;
    Some(CanopyMetrics {
        count,
        max_height: max_z,
        min_height: min_z,
        height,
        density: height / count as f32,
    })
}
