//! Shadow Projector.
//!
//! Casts each canopy point onto the ground along the sun direction. The
//! altitude convention is `tan(-altitude)` throughout: for a sun above the
//! horizon the tangent is negative, so the offset points away from the sun
//! and grows as the sun drops. Degenerate angles never produce non-finite
//! output; the offset is clamped to `max_offset`.

use glam::Vec3;
use rayon::prelude::*;

use crate::cloud::CanopyPoint;
use crate::core::{FEET_PER_METER, Rgba, channel};
use crate::solar::SunPosition;

/// Clouds at least this large are projected on the rayon pool.
const PARALLEL_THRESHOLD: usize = 4096;

/// A projected shadow sample, in meters relative to the trunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowPoint {
    pub position: Vec3,
    pub color: Rgba,
}

/// Projects canopy points to ground-plane shadow points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowProjector {
    /// Stored units per map meter.
    pub unit_scale: f32,
    /// Height of every shadow point above the terrain.
    pub ground_bias: f32,
    /// Largest ground offset produced for any angle.
    pub max_offset: f32,
}

impl Default for ShadowProjector {
    fn default() -> Self {
        Self {
            unit_scale: FEET_PER_METER,
            ground_bias: 0.1,
            max_offset: 500.0,
        }
    }
}

impl ShadowProjector {
    pub fn new(unit_scale: f32, ground_bias: f32, max_offset: f32) -> Self {
        Self {
            unit_scale,
            ground_bias,
            max_offset: max_offset.abs(),
        }
    }

    /// Signed ground offset of a point at `height` for a sun at
    /// `altitude_deg`.
    ///
    /// At the horizon the tangent is zero and the offset is clamped to
    /// `-max_offset` (a zero height there gives 0). Overhead the f32 tangent is
    /// huge but finite, so the offset goes to about 0. The result always lies
    /// in `[-max_offset, max_offset]`.
    pub fn shadow_offset(&self, height: f32, altitude_deg: f32) -> f32 {
        let tan_altitude = (-altitude_deg.to_radians()).tan();
        let offset = height / tan_altitude;
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(-self.max_offset, self.max_offset)
    }

    /// Project one point for a sun position with the given darkness.
    pub fn project(&self, point: &CanopyPoint, sun: &SunPosition, darkness: f32) -> ShadowPoint {
        let azimuth = sun.azimuth.to_radians();
        let offset = self.shadow_offset(point.z, sun.altitude);

        let position = Vec3::new(
            point.x / self.unit_scale + offset * azimuth.sin(),
            point.y / self.unit_scale + offset * azimuth.cos(),
            self.ground_bias,
        );

        ShadowPoint {
            position,
            color: shade(point.band(), darkness),
        }
    }

    /// Project a whole cloud using the sample's own darkness weight.
    ///
    /// Output order matches input order, one shadow point per canopy point.
    pub fn project_cloud(&self, points: &[CanopyPoint], sun: &SunPosition) -> Vec<ShadowPoint> {
        if points.len() >= PARALLEL_THRESHOLD {
            points.par_iter().map(|p| self.project(p, sun, sun.darkness)).collect()
        } else {
            points.iter().map(|p| self.project(p, sun, sun.darkness)).collect()
        }
    }
}

/// Grey shadow color; darker and more opaque for wide height bands under a
/// strong sun.
fn shade(band: f32, darkness: f32) -> Rgba {
    let weight = darkness * darkness * band;
    let grey = channel(255.0 - 100.0 * weight);
    [grey, grey, grey, channel(150.0 * weight)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32, z: f32) -> CanopyPoint {
        CanopyPoint::new(x, y, z, 1.0, 0.2, 0.8)
    }

    fn finite(p: &ShadowPoint) -> bool {
        p.position.is_finite()
    }

    #[test]
    fn test_shadow_points_away_from_sun() {
        let projector = ShadowProjector::default();
        // Sun due south at 45°: shadow falls north by the point's height
        let sun = SunPosition::new(180.0, 45.0, 1.0, "noon", true);
        let shadow = projector.project(&point(0.0, 0.0, 10.0), &sun, 1.0);

        assert!(shadow.position.x.abs() < 1e-4);
        assert!((shadow.position.y - 10.0).abs() < 1e-3, "y = {}", shadow.position.y);
        assert_eq!(shadow.position.z, 0.1);
    }

    #[test]
    fn test_horizontal_offset_scaled() {
        let projector = ShadowProjector::default();
        let sun = SunPosition::new(90.0, 45.0, 1.0, "am", true);
        let shadow = projector.project(&point(32.8, -6.56, 0.0), &sun, 1.0);

        assert!((shadow.position.x - 10.0).abs() < 1e-4);
        assert!((shadow.position.y + 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_lower_sun_longer_shadow() {
        let projector = ShadowProjector::default();
        let high = projector.shadow_offset(20.0, 60.0).abs();
        let low = projector.shadow_offset(20.0, 15.0).abs();
        assert!(low > high);
    }

    #[test]
    fn test_finite_for_all_open_altitudes() {
        let projector = ShadowProjector::default();
        let points = [point(0.0, 0.0, 0.0), point(-40.0, 25.0, 55.0), point(1e4, -1e4, 1e4)];
        for tenth in 1..900 {
            let altitude = tenth as f32 / 10.0;
            for azimuth in (0..360).step_by(15) {
                let sun = SunPosition::new(azimuth as f32, altitude, 0.7, "t", true);
                for p in &points {
                    let s = projector.project(p, &sun, 0.7);
                    assert!(finite(&s), "non-finite at alt {altitude} az {azimuth}: {:?}", s);
                }
            }
        }
    }

    #[test]
    fn test_overhead_sun_offset_near_zero() {
        let projector = ShadowProjector::default();
        let offset = projector.shadow_offset(30.0, 90.0);
        assert!(offset.is_finite());
        assert!(offset.abs() < 1e-3);

        let sun = SunPosition::new(180.0, 90.0, 1.0, "zenith", true);
        assert!(finite(&projector.project(&point(3.0, 4.0, 30.0), &sun, 1.0)));
    }

    #[test]
    fn test_horizon_sun_clamped() {
        let projector = ShadowProjector::default();
        let offset = projector.shadow_offset(30.0, 0.0);
        assert_eq!(offset.abs(), projector.max_offset);
        assert_eq!(projector.shadow_offset(0.0, 0.0), 0.0);

        let sun = SunPosition::new(270.0, 0.0, 0.3, "dusk", true);
        assert!(finite(&projector.project(&point(3.0, 4.0, 30.0), &sun, 0.3)));
    }

    #[test]
    fn test_project_is_pure() {
        let projector = ShadowProjector::default();
        let sun = SunPosition::new(137.0, 41.0, 0.8, "6", true);
        let p = point(12.5, -7.25, 33.3);

        let a = projector.project(&p, &sun, 0.8);
        let b = projector.project(&p, &sun, 0.8);
        assert_eq!(a.position.to_array().map(f32::to_bits), b.position.to_array().map(f32::to_bits));
        assert_eq!(a.color, b.color);
    }

    #[test]
    fn test_shading_formula() {
        let projector = ShadowProjector::default();
        let sun = SunPosition::new(180.0, 45.0, 1.0, "8", true);
        let p = CanopyPoint::new(0.0, 0.0, 10.0, 1.0, 0.0, 1.0);

        assert_eq!(projector.project(&p, &sun, 1.0).color, [155, 155, 155, 150]);
        assert_eq!(projector.project(&p, &sun, 0.5).color, [230, 230, 230, 38]);
        assert_eq!(projector.project(&p, &sun, 0.0).color, [255, 255, 255, 0]);
    }

    #[test]
    fn test_shading_channels_in_range() {
        for d in 0..=20 {
            let darkness = d as f32 / 20.0;
            for b in 0..=20 {
                let band = b as f32 / 20.0;
                let [r, g, bl, a] = shade(band, darkness);
                assert_eq!(r, g);
                assert_eq!(g, bl);
                assert!(r >= 155);
                assert!(a <= 150);
            }
        }
        // Inverted band clamps rather than wrapping
        assert_eq!(shade(-1.0, 1.0), [255, 255, 255, 0]);
    }

    #[test]
    fn test_project_cloud_preserves_order_and_count() {
        let projector = ShadowProjector::default();
        let sun = SunPosition::new(200.0, 30.0, 0.9, "9", true);
        let points: Vec<CanopyPoint> = (0..5000)
            .map(|i| point(i as f32 * 0.01, 0.0, (i % 50) as f32))
            .collect();

        let shadows = projector.project_cloud(&points, &sun);
        assert_eq!(shadows.len(), points.len());
        for (i, s) in shadows.iter().enumerate().step_by(997) {
            assert_eq!(*s, projector.project(&points[i], &sun, 0.9));
        }
    }
}
