//! Allometric crown estimate from trunk diameter.

use std::f32::consts::PI;

/// Crown diameter (m) per square meter of trunk basal area.
const CROWN_PER_BASAL_AREA: f32 = 28.2;
/// Crown diameter (m) of a sapling with negligible basal area.
const CROWN_INTERCEPT: f32 = 7.0;

/// Expected canopy extent, in stored units, of a tree whose trunk diameter at
/// breast height is `trunk_diameter_in` inches.
///
/// The trunk's basal area drives a linear crown model in meters; the result
/// is halved and converted back to stored units with `unit_scale`.
pub fn expected_canopy_diameter(trunk_diameter_in: f32, unit_scale: f32) -> f32 {
    let trunk_radius_m = trunk_diameter_in.max(0.0) / 12.0 / unit_scale / 2.0;
    let basal_area = PI * trunk_radius_m * trunk_radius_m;
    (basal_area * CROWN_PER_BASAL_AREA + CROWN_INTERCEPT) / 2.0 * unit_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FEET_PER_METER;

    #[test]
    fn test_sapling_floor() {
        let d = expected_canopy_diameter(0.0, FEET_PER_METER);
        assert!((d - 11.48).abs() < 1e-4, "d = {d}");
    }

    #[test]
    fn test_one_foot_trunk() {
        let d = expected_canopy_diameter(12.0, FEET_PER_METER);
        assert!((d - 14.856).abs() < 1e-2, "d = {d}");
    }

    #[test]
    fn test_monotonic_in_trunk() {
        let mut prev = 0.0;
        for dbh in 0..60 {
            let d = expected_canopy_diameter(dbh as f32, FEET_PER_METER);
            assert!(d >= prev);
            prev = d;
        }
    }

    #[test]
    fn test_negative_trunk_is_sapling() {
        assert_eq!(
            expected_canopy_diameter(-5.0, FEET_PER_METER),
            expected_canopy_diameter(0.0, FEET_PER_METER)
        );
    }
}
