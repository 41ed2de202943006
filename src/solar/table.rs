//! Static per-season table of hourly sun positions.

use serde::{Deserialize, Serialize};

use super::position::{DayProfile, SunPosition};
use crate::core::{Error, Result};

/// Season index of the reference summer profile.
pub const SUMMER: usize = 0;
/// Season index of the reference spring/fall profile.
pub const EQUINOX: usize = 1;
/// Season index of the reference winter profile.
pub const WINTER: usize = 2;
/// Season index of the reference "no sun" profile.
pub const NIGHT: usize = 3;

type Sample = (f32, f32, f32, bool);

// (azimuth, altitude, darkness, visible); labels are the 1-based slot number.
const NYC_SUMMER: [Sample; 15] = [
    (63.0, 5.0, 0.3, true),
    (72.0, 16.0, 0.4, true),
    (81.0, 27.0, 0.5, true),
    (90.0, 38.0, 0.6, true),
    (101.0, 49.0, 0.7, true),
    (116.0, 60.0, 0.8, true),
    (141.0, 69.0, 0.9, true),
    (182.0, 73.0, 1.0, true),
    (222.0, 68.0, 0.9, true),
    (245.0, 59.0, 0.8, true),
    (260.0, 48.0, 0.7, true),
    (271.0, 37.0, 0.6, true),
    (280.0, 26.0, 0.5, true),
    (289.0, 15.0, 0.4, true),
    (298.0, 4.0, 0.3, true),
];

const NYC_EQUINOX: [Sample; 15] = [
    (1.0, 1.0, 0.3, false),
    (1.0, 1.0, 0.4, false),
    (99.0, 11.0, 0.5, true),
    (109.0, 22.0, 0.6, true),
    (122.0, 32.0, 0.7, true),
    (137.0, 41.0, 0.8, true),
    (156.0, 47.0, 0.9, true),
    (179.0, 50.0, 1.0, true),
    (201.0, 48.0, 0.9, true),
    (221.0, 42.0, 0.8, true),
    (237.0, 33.0, 0.7, true),
    (249.0, 23.0, 0.6, true),
    (269.0, 12.0, 0.5, true),
    (1.0, 1.0, 0.4, false),
    (1.0, 1.0, 0.3, false),
];

const NYC_WINTER: [Sample; 15] = [
    (1.0, 1.0, 0.0, false),
    (1.0, 1.0, 0.4, false),
    (128.0, 6.0, 0.5, true),
    (139.0, 14.0, 0.6, true),
    (152.0, 20.0, 0.7, true),
    (166.0, 25.0, 0.8, true),
    (181.0, 26.0, 0.9, true),
    (196.0, 24.0, 1.0, true),
    (210.0, 20.0, 0.9, true),
    (223.0, 13.0, 0.8, true),
    (233.0, 5.0, 0.7, true),
    (243.0, 5.0, 0.6, false),
    (1.0, 1.0, 0.5, false),
    (1.0, 1.0, 0.4, false),
    (1.0, 1.0, 0.0, false),
];

fn profile_from(samples: &[Sample]) -> DayProfile {
    DayProfile::new(
        samples
            .iter()
            .enumerate()
            .map(|(i, &(az, alt, dark, visible))| SunPosition::new(az, alt, dark, (i + 1).to_string(), visible))
            .collect(),
    )
}

/// Read-only set of day profiles, one per season.
///
/// The season count is whatever the table was built with; nothing assumes
/// four seasons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolarTable {
    profiles: Vec<DayProfile>,
}

impl SolarTable {
    /// Build a table from explicit profiles.
    pub fn from_profiles(profiles: Vec<DayProfile>) -> Self {
        Self { profiles }
    }

    /// Parse a table from `[[[az, alt, darkness, "label", visible], ...], ...]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: SolarTable = serde_json::from_str(json)?;
        if table.profiles.is_empty() {
            return Err(Error::Config("solar table has no profiles".into()));
        }
        Ok(table)
    }

    /// Reference table for New York City: summer, equinox, winter and a
    /// profile with every hour dark.
    pub fn new_york() -> Self {
        let winter = profile_from(&NYC_WINTER);
        let night = DayProfile::new(
            winter
                .samples()
                .iter()
                .map(|s| SunPosition { visible: false, ..s.clone() })
                .collect(),
        );
        Self::from_profiles(vec![
            profile_from(&NYC_SUMMER),
            profile_from(&NYC_EQUINOX),
            winter,
            night,
        ])
    }

    /// Profile for a season.
    pub fn profile(&self, season: usize) -> Result<&DayProfile> {
        self.profiles.get(season).ok_or(Error::IndexOutOfRange {
            index: season,
            count: self.profiles.len(),
        })
    }

    /// Number of seasons in the table.
    pub fn season_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn profiles(&self) -> &[DayProfile] {
        &self.profiles
    }
}

impl Default for SolarTable {
    fn default() -> Self {
        Self::new_york()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_shape() {
        let table = SolarTable::new_york();
        assert_eq!(table.season_count(), 4);
        for profile in table.profiles() {
            assert_eq!(profile.len(), 15);
        }
        assert_eq!(table.profile(SUMMER).unwrap().visible_count(), 15);
        assert_eq!(table.profile(EQUINOX).unwrap().visible_count(), 11);
        assert_eq!(table.profile(WINTER).unwrap().visible_count(), 9);
        assert_eq!(table.profile(NIGHT).unwrap().visible_count(), 0);
    }

    #[test]
    fn test_labels_are_slot_numbers() {
        let table = SolarTable::new_york();
        let labels: Vec<&str> = table
            .profile(SUMMER)
            .unwrap()
            .samples()
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels.first(), Some(&"1"));
        assert_eq!(labels.last(), Some(&"15"));
    }

    #[test]
    fn test_out_of_range() {
        let table = SolarTable::new_york();
        match table.profile(4) {
            Err(Error::IndexOutOfRange { index, count }) => {
                assert_eq!(index, 4);
                assert_eq!(count, 4);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_season_count_follows_data() {
        let json = r#"[
            [[90, 20, 0.5, "a", true], [180, 40, 1.0, "b", true]],
            [[0, 0, 0, "a", false]]
        ]"#;
        let table = SolarTable::from_json_str(json).unwrap();
        assert_eq!(table.season_count(), 2);
        assert_eq!(table.profile(0).unwrap().len(), 2);
        assert!(table.profile(2).is_err());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(SolarTable::from_json_str("[]"), Err(Error::Config(_))));
        assert!(matches!(SolarTable::from_json_str("{}"), Err(Error::Json(_))));
    }
}
