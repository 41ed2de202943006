//! Sun samples and day profiles.

use serde::{Deserialize, Serialize};

/// Sun position for one sampled hour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSunSample", into = "RawSunSample")]
pub struct SunPosition {
    /// Compass azimuth in degrees, clockwise from north.
    pub azimuth: f32,
    /// Altitude above the horizon in degrees.
    pub altitude: f32,
    /// Shadow opacity weight in `[0, 1]`.
    pub darkness: f32,
    /// Slot label, used to name the layer.
    pub label: String,
    /// Whether a shadow is drawn for this hour.
    pub visible: bool,
}

/// Wire form `[azimuth, altitude, darkness, "label", visible]`.
#[derive(Serialize, Deserialize)]
struct RawSunSample(f32, f32, f32, String, bool);

impl From<RawSunSample> for SunPosition {
    fn from(raw: RawSunSample) -> Self {
        Self {
            azimuth: raw.0,
            altitude: raw.1,
            darkness: raw.2.clamp(0.0, 1.0),
            label: raw.3,
            visible: raw.4,
        }
    }
}

impl From<SunPosition> for RawSunSample {
    fn from(sun: SunPosition) -> Self {
        RawSunSample(sun.azimuth, sun.altitude, sun.darkness, sun.label, sun.visible)
    }
}

impl SunPosition {
    pub fn new(azimuth: f32, altitude: f32, darkness: f32, label: impl Into<String>, visible: bool) -> Self {
        Self {
            azimuth,
            altitude,
            darkness: darkness.clamp(0.0, 1.0),
            label: label.into(),
            visible,
        }
    }

    /// A sample for an hour the sun is down.
    pub fn hidden(label: impl Into<String>) -> Self {
        Self::new(0.0, 0.0, 0.0, label, false)
    }
}

/// Ordered hourly sun samples across one representative day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayProfile {
    samples: Vec<SunPosition>,
}

impl DayProfile {
    pub fn new(samples: Vec<SunPosition>) -> Self {
        Self { samples }
    }

    /// All samples, in hour order.
    pub fn samples(&self) -> &[SunPosition] {
        &self.samples
    }

    /// Number of sampled hours (visible or not).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples that cast a shadow, paired with their slot index.
    pub fn visible_slots(&self) -> impl Iterator<Item = (usize, &SunPosition)> {
        self.samples.iter().enumerate().filter(|(_, s)| s.visible)
    }

    /// Number of hours with direct sun.
    pub fn visible_count(&self) -> usize {
        self.samples.iter().filter(|s| s.visible).count()
    }
}
