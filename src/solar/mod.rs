//! Solar position table.
//!
//! A [`SolarTable`] holds one [`DayProfile`] per season. Each profile is an
//! ordered run of hourly [`SunPosition`] samples; samples flagged invisible
//! mark hours with no direct sun and produce no shadow layer.

pub mod position;
pub mod table;

pub use position::{DayProfile, SunPosition};
pub use table::SolarTable;
