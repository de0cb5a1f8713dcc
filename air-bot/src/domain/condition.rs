//! Measurement and per-station condition types.

use chrono::NaiveDateTime;

use super::Station;

/// The newest reading of one pollutant at a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Pollutant name as reported by the sensor, e.g. `"PM2.5"`.
    pub pollutant: String,
    /// Air quality index level; 0 is best, 4 and above is worst.
    pub index_level: i32,
    /// Concentration in µg/m³.
    pub value: f64,
    /// When the reading was taken.
    pub measured_at: NaiveDateTime,
}

/// Current conditions at a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub station: Station,
    pub measurements: Vec<Measurement>,
}

impl Condition {
    pub fn new(station: Station, measurements: Vec<Measurement>) -> Self {
        Self {
            station,
            measurements,
        }
    }

    /// Whether the station reported nothing usable.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
