//! GIOŚ API response types.
//!
//! Only the fields we use are deserialized; the API returns many more.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::domain::{SensorId, StationId};

/// A monitoring station as listed by `station/findAll`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: StationId,
    pub station_name: String,
    /// Some stations are listed without a city.
    pub city: Option<CityDto>,
}

/// City a station belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct CityDto {
    pub name: String,
}

/// A sensor installed at a station.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorDto {
    pub id: SensorId,
}

/// Recent readings of a single sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorData {
    /// Pollutant name, e.g. `"PM10"` or `"PM2.5"`.
    pub key: String,
    pub values: Vec<Reading>,
}

/// One reading. The API reports readings that are not available yet as `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading {
    #[serde(deserialize_with = "deserialize_reading_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Index levels of a station, keyed by `<pollutant>IndexLevel`.
///
/// The document also carries unrelated keys (`id`, `stCalcDate`, ...) and
/// `null` entries for pollutants without a computed index, so it is kept
/// untyped and queried with [`IndexLevels::level_for`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct IndexLevels(HashMap<String, serde_json::Value>);

impl IndexLevels {
    /// Look up the index level id for a pollutant as named by [`SensorData::key`].
    ///
    /// Returns `None` if the station has no index for the pollutant or the
    /// entry is malformed.
    pub fn level_for(&self, pollutant: &str) -> Option<i32> {
        let key = format!("{}IndexLevel", normalize_pollutant_key(pollutant));
        let id = self.0.get(&key)?.get("id")?.as_i64()?;
        i32::try_from(id).ok()
    }
}

/// Normalize a pollutant name to the form used in index level keys.
///
/// Lowercases and strips dots and spaces, so `"PM2.5"` becomes `"pm25"`.
pub fn normalize_pollutant_key(pollutant: &str) -> String {
    pollutant
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != ' ')
        .collect()
}

/// Parse a reading date, accepting both `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`.
pub(crate) fn parse_reading_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_reading_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_reading_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid reading date: {raw}")))
}
