//! GIOŚ air quality API client.
//!
//! This module provides an HTTP client for the public API of the Polish
//! Chief Inspectorate of Environmental Protection (GIOŚ), which publishes
//! monitoring stations, their sensors and current readings.
//!
//! Four read-only endpoints are used:
//! - `station/findAll` lists every monitoring station with its city
//! - `station/sensors/{stationId}` lists the sensors installed at a station
//! - `data/getData/{sensorId}` returns recent readings for one sensor
//! - `aqindex/getIndex/{stationId}` returns the air quality index levels
//!   computed for a station, one entry per pollutant

mod client;
mod error;
mod types;

pub use client::{GiosClient, GiosConfig};
pub use error::GiosError;
#[cfg(test)]
pub(crate) use types::parse_reading_date;
pub use types::{
    CityDto, IndexLevels, Reading, SensorData, SensorDto, StationDto, normalize_pollutant_key,
};
