//! Assembly of per-station air conditions.
//!
//! Each station needs one sensor list request, one data request per sensor
//! and one index level request. Failures are contained as tightly as
//! possible: a broken sensor is skipped, a broken station reports nothing,
//! and the remaining stations are still returned.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Condition, Measurement, SensorId, StationId};
use crate::gios::{GiosClient, GiosError, IndexLevels, Reading};
use crate::stations::StationDirectory;

/// Errors while assembling conditions.
///
/// Cloneable so that a single failed population can be handed to every
/// caller waiting on the same cache entry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConditionError {
    /// The city is not (or no longer) in the station directory
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// A sensor has readings, but none of them carries a value
    #[error("sensor {sensor_id} has no readings with a value")]
    NoValidValue { sensor_id: SensorId },

    /// GIOŚ request failed
    #[error(transparent)]
    Gios(Arc<GiosError>),
}

impl From<GiosError> for ConditionError {
    fn from(err: GiosError) -> Self {
        ConditionError::Gios(Arc::new(err))
    }
}

/// Index levels of one station, fetched on first use.
///
/// A station whose index cannot be fetched or parsed has no levels at all,
/// so every sensor is skipped.
enum StationLevels {
    Pending,
    Loaded(IndexLevels),
    Unavailable,
}

/// Builds [`Condition`]s from GIOŚ lookups. Uncached.
pub struct ConditionService {
    client: GiosClient,
    directory: Arc<StationDirectory>,
}

impl ConditionService {
    pub fn new(client: GiosClient, directory: Arc<StationDirectory>) -> Self {
        Self { client, directory }
    }

    /// Conditions at every station of a city, in directory order.
    ///
    /// Only directory failures and unknown cities are errors; a station that
    /// fails is logged and reported with no measurements.
    pub async fn assemble(&self, city: &str) -> Result<Vec<Condition>, ConditionError> {
        let snapshot = self.directory.refresh().await?;
        let stations = snapshot
            .stations(city)
            .ok_or_else(|| ConditionError::UnknownCity(city.to_string()))?;

        let mut conditions = Vec::with_capacity(stations.len());
        for station in stations {
            let measurements = match self.get_measurements(station.id).await {
                Ok(measurements) => measurements,
                Err(e) => {
                    warn!(station = %station, error = %e, "failed to fetch station sensors");
                    Vec::new()
                }
            };
            conditions.push(Condition::new(station.clone(), measurements));
        }

        Ok(conditions)
    }

    /// Newest measurement of every usable sensor at a station.
    ///
    /// Fails only if the sensor list itself cannot be fetched.
    pub async fn get_measurements(
        &self,
        station_id: StationId,
    ) -> Result<Vec<Measurement>, GiosError> {
        let sensors = self.client.fetch_sensors(station_id).await?;
        let mut levels = StationLevels::Pending;
        let mut measurements = Vec::new();

        for sensor_id in sensors {
            match self.measure(station_id, sensor_id, &mut levels).await {
                Ok(Some(measurement)) => measurements.push(measurement),
                Ok(None) => {}
                Err(e) => warn!(station_id, sensor_id, error = %e, "skipping sensor"),
            }
        }

        Ok(measurements)
    }

    async fn measure(
        &self,
        station_id: StationId,
        sensor_id: SensorId,
        levels: &mut StationLevels,
    ) -> Result<Option<Measurement>, ConditionError> {
        let data = self.client.fetch_sensor_data(sensor_id).await?;
        if data.values.is_empty() {
            debug!(station_id, sensor_id, pollutant = %data.key, "sensor has no readings");
            return Ok(None);
        }

        let Some(index_level) = self.index_level(station_id, &data.key, levels).await else {
            debug!(station_id, sensor_id, pollutant = %data.key, "no index level for pollutant");
            return Ok(None);
        };

        let reading =
            newest_reading(&data.values).ok_or(ConditionError::NoValidValue { sensor_id })?;

        Ok(reading.value.map(|value| Measurement {
            pollutant: data.key,
            index_level,
            value,
            measured_at: reading.date,
        }))
    }

    async fn index_level(
        &self,
        station_id: StationId,
        pollutant: &str,
        levels: &mut StationLevels,
    ) -> Option<i32> {
        if matches!(levels, StationLevels::Pending) {
            *levels = match self.client.fetch_index_levels(station_id).await {
                Ok(loaded) => StationLevels::Loaded(loaded),
                Err(e) => {
                    warn!(station_id, error = %e, "index levels unavailable");
                    StationLevels::Unavailable
                }
            };
        }

        match levels {
            StationLevels::Loaded(loaded) => loaded.level_for(pollutant),
            _ => None,
        }
    }
}

/// The most recent reading that carries a value.
///
/// Among readings with the same date, the one listed first wins.
pub fn newest_reading(readings: &[Reading]) -> Option<&Reading> {
    readings
        .iter()
        .rev()
        .filter(|r| r.value.is_some())
        .max_by_key(|r| r.date)
}
