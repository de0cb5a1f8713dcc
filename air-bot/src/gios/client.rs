//! GIOŚ HTTP client.
//!
//! Every lookup is a single GET with a fixed timeout. There are no retries;
//! callers decide which failures to recover from.

use serde::de::DeserializeOwned;

use crate::domain::{SensorId, StationId};

use super::error::GiosError;
use super::types::{IndexLevels, SensorData, SensorDto, StationDto};

/// Default base URL for the GIOŚ REST API.
const DEFAULT_BASE_URL: &str = "http://api.gios.gov.pl/pjp-api/rest";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an unparseable body to keep in errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the GIOŚ client.
#[derive(Debug, Clone)]
pub struct GiosConfig {
    /// Base URL for the API (defaults to production GIOŚ)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GiosConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GiosConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// GIOŚ API client.
#[derive(Debug, Clone)]
pub struct GiosClient {
    http: reqwest::Client,
    base_url: String,
}

impl GiosClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GiosConfig) -> Result<Self, GiosError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every monitoring station.
    pub async fn fetch_all_stations(&self) -> Result<Vec<StationDto>, GiosError> {
        self.get_json("station/findAll").await
    }

    /// Fetch the ids of the sensors installed at a station.
    pub async fn fetch_sensors(&self, station_id: StationId) -> Result<Vec<SensorId>, GiosError> {
        let sensors: Vec<SensorDto> = self
            .get_json(&format!("station/sensors/{station_id}"))
            .await?;
        Ok(sensors.into_iter().map(|s| s.id).collect())
    }

    /// Fetch recent readings of a sensor.
    pub async fn fetch_sensor_data(&self, sensor_id: SensorId) -> Result<SensorData, GiosError> {
        self.get_json(&format!("data/getData/{sensor_id}")).await
    }

    /// Fetch the air quality index levels computed for a station.
    pub async fn fetch_index_levels(&self, station_id: StationId) -> Result<IndexLevels, GiosError> {
        self.get_json(&format!("aqindex/getIndex/{station_id}"))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GiosError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GiosError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GiosError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}
