/// Service configuration loader - parses seismicity.toml
///
/// Keeps the catalogue location, the default search window and the
/// analysis knobs out of code, so they can be adjusted without recompiling.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::analysis::binning::MAGNITUDE_BIN_WIDTH;
use crate::analysis::temporal::MAJOR_EVENT_MAGNITUDE;
use crate::ingest::catalogue::parse_timestamp_ms;
use crate::ingest::fdsn::FDSN_EVENT_BASE_URL;
use crate::model::{ConfigError, QueryParameters};

pub const DEFAULT_CONFIG_PATH: &str = "seismicity.toml";

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub catalogue: CatalogueConfig,
    pub query: QueryConfig,
    pub analysis: AnalysisConfig,
    pub feed: FeedConfig,
}

/// Where the bundled catalogue lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub path: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            path: "data/isc-gem-cat.csv".to_string(),
        }
    }
}

/// Default search window; dates are `YYYY-MM-DD` (midnight UTC) or RFC 3339
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub min_magnitude: f64,
    pub start_date: String,
    pub end_date: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        // Las Vegas, 500 km, M2.5+, calendar year 2020
        Self {
            latitude: 36.1699,
            longitude: -115.1398,
            radius_km: 500.0,
            min_magnitude: 2.5,
            start_date: "2020-01-01".to_string(),
            end_date: "2021-01-01".to_string(),
        }
    }
}

impl QueryConfig {
    /// Converts to engine parameters. Does not validate ranges; that
    /// happens when the query runs.
    ///
    /// # Errors
    /// `ConfigError::InvalidDate` if either date cannot be parsed.
    pub fn to_parameters(&self) -> Result<QueryParameters, ConfigError> {
        let parse = |raw: &str| {
            parse_timestamp_ms(raw).ok_or_else(|| ConfigError::InvalidDate(raw.to_string()))
        };

        Ok(QueryParameters {
            center_lat: self.latitude,
            center_lon: self.longitude,
            radius_km: self.radius_km,
            min_magnitude: self.min_magnitude,
            start_ms: parse(&self.start_date)?,
            end_ms: parse(&self.end_date)?,
        })
    }
}

/// Chart/statistics settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub magnitude_bin_width: f64,
    pub major_event_magnitude: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            magnitude_bin_width: MAGNITUDE_BIN_WIDTH,
            major_event_magnitude: MAJOR_EVENT_MAGNITUDE,
        }
    }
}

/// Live feed endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: FDSN_EVENT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Parses configuration from TOML text. Missing sections and keys take
/// their defaults.
pub fn parse_config(contents: &str, origin: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Toml {
        path: origin.to_string(),
        source,
    })
}

/// Loads configuration from `path`.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    parse_config(&contents, &display)
}

/// Loads `seismicity.toml` from the current working directory (project
/// root when running via `cargo run`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}
