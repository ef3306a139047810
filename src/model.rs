/// Shared data types for the seismicity service.
///
/// Everything downstream of ingest works on `EarthquakeEvent`; the raw
/// catalogue shapes (ISC-GEM CSV rows, GeoJSON feed features) never leak
/// past the `ingest` module. Query inputs and analysis outputs are plain
/// values recomputed per query.

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Earthquake events
// ---------------------------------------------------------------------------

/// A single catalogued earthquake.
///
/// Construct through [`EarthquakeEvent::new`], which enforces the record
/// invariants: finite magnitude and coordinates, non-negative depth. Fields
/// are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeEvent {
    id: String,
    magnitude: f64,
    latitude: f64,
    longitude: f64,
    depth_km: f64,
    timestamp_ms: i64,
    place: String,
}

impl EarthquakeEvent {
    /// Builds an event, returning `None` if magnitude, latitude or longitude
    /// is not a finite number.
    ///
    /// A missing or non-finite depth becomes 0 km, and negative depths
    /// (hypocentres above the reference datum, as some live feeds report)
    /// are clamped to 0. An empty `place` is replaced by the derived
    /// coordinate label.
    pub fn new(
        id: impl Into<String>,
        magnitude: f64,
        latitude: f64,
        longitude: f64,
        depth_km: Option<f64>,
        timestamp_ms: i64,
        place: Option<String>,
    ) -> Option<Self> {
        if !(magnitude.is_finite() && latitude.is_finite() && longitude.is_finite()) {
            return None;
        }

        let depth_km = depth_km
            .filter(|d| d.is_finite())
            .map(|d| d.max(0.0))
            .unwrap_or(0.0);

        let place = place
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| coordinate_label(latitude, longitude));

        Some(Self {
            id: id.into(),
            magnitude,
            latitude,
            longitude,
            depth_km,
            timestamp_ms,
            place,
        })
    }

    /// Catalogue identifier (ordinal index when the source had none).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Moment magnitude (Mw).
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Focal depth in km, downward positive.
    pub fn depth_km(&self) -> f64 {
        self.depth_km
    }

    /// Origin time, epoch milliseconds UTC.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    /// Short display title, e.g. `"M 6.1 - 10km SW of Tokyo"`, or
    /// `"M 6.1 - 35.69°, 139.69°"` when the source had no place name.
    pub fn title(&self) -> String {
        format!("M {:.1} - {}", self.magnitude, self.place)
    }
}

/// `"lat°, lon°"` with two decimals, used when a source has no place name.
pub fn coordinate_label(latitude: f64, longitude: f64) -> String {
    format!("{:.2}°, {:.2}°", latitude, longitude)
}

// ---------------------------------------------------------------------------
// Query input
// ---------------------------------------------------------------------------

/// Search window applied by the query engine. Time bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryParameters {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_km: f64,
    pub min_magnitude: f64,
    pub start_ms: i64,
    pub end_ms: i64,
}

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

/// One point of the cumulative frequency-magnitude curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GRPoint {
    pub magnitude: f64,
    pub log10_cumulative_count: f64,
}

/// A histogram bucket together with the events that fell into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub range_min: f64,
    pub range_max: f64,
    pub label: String,
    pub count: usize,
    pub members: Vec<EarthquakeEvent>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejected query parameters. Raised before any event is examined.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("center coordinates must be finite (got lat={lat}, lon={lon})")]
    NonFiniteCenter { lat: f64, lon: f64 },

    #[error("radius must be a positive finite distance in km (got {0})")]
    InvalidRadius(f64),

    #[error("minimum magnitude must be finite (got {0})")]
    NonFiniteMagnitude(f64),

    #[error("start time {start_ms} is after end time {end_ms}")]
    InvertedTimeWindow { start_ms: i64, end_ms: i64 },
}

/// Failures reading the live event feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {0}")]
    Status(u16),

    #[error("feed JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures loading `seismicity.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid date '{0}' (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate(String),
}

/// Histogram layouts that cannot produce bins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinningError {
    #[error("bin width must be positive and finite (got {0})")]
    InvalidWidth(f64),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_finite_magnitude_and_coordinates() {
        assert!(EarthquakeEvent::new("a", f64::NAN, 10.0, 20.0, None, 0, None).is_none());
        assert!(EarthquakeEvent::new("a", 5.0, f64::INFINITY, 20.0, None, 0, None).is_none());
        assert!(EarthquakeEvent::new("a", 5.0, 10.0, f64::NAN, None, 0, None).is_none());
    }

    #[test]
    fn test_new_defaults_missing_depth_to_zero() {
        let event = EarthquakeEvent::new("a", 5.0, 10.0, 20.0, None, 0, None)
            .expect("valid event");
        assert_eq!(event.depth_km(), 0.0);

        let event = EarthquakeEvent::new("a", 5.0, 10.0, 20.0, Some(f64::NAN), 0, None)
            .expect("valid event");
        assert_eq!(event.depth_km(), 0.0);
    }

    #[test]
    fn test_new_clamps_negative_depth() {
        let event = EarthquakeEvent::new("a", 2.1, 19.4, -155.3, Some(-1.8), 0, None)
            .expect("valid event");
        assert_eq!(event.depth_km(), 0.0);
    }

    #[test]
    fn test_place_falls_back_to_coordinate_label() {
        let event = EarthquakeEvent::new("a", 5.0, 35.6895, 139.6917, Some(10.0), 0, None)
            .expect("valid event");
        assert_eq!(event.place(), "35.69°, 139.69°");

        let event = EarthquakeEvent::new("a", 5.0, 1.0, 2.0, None, 0, Some("  ".to_string()))
            .expect("valid event");
        assert_eq!(event.place(), "1.00°, 2.00°");
    }

    #[test]
    fn test_title_formats_magnitude_and_coordinates() {
        let event = EarthquakeEvent::new("a", 6.14, -12.5, 45.0, Some(10.0), 0, None)
            .expect("valid event");
        assert_eq!(event.title(), "M 6.1 - -12.50°, 45.00°");
    }

    #[test]
    fn test_title_uses_place_name_when_present() {
        let place = Some("17km SW of Searles Valley, CA".to_string());
        let event = EarthquakeEvent::new("a", 4.26, 35.77, -117.58, Some(8.0), 0, place)
            .expect("valid event");
        assert_eq!(event.title(), "M 4.3 - 17km SW of Searles Valley, CA");
    }

    #[test]
    fn test_query_error_messages_are_actionable() {
        let err = QueryError::InvertedTimeWindow { start_ms: 10, end_ms: 5 };
        assert!(err.to_string().contains("after end time"));
        assert!(QueryError::InvalidRadius(0.0).to_string().contains("positive"));
    }
}
