/// USGS FDSN Event Web Service client.
///
/// Builds query URLs for, and fetches, the live earthquake feed:
///   https://earthquake.usgs.gov/fdsnws/event/1/query
///
/// The service does the spatial/magnitude/time selection server-side and
/// returns a GeoJSON FeatureCollection, which `feed::parse_feed` turns into
/// events. The local query engine is still applied afterwards so both data
/// sources go through identical filtering.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat};
use log::info;

use crate::model::{FeedError, QueryError, QueryParameters};

pub const FDSN_EVENT_BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds an FDSN event query URL for `query`, always requesting GeoJSON.
///
/// Times are sent as RFC 3339 UTC. Parameters are validated first so the
/// remote service is never asked an impossible question.
///
/// # Example
/// ```text
/// let url = build_query_url(FDSN_EVENT_BASE_URL, &query)?;
/// // https://earthquake.usgs.gov/fdsnws/event/1/query?format=geojson&latitude=36.1699&...
/// ```
pub fn build_query_url(base_url: &str, query: &QueryParameters) -> Result<String, QueryError> {
    query.validate()?;

    Ok(format!(
        "{}?format=geojson&latitude={}&longitude={}&maxradiuskm={}&minmagnitude={}&starttime={}&endtime={}",
        base_url,
        query.center_lat,
        query.center_lon,
        query.radius_km,
        query.min_magnitude,
        urlencoding::encode(&format_ms(query.start_ms)),
        urlencoding::encode(&format_ms(query.end_ms)),
    ))
}

/// Epoch milliseconds as RFC 3339 UTC with millisecond precision.
fn format_ms(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| ms.to_string())
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Builds the blocking HTTP client used for feed requests.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, FeedError> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Fetches the raw GeoJSON body for `url`.
///
/// # Errors
/// - `FeedError::Http` - connection failure or timeout.
/// - `FeedError::Status` - the service answered with a non-2xx status.
pub fn fetch_feed(client: &reqwest::blocking::Client, url: &str) -> Result<String, FeedError> {
    info!("Fetching: {}", url);

    let response = client
        .get(url)
        .header("Accept", "application/geo+json, application/json")
        .send()?;

    if !response.status().is_success() {
        return Err(FeedError::Status(response.status().as_u16()));
    }

    Ok(response.text()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
