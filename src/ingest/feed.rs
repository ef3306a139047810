/// Live earthquake feed adapter (GeoJSON).
///
/// Handles the FeatureCollection returned by the USGS FDSN event service
/// with `format=geojson`. See `fixtures.rs` for annotated examples.
///
/// Feature shape:
///   features[]
///     .id                         - event id (string)
///     .properties.mag             - magnitude (number, may be null)
///     .properties.place           - human-readable location (may be null)
///     .properties.time            - origin time, epoch milliseconds
///     .properties.tsunami         - 0/1 flag (ignored)
///     .geometry.coordinates       - [lon, lat, depth_km]
///
/// Features that cannot become a valid `EarthquakeEvent` (null magnitude,
/// missing time, short coordinate array) are skipped; only a document that
/// is not a FeatureCollection at all is an error.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::model::{EarthquakeEvent, FeedError};

// ---------------------------------------------------------------------------
// Serde structures for GeoJSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<Value>,
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    time: Option<i64>,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a GeoJSON FeatureCollection into events, in feature order.
///
/// # Errors
/// `FeedError::Parse` if the body is not JSON or has no `features` array.
pub fn parse_feed(json: &str) -> Result<Vec<EarthquakeEvent>, FeedError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;

    let total = collection.features.len();
    let mut events = Vec::with_capacity(total);

    for raw in collection.features {
        let feature: Feature = match serde_json::from_value(raw) {
            Ok(f) => f,
            Err(e) => {
                debug!("skipping feature with unexpected shape: {}", e);
                continue;
            }
        };
        if let Some(event) = feature_to_event(feature, events.len()) {
            events.push(event);
        }
    }

    debug!("feed parse: {} of {} features accepted", events.len(), total);

    Ok(events)
}

/// Maps one feature onto the canonical record.
///
/// `magnitude = properties.mag`, `timestamp = properties.time`,
/// `longitude, latitude, depth = geometry.coordinates[0..3]`.
fn feature_to_event(feature: Feature, ordinal: usize) -> Option<EarthquakeEvent> {
    let magnitude = feature.properties.mag?;
    let timestamp_ms = feature.properties.time?;

    let coordinates = feature.geometry?.coordinates;
    let longitude = (*coordinates.first()?)?;
    let latitude = (*coordinates.get(1)?)?;
    let depth_km = coordinates.get(2).copied().flatten();

    let id = match feature.id {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => ordinal.to_string(),
    };

    EarthquakeEvent::new(
        id,
        magnitude,
        latitude,
        longitude,
        depth_km,
        timestamp_ms,
        feature.properties.place,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
