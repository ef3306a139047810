/// Query engine: one filter pass over a parsed catalogue.
///
/// An event matches when all three predicates hold:
/// 1. `magnitude >= min_magnitude`
/// 2. `start_ms <= timestamp_ms <= end_ms`
/// 3. Haversine distance from the query centre `<= radius_km`
///
/// Magnitude and time are checked first; the distance computation only
/// runs for events that survive them.
///
/// Parameters are validated up front so that callers can tell a bad query
/// (`Err(QueryError)`) apart from a query with no matches (`Ok(vec![])`).

use log::debug;

use crate::model::{EarthquakeEvent, QueryError, QueryParameters};
use crate::spatial::distance_km;

impl QueryParameters {
    /// Checks the parameters without touching any events.
    pub fn validate(&self) -> Result<(), QueryError> {
        if !(self.center_lat.is_finite() && self.center_lon.is_finite()) {
            return Err(QueryError::NonFiniteCenter {
                lat: self.center_lat,
                lon: self.center_lon,
            });
        }
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(QueryError::InvalidRadius(self.radius_km));
        }
        if !self.min_magnitude.is_finite() {
            return Err(QueryError::NonFiniteMagnitude(self.min_magnitude));
        }
        if self.start_ms > self.end_ms {
            return Err(QueryError::InvertedTimeWindow {
                start_ms: self.start_ms,
                end_ms: self.end_ms,
            });
        }
        Ok(())
    }

    /// True if `event` satisfies every predicate. Assumes validated parameters.
    pub fn matches(&self, event: &EarthquakeEvent) -> bool {
        if event.magnitude() < self.min_magnitude {
            return false;
        }
        if event.timestamp_ms() < self.start_ms || event.timestamp_ms() > self.end_ms {
            return false;
        }
        distance_km(self.center_lat, self.center_lon, event.latitude(), event.longitude())
            <= self.radius_km
    }
}

/// Returns the events matching `query`, in catalogue order.
///
/// # Errors
/// Any [`QueryError`] from [`QueryParameters::validate`]; no events are
/// examined in that case.
pub fn filter_events(
    events: &[EarthquakeEvent],
    query: &QueryParameters,
) -> Result<Vec<EarthquakeEvent>, QueryError> {
    query.validate()?;

    let matched: Vec<EarthquakeEvent> = events
        .iter()
        .filter(|event| query.matches(event))
        .cloned()
        .collect();

    debug!(
        "query matched {} of {} events (r={} km, M>={})",
        matched.len(),
        events.len(),
        query.radius_km,
        query.min_magnitude
    );

    Ok(matched)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
