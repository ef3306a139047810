/// ISC-GEM Earthquake Catalogue Parser
///
/// Parses the comma-delimited ISC-GEM global instrumental catalogue into
/// `EarthquakeEvent`s.
/// Source: http://www.isc.ac.uk/iscgem/download.php
///
/// Format structure:
/// - Lines starting with '#' are comments (citation, column notes)
/// - One header line naming the columns (`date, lat, lon, smajax, ...`)
/// - Remaining lines: comma-separated data rows, at least 14 fields
/// - A row is dropped if it has fewer than 14 fields, a non-numeric
///   latitude, longitude or magnitude, or an unreadable origin time
///
/// Fields used (by fixed position):
/// - 0: origin time, e.g. `1904-04-04 10:02:34.56` (UTC)
/// - 1: latitude (degrees)
/// - 2: longitude (degrees)
/// - 7: depth (km) - 0 when blank or unparseable
/// - 10: moment magnitude Mw
/// - last: ISC event id - falls back to the running event count
///
/// Malformed rows are dropped silently; parsing never fails. Rows whose
/// origin time cannot be read are dropped too, since they could never fall
/// inside a query window.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;

use crate::model::EarthquakeEvent;

/// Minimum number of comma-separated fields in a data row.
pub const MIN_FIELDS: usize = 14;

const FIELD_DATE: usize = 0;
const FIELD_LAT: usize = 1;
const FIELD_LON: usize = 2;
const FIELD_DEPTH: usize = 7;
const FIELD_MW: usize = 10;

/// Parses ISC-GEM catalogue text into events, in file order.
pub fn parse_catalogue(text: &str) -> Vec<EarthquakeEvent> {
    let mut events = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();

        // Comments, blank lines and the column header carry no events
        if trimmed.is_empty() || trimmed.starts_with('#') || is_header(trimmed) {
            continue;
        }

        match parse_row(trimmed, events.len()) {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    debug!(
        "catalogue parse: {} events accepted, {} rows skipped",
        events.len(),
        skipped
    );

    events
}

/// The header names the date, latitude and longitude columns.
fn is_header(line: &str) -> bool {
    line.contains("date") && line.contains("lat") && line.contains("lon")
}

/// Parses one data row. `ordinal` is the id used when the row has none.
fn parse_row(line: &str, ordinal: usize) -> Option<EarthquakeEvent> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let latitude = parse_finite(fields[FIELD_LAT])?;
    let longitude = parse_finite(fields[FIELD_LON])?;
    let magnitude = parse_finite(fields[FIELD_MW])?;
    let depth_km = parse_finite(fields[FIELD_DEPTH]);
    let timestamp_ms = parse_timestamp_ms(fields[FIELD_DATE])?;

    let id = fields
        .last()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| ordinal.to_string());

    EarthquakeEvent::new(id, magnitude, latitude, longitude, depth_km, timestamp_ms, None)
}

fn parse_finite(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts an ISO-like datetime to epoch milliseconds (UTC).
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]`, the same with a `T` separator,
/// RFC 3339 with an offset, and a bare `YYYY-MM-DD` (midnight). Strings
/// without an offset are taken as UTC.
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::fixture_isc_gem_csv;
    use chrono::{TimeZone, Utc};

    fn row(date: &str, lat: &str, lon: &str, depth: &str, mw: &str, id: &str) -> String {
        // 14 columns: date, lat, lon, smajax, sminax, strike, q, depth, unc, q, mw, unc, q, eventid
        format!(
            "{}, {}, {}, 22.1, 17.4, 107.6, C, {}, 5.0, C, {}, 0.20, C, {}",
            date, lat, lon, depth, mw, id
        )
    }

    #[test]
    fn test_parse_single_row_round_trips_fields() {
        let text = row("2011-03-11 05:46:23.00", "38.2963", "142.4980", "19.70", "9.10", "16461282");
        let events = parse_catalogue(&text);
        assert_eq!(events.len(), 1);

        let e = &events[0];
        let expected_ms = Utc
            .with_ymd_and_hms(2011, 3, 11, 5, 46, 23)
            .single()
            .expect("valid date")
            .timestamp_millis();

        assert!((e.latitude() - 38.2963).abs() < 1e-9);
        assert!((e.longitude() - 142.4980).abs() < 1e-9);
        assert!((e.depth_km() - 19.70).abs() < 1e-9);
        assert!((e.magnitude() - 9.10).abs() < 1e-9);
        assert_eq!(e.timestamp_ms(), expected_ms);
        assert_eq!(e.id(), "16461282");
        assert_eq!(e.place(), "38.30°, 142.50°");
    }

    #[test]
    fn test_parse_skips_comments_blank_lines_and_header() {
        let events = parse_catalogue(fixture_isc_gem_csv());
        // Fixture has 5 well-formed rows and 3 malformed ones
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].id(), "610326");
    }

    #[test]
    fn test_parse_drops_malformed_rows_and_counts_the_rest() {
        let good = row("2020-01-01 00:00:00", "10.0", "20.0", "5.0", "5.5", "1");
        let lines = vec![
            good.clone(),
            "2020-01-01 00:00:00, 10.0, 20.0".to_string(), // too few fields
            row("2020-01-01 00:00:00", "abc", "20.0", "5.0", "5.5", "2"),
            row("2020-01-01 00:00:00", "10.0", "", "5.0", "5.5", "3"),
            row("2020-01-01 00:00:00", "10.0", "20.0", "5.0", "NaN", "4"),
            good.clone(),
            row("not a date", "10.0", "20.0", "5.0", "5.5", "5"),
            good,
        ];
        let n = lines.len();
        let malformed = 5;

        let events = parse_catalogue(&lines.join("\n"));
        assert_eq!(events.len(), n - malformed);
    }

    #[test]
    fn test_unparseable_depth_defaults_to_zero() {
        let text = row("2020-06-01 12:00:00", "10.0", "20.0", "", "5.5", "77");
        let events = parse_catalogue(&text);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].depth_km(), 0.0);
    }

    #[test]
    fn test_missing_id_falls_back_to_ordinal() {
        let first = row("2020-06-01 12:00:00", "10.0", "20.0", "5", "5.5", "900");
        let second = row("2020-06-02 12:00:00", "11.0", "21.0", "5", "5.6", "");
        let events = parse_catalogue(&format!("{}\n{}", first, second));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id(), "1");
    }

    #[test]
    fn test_empty_input_yields_no_events() {
        assert!(parse_catalogue("").is_empty());
        assert!(parse_catalogue("# only a comment\n\n   \n").is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = Utc
            .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date")
            .timestamp_millis();

        assert_eq!(parse_timestamp_ms("2020-01-01"), Some(midnight));
        assert_eq!(parse_timestamp_ms("2020-01-01 00:00:00.00"), Some(midnight));
        assert_eq!(parse_timestamp_ms("2020-01-01T00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp_ms("2020-01-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_timestamp_ms("2020-01-01T01:00:00+01:00"), Some(midnight));
        assert_eq!(parse_timestamp_ms("2020-01-01 00:00:00.250"), Some(midnight + 250));
        assert_eq!(parse_timestamp_ms("yesterday"), None);
    }

    #[test]
    fn test_early_twentieth_century_dates_are_negative_epoch() {
        let ms = parse_timestamp_ms("1904-04-04 10:02:34.56").expect("should parse");
        assert!(ms < 0);
    }
}
