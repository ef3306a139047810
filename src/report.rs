/// Analysis report: everything the charts need for one query.
///
/// `build_report` runs the whole chain (filter, Gutenberg-Richter,
/// magnitude/depth binning, temporal grouping, energy) over a catalogue
/// the caller owns. The result is plain data, serialisable to JSON for
/// whatever renders it.

use log::debug;
use serde::Serialize;

use crate::analysis::binning::{self, DepthAnalysis, MagnitudeAnalysis};
use crate::analysis::gutenberg_richter::{self, GutenbergRichterSummary};
use crate::analysis::temporal::{self, TemporalAnalysis};
use crate::config::AnalysisConfig;
use crate::model::{BinningError, EarthquakeEvent, QueryError, QueryParameters};
use crate::query::filter_events;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub query: QueryParameters,
    pub catalogue_size: usize,
    pub match_count: usize,
    pub events: Vec<EarthquakeEvent>,
    pub gutenberg_richter: GutenbergRichterSummary,
    pub magnitude: MagnitudeAnalysis,
    pub depth: DepthAnalysis,
    pub temporal: TemporalAnalysis,
    pub total_energy_joules: f64,
}

impl AnalysisReport {
    /// True when the query was valid but nothing matched.
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Binning(#[from] BinningError),
}

/// Filters `catalogue` with `query` and derives every statistic from the
/// matches.
///
/// # Errors
/// - `ReportError::Query` - the query parameters are invalid.
/// - `ReportError::Binning` - the configured magnitude bin width is invalid.
pub fn build_report(
    catalogue: &[EarthquakeEvent],
    query: &QueryParameters,
    settings: &AnalysisConfig,
) -> Result<AnalysisReport, ReportError> {
    let events = filter_events(catalogue, query)?;
    let magnitudes: Vec<f64> = events.iter().map(EarthquakeEvent::magnitude).collect();

    let magnitude = binning::magnitude_analysis(&events, settings.magnitude_bin_width)?;
    let depth = binning::depth_analysis(&events);
    let temporal = temporal::temporal_analysis(&events, settings.major_event_magnitude);
    let gutenberg_richter = gutenberg_richter::analyze(&magnitudes);

    debug!(
        "report: {} matches, {} GR points, b={:?}",
        events.len(),
        gutenberg_richter.points.len(),
        gutenberg_richter.b_value
    );

    Ok(AnalysisReport {
        query: *query,
        catalogue_size: catalogue.len(),
        match_count: events.len(),
        total_energy_joules: magnitude.total_energy_joules,
        gutenberg_richter,
        magnitude,
        depth,
        temporal,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::catalogue::parse_catalogue;
    use crate::ingest::fixtures::fixture_isc_gem_csv;

    fn whole_world() -> QueryParameters {
        QueryParameters {
            center_lat: 0.0,
            center_lon: 0.0,
            radius_km: 20_100.0, // more than half the circumference
            min_magnitude: 0.0,
            start_ms: i64::MIN,
            end_ms: i64::MAX,
        }
    }

    #[test]
    fn test_report_over_whole_catalogue() {
        let catalogue = parse_catalogue(fixture_isc_gem_csv());
        let report = build_report(&catalogue, &whole_world(), &AnalysisConfig::default())
            .expect("valid query");

        assert_eq!(report.catalogue_size, 5);
        assert_eq!(report.match_count, 5);
        assert!(!report.is_empty());

        let magnitude_total: usize = report.magnitude.bins.iter().map(|b| b.count).sum();
        let depth_total: usize = report.depth.bins.iter().map(|b| b.count).sum();
        assert_eq!(magnitude_total, 5);
        assert_eq!(depth_total, 5);

        // All five are M7+ great earthquakes
        assert_eq!(report.temporal.major_events.len(), 5);
        assert!(report.gutenberg_richter.fit.is_some());
    }

    #[test]
    fn test_report_with_no_matches_is_empty_not_error() {
        let catalogue = parse_catalogue(fixture_isc_gem_csv());
        let query = QueryParameters { min_magnitude: 9.9, ..whole_world() };
        let report = build_report(&catalogue, &query, &AnalysisConfig::default())
            .expect("valid query");

        assert!(report.is_empty());
        assert!(report.gutenberg_richter.points.is_empty());
        assert!(report.magnitude.bins.is_empty());
        assert!(report.magnitude.stats.is_none());
        assert_eq!(report.total_energy_joules, 0.0);
    }

    #[test]
    fn test_report_propagates_validation_error() {
        let query = QueryParameters { radius_km: 0.0, ..whole_world() };
        assert_eq!(
            build_report(&[], &query, &AnalysisConfig::default()),
            Err(ReportError::Query(QueryError::InvalidRadius(0.0)))
        );
    }

    #[test]
    fn test_report_rejects_bad_bin_width() {
        let settings = AnalysisConfig { magnitude_bin_width: 0.0, ..AnalysisConfig::default() };
        assert!(matches!(
            build_report(&[], &whole_world(), &settings),
            Err(ReportError::Binning(_))
        ));
    }

    #[test]
    fn test_report_serialises_to_json() {
        let catalogue = parse_catalogue(fixture_isc_gem_csv());
        let report = build_report(&catalogue, &whole_world(), &AnalysisConfig::default())
            .expect("valid query");
        let json = serde_json::to_value(&report).expect("report should serialise");

        assert_eq!(json["match_count"], 5);
        assert!(json["gutenberg_richter"]["points"].is_array());
        assert_eq!(json["depth"]["bins"].as_array().map(|b| b.len()), Some(5));
    }
}
