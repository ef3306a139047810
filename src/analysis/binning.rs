/// Histogram binning, descriptive statistics and seismic energy.
///
/// Two bin layouts are used by the charts:
/// - magnitude: fixed-width bins (0.5 by default) spanning
///   `floor(min·10)/10 ..= ceil(max·10)/10`
/// - depth: five named ranges, Shallow through Very Deep
///
/// Bins are half-open `[min, max)`; the last bin also accepts a value equal
/// to its upper edge so the maximum is never lost.

use serde::Serialize;

use super::{ceil_tenths, floor_tenths};
use crate::model::{BinningError, EarthquakeEvent, HistogramBin};

// ---------------------------------------------------------------------------
// Bin layouts
// ---------------------------------------------------------------------------

/// Range and label of one bin, before any events are assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSpec {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl BinSpec {
    pub fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self { min, max, label: label.into() }
    }
}

/// How to lay out bins for [`histogram`].
#[derive(Debug, Clone, PartialEq)]
pub enum BinLayout {
    /// Equal-width bins derived from the data range.
    Width(f64),
    /// Caller-supplied ranges.
    Fixed(Vec<BinSpec>),
}

/// Default magnitude bin width.
pub const MAGNITUDE_BIN_WIDTH: f64 = 0.5;

/// Focal depth classes, km.
pub fn depth_bins() -> Vec<BinSpec> {
    vec![
        BinSpec::new(0.0, 10.0, "0-10km (Shallow)"),
        BinSpec::new(10.0, 35.0, "10-35km (Crustal)"),
        BinSpec::new(35.0, 70.0, "35-70km (Intermediate)"),
        BinSpec::new(70.0, 300.0, "70-300km (Deep)"),
        BinSpec::new(300.0, f64::INFINITY, "300km+ (Very Deep)"),
    ]
}

/// Equal-width bins covering `values`, starting at `floor(min·10)/10` and
/// adding bins while the bin start is <= `ceil(max·10)/10`.
///
/// Empty (or all non-finite) input gives no bins.
pub fn width_bins(values: &[f64], width: f64) -> Result<Vec<BinSpec>, BinningError> {
    if !(width.is_finite() && width > 0.0) {
        return Err(BinningError::InvalidWidth(width));
    }

    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (Some(min), Some(max)) = (finite.clone().reduce(f64::min), finite.reduce(f64::max)) else {
        return Ok(Vec::new());
    };

    let start = floor_tenths(min) as f64 / 10.0;
    let end = ceil_tenths(max) as f64 / 10.0;

    // Edges are computed from the index so neighbouring bins share them exactly
    let edge = |i: u32| start + f64::from(i) * width;

    let mut bins = Vec::new();
    for i in 0u32.. {
        let lo = edge(i);
        if lo > end + 1e-9 {
            break;
        }
        let hi = edge(i + 1);
        bins.push(BinSpec::new(lo, hi, format!("{:.1}-{:.1}", lo, hi)));
    }
    Ok(bins)
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Index of the bin `value` belongs to, if any.
fn bin_index(bins: &[BinSpec], value: f64) -> Option<usize> {
    if let Some(i) = bins.iter().position(|b| value >= b.min && value < b.max) {
        return Some(i);
    }
    // Inclusive upper edge on the last bin
    bins.last()
        .filter(|last| value == last.max)
        .map(|_| bins.len() - 1)
}

/// Places each event into the bin its value falls in. Events outside every
/// bin are not counted.
pub fn assign_to_bins<F>(events: &[EarthquakeEvent], value_of: F, bins: &[BinSpec]) -> Vec<HistogramBin>
where
    F: Fn(&EarthquakeEvent) -> f64,
{
    let mut out: Vec<HistogramBin> = bins
        .iter()
        .map(|b| HistogramBin {
            range_min: b.min,
            range_max: b.max,
            label: b.label.clone(),
            count: 0,
            members: Vec::new(),
        })
        .collect();

    for event in events {
        if let Some(i) = bin_index(bins, value_of(event)) {
            out[i].count += 1;
            out[i].members.push(event.clone());
        }
    }

    out
}

/// Histogram of `value_of(event)` over `events` using `layout`.
///
/// # Errors
/// `BinningError::InvalidWidth` for a non-positive or non-finite width.
pub fn histogram<F>(
    events: &[EarthquakeEvent],
    value_of: F,
    layout: &BinLayout,
) -> Result<Vec<HistogramBin>, BinningError>
where
    F: Fn(&EarthquakeEvent) -> f64,
{
    let bins = match layout {
        BinLayout::Width(width) => {
            let values: Vec<f64> = events.iter().map(&value_of).collect();
            width_bins(&values, *width)?
        }
        BinLayout::Fixed(bins) => bins.clone(),
    };
    Ok(assign_to_bins(events, value_of, &bins))
}

pub fn magnitude_histogram(
    events: &[EarthquakeEvent],
    width: f64,
) -> Result<Vec<HistogramBin>, BinningError> {
    histogram(events, EarthquakeEvent::magnitude, &BinLayout::Width(width))
}

pub fn depth_histogram(events: &[EarthquakeEvent]) -> Vec<HistogramBin> {
    assign_to_bins(events, EarthquakeEvent::depth_km, &depth_bins())
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    /// Lower-middle element of the sorted values, `sorted[(n - 1) / 2]`.
    /// For an even count this picks the lower of the two middle values
    /// (`[1, 2, 3, 4]` → 2), never their average.
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
}

/// Mean, median, extremes and standard deviation of `values`.
///
/// Works on a private sorted copy; the caller's slice is untouched.
/// Returns `None` for empty input.
pub fn descriptive_stats(values: &[f64]) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(DescriptiveStats {
        mean,
        median: sorted[(sorted.len() - 1) / 2],
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        std_dev: variance.sqrt(),
    })
}

// ---------------------------------------------------------------------------
// Energy
// ---------------------------------------------------------------------------

/// Radiated seismic energy in joules: log10(E) = 1.5·M + 9.1.
pub fn seismic_energy_joules(magnitude: f64) -> f64 {
    10f64.powf(1.5 * magnitude + 9.1)
}

/// Sum of [`seismic_energy_joules`] over `magnitudes`.
pub fn total_energy(magnitudes: &[f64]) -> f64 {
    magnitudes.iter().copied().map(seismic_energy_joules).sum()
}

// ---------------------------------------------------------------------------
// Magnitude classes
// ---------------------------------------------------------------------------

/// Descriptive magnitude class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudeClass {
    Micro,
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
}

impl MagnitudeClass {
    pub const ALL: [MagnitudeClass; 6] = [
        MagnitudeClass::Micro,
        MagnitudeClass::Minor,
        MagnitudeClass::Light,
        MagnitudeClass::Moderate,
        MagnitudeClass::Strong,
        MagnitudeClass::Major,
    ];

    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude < 3.0 {
            MagnitudeClass::Micro
        } else if magnitude < 4.0 {
            MagnitudeClass::Minor
        } else if magnitude < 5.0 {
            MagnitudeClass::Light
        } else if magnitude < 6.0 {
            MagnitudeClass::Moderate
        } else if magnitude < 7.0 {
            MagnitudeClass::Strong
        } else {
            MagnitudeClass::Major
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            MagnitudeClass::Micro => "<3.0",
            MagnitudeClass::Minor => "3.0-3.9",
            MagnitudeClass::Light => "4.0-4.9",
            MagnitudeClass::Moderate => "5.0-5.9",
            MagnitudeClass::Strong => "6.0-6.9",
            MagnitudeClass::Major => ">=7.0",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MagnitudeClass::Micro => "Usually not felt",
            MagnitudeClass::Minor => "Often felt, rarely damages",
            MagnitudeClass::Light => "Noticeable shaking",
            MagnitudeClass::Moderate => "Can cause damage",
            MagnitudeClass::Strong => "Destructive in populated areas",
            MagnitudeClass::Major => "Serious damage over large areas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnitudeClassCount {
    pub class: MagnitudeClass,
    pub range: &'static str,
    pub count: usize,
}

/// Event count per magnitude class, in class order (all six always present).
pub fn magnitude_class_counts(events: &[EarthquakeEvent]) -> Vec<MagnitudeClassCount> {
    MagnitudeClass::ALL
        .iter()
        .map(|&class| MagnitudeClassCount {
            class,
            range: class.range(),
            count: events
                .iter()
                .filter(|e| MagnitudeClass::from_magnitude(e.magnitude()) == class)
                .count(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart bundles
// ---------------------------------------------------------------------------

/// Per-bin figures shown alongside the magnitude histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeBinSummary {
    pub label: String,
    pub center: f64,
    pub count: usize,
    /// Events with magnitude >= the bin's lower edge.
    pub cumulative: usize,
    pub energy_joules: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeAnalysis {
    pub bins: Vec<HistogramBin>,
    pub bin_summaries: Vec<MagnitudeBinSummary>,
    pub classes: Vec<MagnitudeClassCount>,
    pub stats: Option<DescriptiveStats>,
    pub total_energy_joules: f64,
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthAnalysis {
    pub bins: Vec<HistogramBin>,
    pub stats: Option<DescriptiveStats>,
    pub total_count: usize,
}

/// Magnitude histogram plus cumulative counts, energy and class breakdown.
pub fn magnitude_analysis(
    events: &[EarthquakeEvent],
    width: f64,
) -> Result<MagnitudeAnalysis, BinningError> {
    let bins = magnitude_histogram(events, width)?;
    let magnitudes: Vec<f64> = events.iter().map(EarthquakeEvent::magnitude).collect();

    let bin_summaries = bins
        .iter()
        .map(|bin| MagnitudeBinSummary {
            label: bin.label.clone(),
            center: (bin.range_min + bin.range_max) / 2.0,
            count: bin.count,
            cumulative: magnitudes.iter().filter(|&&m| m >= bin.range_min).count(),
            energy_joules: bin.members.iter().map(|e| seismic_energy_joules(e.magnitude())).sum(),
        })
        .collect();

    Ok(MagnitudeAnalysis {
        bin_summaries,
        classes: magnitude_class_counts(events),
        stats: descriptive_stats(&magnitudes),
        total_energy_joules: total_energy(&magnitudes),
        total_count: events.len(),
        bins,
    })
}

/// Named depth classes plus descriptive statistics over depths.
pub fn depth_analysis(events: &[EarthquakeEvent]) -> DepthAnalysis {
    let depths: Vec<f64> = events.iter().map(EarthquakeEvent::depth_km).collect();
    DepthAnalysis {
        bins: depth_histogram(events),
        stats: descriptive_stats(&depths),
        total_count: events.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: usize, magnitude: f64, depth_km: f64) -> EarthquakeEvent {
        EarthquakeEvent::new(id.to_string(), magnitude, 0.0, 0.0, Some(depth_km), 0, None)
            .expect("valid event")
    }

    fn events_with(mags_and_depths: &[(f64, f64)]) -> Vec<EarthquakeEvent> {
        mags_and_depths
            .iter()
            .enumerate()
            .map(|(i, &(m, d))| event(i, m, d))
            .collect()
    }

    // --- Magnitude bins -----------------------------------------------------

    #[test]
    fn test_width_bins_span_rounded_range() {
        let bins = width_bins(&[2.53, 4.18], 0.5).expect("valid width");
        let labels: Vec<&str> = bins.iter().map(|b| b.label.as_str()).collect();
        // 2.5 ..= 4.2 → bins starting 2.5, 3.0, 3.5, 4.0
        assert_eq!(labels, vec!["2.5-3.0", "3.0-3.5", "3.5-4.0", "4.0-4.5"]);
    }

    #[test]
    fn test_width_bins_rejects_bad_width() {
        assert_eq!(width_bins(&[1.0], 0.0), Err(BinningError::InvalidWidth(0.0)));
        assert!(width_bins(&[1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_width_bins_empty_input() {
        assert!(width_bins(&[], 0.5).expect("valid width").is_empty());
    }

    #[test]
    fn test_magnitude_histogram_is_complete() {
        let events = events_with(&[
            (2.5, 1.0), (2.9, 1.0), (3.0, 1.0), (3.49, 1.0),
            (4.0, 1.0), (5.5, 1.0), (6.0, 1.0), (7.3, 1.0),
        ]);
        let bins = magnitude_histogram(&events, 0.5).expect("valid width");

        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, events.len());
        for bin in &bins {
            assert_eq!(bin.count, bin.members.len());
        }

        let first = &bins[0];
        assert_eq!(first.label, "2.5-3.0");
        assert_eq!(first.count, 2);
    }

    #[test]
    fn test_histogram_maximum_on_last_edge_is_kept() {
        let fixed = BinLayout::Fixed(vec![BinSpec::new(0.0, 1.0, "a"), BinSpec::new(1.0, 2.0, "b")]);
        let events = events_with(&[(0.5, 0.0), (2.0, 0.0)]);
        let bins = histogram(&events, EarthquakeEvent::magnitude, &fixed).expect("fixed layout");
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[1].members[0].magnitude(), 2.0);
    }

    #[test]
    fn test_histogram_completeness_for_many_widths() {
        let events = events_with(&[
            (1.04, 0.0), (1.96, 0.0), (2.33, 0.0), (3.71, 0.0),
            (4.45, 0.0), (5.0, 0.0), (5.05, 0.0), (8.26, 0.0),
        ]);
        for width in [0.1, 0.25, 0.3, 0.5, 1.0, 3.0] {
            let bins = magnitude_histogram(&events, width).expect("valid width");
            let total: usize = bins.iter().map(|b| b.count).sum();
            assert_eq!(total, events.len(), "width {} lost events", width);
        }
    }

    // --- Depth bins ---------------------------------------------------------

    #[test]
    fn test_depth_histogram_uses_named_ranges() {
        let events = events_with(&[
            (5.0, 0.0), (5.0, 9.99), (5.0, 10.0), (5.0, 34.0),
            (5.0, 35.0), (5.0, 150.0), (5.0, 300.0), (5.0, 650.0),
        ]);
        let bins = depth_histogram(&events);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 1, 1, 2]);
        assert_eq!(bins[4].label, "300km+ (Very Deep)");
        assert!(bins[4].range_max.is_infinite());
    }

    #[test]
    fn test_depth_histogram_empty_input_has_all_bins() {
        let bins = depth_histogram(&[]);
        assert_eq!(bins.len(), 5);
        assert!(bins.iter().all(|b| b.count == 0));
    }

    // --- Statistics ---------------------------------------------------------

    #[test]
    fn test_median_picks_lower_middle() {
        let stats = descriptive_stats(&[1.0, 2.0, 3.0, 4.0]).expect("non-empty");
        assert_eq!(stats.median, 2.0);

        let stats = descriptive_stats(&[4.0, 1.0, 3.0]).expect("non-empty");
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_descriptive_stats_values() {
        let stats = descriptive_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).expect("non-empty");
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_descriptive_stats_does_not_mutate_input() {
        let values = vec![5.0, 1.0, 3.0];
        let _ = descriptive_stats(&values);
        assert_eq!(values, vec![5.0, 1.0, 3.0]);
    }

    #[test]
    fn test_descriptive_stats_empty_is_none() {
        assert!(descriptive_stats(&[]).is_none());
    }

    // --- Energy -------------------------------------------------------------

    #[test]
    fn test_seismic_energy_m6() {
        let e = seismic_energy_joules(6.0);
        let expected = 10f64.powf(18.1);
        assert!((e - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_total_energy_sums_events() {
        let single = seismic_energy_joules(6.0);
        let total = total_energy(&[6.0, 6.0]);
        assert!((total - 2.0 * single).abs() / single < 1e-12);
        assert_eq!(total_energy(&[]), 0.0);
    }

    #[test]
    fn test_one_magnitude_unit_is_about_32x_energy() {
        let ratio = seismic_energy_joules(7.0) / seismic_energy_joules(6.0);
        assert!((ratio - 10f64.powf(1.5)).abs() < 1e-6);
    }

    // --- Classes and bundles ------------------------------------------------

    #[test]
    fn test_magnitude_class_counts() {
        let events = events_with(&[(2.9, 0.0), (3.0, 0.0), (4.5, 0.0), (6.99, 0.0), (7.0, 0.0), (9.1, 0.0)]);
        let counts: Vec<usize> = magnitude_class_counts(&events).iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 0, 1, 2]);
    }

    #[test]
    fn test_magnitude_analysis_cumulative_and_energy() {
        let events = events_with(&[(5.0, 0.0), (5.0, 0.0), (6.0, 0.0), (7.0, 0.0)]);
        let analysis = magnitude_analysis(&events, MAGNITUDE_BIN_WIDTH).expect("valid width");

        let first = &analysis.bin_summaries[0];
        assert_eq!(first.label, "5.0-5.5");
        assert_eq!(first.cumulative, 4);
        assert!((first.center - 5.25).abs() < 1e-12);
        let expected = 2.0 * seismic_energy_joules(5.0);
        assert!((first.energy_joules - expected).abs() / expected < 1e-12);

        let per_bin: f64 = analysis.bin_summaries.iter().map(|b| b.energy_joules).sum();
        assert!((per_bin - analysis.total_energy_joules).abs() / analysis.total_energy_joules < 1e-12);
        assert_eq!(analysis.total_count, 4);
    }

    #[test]
    fn test_depth_analysis_stats() {
        let events = events_with(&[(5.0, 10.0), (5.0, 20.0), (5.0, 600.0)]);
        let analysis = depth_analysis(&events);
        let stats = analysis.stats.expect("non-empty");
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 600.0);
        assert_eq!(stats.mean, 210.0);
    }
}
