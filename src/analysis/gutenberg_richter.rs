/// Gutenberg-Richter frequency-magnitude analysis.
///
/// The Gutenberg-Richter law states log10(N) = a - b·M, where N is the
/// number of events with magnitude >= M. This module builds the cumulative
/// curve at 0.1-magnitude steps, fits it by least squares and reports the
/// Pearson correlation of the fit.
///
/// Slopes are reported raw (normally negative); `b_value` is `-slope`.

use serde::Serialize;

use super::{ceil_tenths, floor_tenths};
use crate::model::GRPoint;

/// Least-squares line `log10(N) = intercept + slope·M`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// The Gutenberg-Richter b-value, `-slope`.
    pub fn b_value(&self) -> f64 {
        -self.slope
    }

    /// Fitted log10 cumulative count at `magnitude`.
    pub fn predict(&self, magnitude: f64) -> f64 {
        self.intercept + self.slope * magnitude
    }
}

/// Qualitative strength of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitQuality {
    Strong,
    Moderate,
    Weak,
}

impl FitQuality {
    /// |r| > 0.8 is strong, |r| > 0.5 moderate, anything else weak.
    pub fn from_correlation(r: f64) -> Self {
        let r = r.abs();
        if r > 0.8 {
            FitQuality::Strong
        } else if r > 0.5 {
            FitQuality::Moderate
        } else {
            FitQuality::Weak
        }
    }
}

/// Everything a frequency-magnitude chart needs for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GutenbergRichterSummary {
    pub points: Vec<GRPoint>,
    /// `None` when fewer than two distinct magnitudes were plotted.
    pub fit: Option<LinearFit>,
    pub b_value: Option<f64>,
    pub correlation: f64,
    pub fit_quality: FitQuality,
    /// Trend line endpoints at the smallest and largest plotted magnitude.
    pub trend_line: Vec<GRPoint>,
}

// ---------------------------------------------------------------------------
// Cumulative curve
// ---------------------------------------------------------------------------

/// Cumulative frequency-magnitude points.
///
/// Magnitudes run from `floor(min·10)/10` to `ceil(max·10)/10` inclusive in
/// 0.1 steps; each point carries log10 of the number of magnitudes >= that
/// step. Steps with a count of zero are omitted. Non-finite inputs are
/// ignored. Stepping is done on integer tenths so long ranges don't drift.
pub fn cumulative_counts(magnitudes: &[f64]) -> Vec<GRPoint> {
    let mut sorted: Vec<f64> = magnitudes.iter().copied().filter(|m| m.is_finite()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by(f64::total_cmp);

    let min_tenths = floor_tenths(sorted[0]);
    let max_tenths = ceil_tenths(sorted[sorted.len() - 1]);

    (min_tenths..=max_tenths)
        .filter_map(|tenths| {
            let magnitude = tenths as f64 / 10.0;
            let below = sorted.partition_point(|&m| m < magnitude);
            let count = sorted.len() - below;
            (count > 0).then(|| GRPoint {
                magnitude,
                log10_cumulative_count: (count as f64).log10(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Regression
// ---------------------------------------------------------------------------

struct Sums {
    n: f64,
    x: f64,
    y: f64,
    xy: f64,
    xx: f64,
    yy: f64,
}

fn sums(points: &[GRPoint]) -> Sums {
    points.iter().fold(
        Sums { n: points.len() as f64, x: 0.0, y: 0.0, xy: 0.0, xx: 0.0, yy: 0.0 },
        |mut s, p| {
            let (x, y) = (p.magnitude, p.log10_cumulative_count);
            s.x += x;
            s.y += y;
            s.xy += x * y;
            s.xx += x * x;
            s.yy += y * y;
            s
        },
    )
}

/// Ordinary least-squares fit of `log10_cumulative_count` on `magnitude`.
///
/// Returns `None` for fewer than two points, or when every point has the
/// same magnitude (vertical line, slope undefined).
pub fn linear_regression(points: &[GRPoint]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    let s = sums(points);
    let denominator = s.n * s.xx - s.x * s.x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (s.n * s.xy - s.x * s.y) / denominator;
    let intercept = (s.y - slope * s.x) / s.n;
    Some(LinearFit { slope, intercept })
}

/// Pearson correlation between magnitude and log10 cumulative count.
///
/// Returns 0 for fewer than two points or when either series has zero
/// variance.
pub fn correlation_coefficient(points: &[GRPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let s = sums(points);
    let numerator = s.n * s.xy - s.x * s.y;
    let var_x = s.n * s.xx - s.x * s.x;
    let var_y = s.n * s.yy - s.y * s.y;
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }

    (numerator / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

/// Endpoints of the fitted line across the plotted magnitude range.
pub fn trend_line(points: &[GRPoint], fit: &LinearFit) -> Vec<GRPoint> {
    let min = points.iter().map(|p| p.magnitude).reduce(f64::min);
    let max = points.iter().map(|p| p.magnitude).reduce(f64::max);

    match (min, max) {
        (Some(min), Some(max)) => [min, max]
            .into_iter()
            .map(|magnitude| GRPoint {
                magnitude,
                log10_cumulative_count: fit.predict(magnitude),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Runs the full frequency-magnitude analysis over a set of magnitudes.
pub fn analyze(magnitudes: &[f64]) -> GutenbergRichterSummary {
    let points = cumulative_counts(magnitudes);
    let fit = linear_regression(&points);
    let correlation = correlation_coefficient(&points);
    let trend = fit.map(|f| trend_line(&points, &f)).unwrap_or_default();

    GutenbergRichterSummary {
        b_value: fit.map(|f| f.b_value()),
        fit_quality: FitQuality::from_correlation(correlation),
        trend_line: trend,
        points,
        fit,
        correlation,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
