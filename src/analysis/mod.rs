/// Statistical analysis over a filtered event set.
///
/// Submodules:
/// - `gutenberg_richter` - cumulative frequency-magnitude curve, b-value fit.
/// - `binning`           - magnitude/depth histograms, descriptive stats, energy.
/// - `temporal`          - daily timeline, hour-of-day pattern, major events.

pub mod binning;
pub mod gutenberg_richter;
pub mod temporal;

/// Largest `k` with `k / 10 <= value`, i.e. `floor(value·10)`, corrected for
/// `value·10` rounding across an integer. Saturates at the `i64` range.
pub(crate) fn floor_tenths(value: f64) -> i64 {
    let k = (value * 10.0).floor() as i64;
    if (k.saturating_add(1) as f64 / 10.0) <= value {
        k.saturating_add(1)
    } else if (k as f64 / 10.0) > value {
        k.saturating_sub(1)
    } else {
        k
    }
}

/// Smallest `k` with `k / 10 >= value`, i.e. `ceil(value·10)`.
pub(crate) fn ceil_tenths(value: f64) -> i64 {
    let k = (value * 10.0).ceil() as i64;
    if (k.saturating_sub(1) as f64 / 10.0) >= value {
        k.saturating_sub(1)
    } else if (k as f64 / 10.0) < value {
        k.saturating_add(1)
    } else {
        k
    }
}
