//! B-value rounding and uniqueness.
//!
//! Nominally equal b-values drift by a few units between measurements, so
//! they are compared after rounding to a common order of magnitude (`bmag`).
//! `bmag = 2` rounds to the nearest hundred: 1005 and 995 both become 1000.

/// Rounding and deduplication policy for b-values.
///
/// Implement this trait to swap the tie-breaking rule used by grouping.
/// The default is [`MagnitudeRounding`].
pub trait BvalRounding {
    /// Round every b-value at magnitude `bmag`.
    ///
    /// Returns `(unique, rounded)`: the distinct rounded values sorted
    /// ascending, and the rounded value of each input element in input order.
    fn unique_rounded(&self, bvals: &[f64], bmag: i32) -> (Vec<f64>, Vec<f64>);
}

/// Round to the nearest multiple of `10^bmag`, ties to even.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MagnitudeRounding;

impl BvalRounding for MagnitudeRounding {
    fn unique_rounded(&self, bvals: &[f64], bmag: i32) -> (Vec<f64>, Vec<f64>) {
        unique_rounded(bvals, bmag)
    }
}

/// Default rounding magnitude: one order below the largest b-value.
///
/// Falls back to `0` (integer rounding) when there is no finite positive
/// maximum, e.g. for an empty set or an all-b0 acquisition.
pub fn default_bmag(bvals: &[f64]) -> i32 {
    let max = bvals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return 0;
    }
    max.log10().floor() as i32 - 1
}

/// Round each b-value to the nearest multiple of `10^bmag`.
///
/// `bmag` above `f64::MAX_10_EXP` is clamped, which rounds every ordinary
/// b-value to zero. A magnitude too fine to represent leaves the value as is.
pub fn round_bvals(bvals: &[f64], bmag: i32) -> Vec<f64> {
    let scale = 10f64.powi(bmag.min(f64::MAX_10_EXP));
    bvals
        .iter()
        .map(|&b| {
            let steps = b / scale;
            if steps.is_finite() {
                steps.round_ties_even() * scale
            } else {
                b
            }
        })
        .collect()
}

/// Rounded b-values together with their sorted distinct set.
pub fn unique_rounded(bvals: &[f64], bmag: i32) -> (Vec<f64>, Vec<f64>) {
    let rounded = round_bvals(bvals, bmag);
    (sorted_unique(&rounded), rounded)
}

/// Distinct values sorted ascending.
pub(crate) fn sorted_unique(values: &[f64]) -> Vec<f64> {
    // NaN payloads and sign bits differ; fold them so they sort adjacent.
    let mut out: Vec<f64> = values
        .iter()
        .map(|&v| if v.is_nan() { f64::NAN } else { v })
        .collect();
    out.sort_by(f64::total_cmp);
    out.dedup_by(|a, b| same_value(*a, *b));
    out
}

/// Value equality that treats `-0.0 == 0.0` and NaN as equal to itself.
#[inline]
pub(crate) fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
