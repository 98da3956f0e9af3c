//! Two-sample Kolmogorov-Smirnov comparison.
//!
//! The statistic is the largest gap between the empirical CDFs of the two
//! samples, computed exactly by walking both samples in sorted order. Values
//! tied across the samples are consumed together before the gap is measured,
//! so `compare(a, a)` is exactly zero.
//!
//! # Non-finite values
//!
//! Ratios with a zero denominator reach this stage as `±inf` or NaN. They are
//! neither filtered nor rejected: values are ordered with IEEE total ordering
//! (`-NaN < -inf < finite < +inf < +NaN`) and take part in the ECDFs like any
//! other observation. Their counts are reported on [`KsTest`].
//!
//! # Examples
//!
//! ```rust
//! use ratio_core::comparison::compare;
//!
//! let a = [0.1, 0.4, 0.35, 0.8];
//! let b = [1.2, 1.5, 0.9, 2.0];
//! let (statistic, p_value) = compare(&a, &b);
//!
//! assert_eq!(statistic, 1.0);
//! assert!(p_value < 0.05);
//! ```

mod kolmogorov;

pub use kolmogorov::{asymptotic_p_value, effective_size, exact_exceedance, kolmogorov_sf};

use std::cmp::Ordering;

use tracing::warn;

/// Largest sample size for which [`Method::Auto`] computes exact p-values.
pub const EXACT_AUTO_MAX: usize = 10_000;

/// Alternative hypothesis.
///
/// With `F_a`, `F_b` the ECDFs of the first and second sample:
///
/// - `TwoSided`: statistic `sup |F_a - F_b|`
/// - `Greater`: statistic `sup (F_a - F_b)`
/// - `Less`: statistic `sup (F_b - F_a)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Alternative {
    /// The two distributions differ.
    #[default]
    TwoSided,
    /// The first sample's CDF lies below the second's somewhere.
    Less,
    /// The first sample's CDF lies above the second's somewhere.
    Greater,
}

/// How the p-value is obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Method {
    /// Exact when both samples have at most [`EXACT_AUTO_MAX`] elements.
    Auto,
    /// Exact lattice-path probability (assumes continuous data, no ties).
    Exact,
    /// Limiting Kolmogorov distribution with finite-sample correction.
    #[default]
    Asymptotic,
}

/// Result of a two-sample KS test.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KsTest {
    /// KS statistic in `[0, 1]`.
    pub statistic: f64,
    /// p-value in `[0, 1]`.
    pub p_value: f64,
    /// Size of the first sample.
    pub n_a: usize,
    /// Size of the second sample.
    pub n_b: usize,
    /// Alternative hypothesis tested.
    pub alternative: Alternative,
    /// Method actually used (never `Auto`).
    pub method: Method,
    /// Non-finite values in the first sample.
    pub non_finite_a: usize,
    /// Non-finite values in the second sample.
    pub non_finite_b: usize,
}

impl KsTest {
    /// `(statistic, p_value)`.
    pub fn as_pair(&self) -> (f64, f64) {
        (self.statistic, self.p_value)
    }

    /// Returns `true` if either sample was empty and the result is the
    /// degenerate `(0, 1)`.
    pub fn is_degenerate(&self) -> bool {
        self.n_a == 0 || self.n_b == 0
    }

    /// Returns `true` if `p_value < alpha`.
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Two-sided asymptotic KS test returning `(statistic, p_value)`.
///
/// An empty input gives the degenerate `(0.0, 1.0)`.
pub fn compare(sample_a: &[f64], sample_b: &[f64]) -> (f64, f64) {
    ks_2samp(
        sample_a,
        sample_b,
        Alternative::TwoSided,
        Method::Asymptotic,
    )
    .as_pair()
}

/// Two-sample Kolmogorov-Smirnov test.
///
/// Neither input needs to be sorted and they may differ in length. If either
/// is empty the result is degenerate (statistic 0, p-value 1) and a warning
/// is logged.
///
/// # Examples
///
/// ```rust
/// use ratio_core::comparison::{ks_2samp, Alternative, Method};
///
/// let a: Vec<f64> = (0..50).map(|i| i as f64).collect();
/// let b: Vec<f64> = (0..50).map(|i| i as f64 + 0.5).collect();
///
/// let result = ks_2samp(&a, &b, Alternative::TwoSided, Method::Exact);
/// assert!((result.statistic - 0.02).abs() < 1e-12);
/// assert!(result.p_value > 0.99);
/// ```
pub fn ks_2samp(
    sample_a: &[f64],
    sample_b: &[f64],
    alternative: Alternative,
    method: Method,
) -> KsTest {
    let m = sample_a.len();
    let n = sample_b.len();
    let non_finite_a = sample_a.iter().filter(|v| !v.is_finite()).count();
    let non_finite_b = sample_b.iter().filter(|v| !v.is_finite()).count();

    let method = match method {
        Method::Auto if m.max(n) <= EXACT_AUTO_MAX => Method::Exact,
        Method::Auto => Method::Asymptotic,
        other => other,
    };

    if m == 0 || n == 0 {
        warn!(n_a = m, n_b = n, "empty sample passed to KS test");
        return KsTest {
            statistic: 0.0,
            p_value: 1.0,
            n_a: m,
            n_b: n,
            alternative,
            method,
            non_finite_a,
            non_finite_b,
        };
    }

    let a = sorted_copy(sample_a);
    let b = sorted_copy(sample_b);
    let (gap_plus, gap_minus) = scaled_ecdf_extremes(&a, &b);

    let gap = match alternative {
        Alternative::TwoSided => gap_plus.max(gap_minus),
        Alternative::Greater => gap_plus,
        Alternative::Less => gap_minus,
    };
    let statistic = (gap as f64 / (m as f64 * n as f64)).clamp(0.0, 1.0);

    let p_value = match method {
        Method::Exact => exact_exceedance(m, n, gap, alternative),
        _ => asymptotic_p_value(statistic, m, n, alternative),
    };

    KsTest {
        statistic,
        p_value: p_value.clamp(0.0, 1.0),
        n_a: m,
        n_b: n,
        alternative,
        method,
        non_finite_a,
        non_finite_b,
    }
}

/// Sorts a copy under IEEE total ordering, folding `-0.0` into `0.0`.
fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().map(canonical).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Folds `-0.0` into `0.0` and every NaN into `f64::NAN`, so values that
/// compare equal, or are both NaN, tie under `total_cmp`.
fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Largest positive and negative ECDF gaps, scaled by `m n` so they are exact
/// integers: `max (i n - j m)` and `max (j m - i n)` over the merge.
fn scaled_ecdf_extremes(a: &[f64], b: &[f64]) -> (u64, u64) {
    let (m, n) = (a.len(), b.len());
    let (mut i, mut j) = (0usize, 0usize);
    let mut plus: i128 = 0;
    let mut minus: i128 = 0;

    while i < m && j < n {
        let value = match a[i].total_cmp(&b[j]) {
            Ordering::Greater => b[j],
            _ => a[i],
        };
        while i < m && a[i].total_cmp(&value) == Ordering::Equal {
            i += 1;
        }
        while j < n && b[j].total_cmp(&value) == Ordering::Equal {
            j += 1;
        }

        let gap = (i as i128) * (n as i128) - (j as i128) * (m as i128);
        plus = plus.max(gap);
        minus = minus.max(-gap);
    }

    (plus as u64, minus as u64)
}
