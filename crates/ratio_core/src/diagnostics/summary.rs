//! Numeric summaries behind the diagnostic displays.
//!
//! All summaries ignore non-finite values; callers report those separately.

use statrs::distribution::{ContinuousCDF, Normal};

fn finite_sorted(values: &[f64]) -> Vec<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    finite.sort_by(f64::total_cmp);
    finite
}

/// Linear-interpolation quantile of sorted data, `q` in `[0, 1]`.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Box-and-whisker summary with Tukey whiskers at 1.5 IQR.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxplotSummary {
    /// Smallest finite value.
    pub min: f64,
    /// Lowest value inside `q1 - 1.5 IQR`.
    pub lower_whisker: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Highest value inside `q3 + 1.5 IQR`.
    pub upper_whisker: f64,
    /// Largest finite value.
    pub max: f64,
    /// Values beyond the whiskers.
    pub outliers: usize,
    /// Finite values summarised.
    pub count: usize,
}

impl BoxplotSummary {
    /// Summarises the finite values; `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = finite_sorted(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .filter(|&&v| v < lower_whisker || v > upper_whisker)
            .count();

        Some(Self {
            min: sorted[0],
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            max: sorted[sorted.len() - 1],
            outliers,
            count: sorted.len(),
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Equal-width histogram over the finite range of the data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    /// `bins + 1` bin edges.
    pub edges: Vec<f64>,
    /// Counts per bin; the last bin includes its right edge.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins the finite values; `None` if there are none or `bins == 0`.
    ///
    /// Constant data is centred in a window of width 1.
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        let sorted = finite_sorted(values);
        if sorted.is_empty() || bins == 0 {
            return None;
        }

        let (mut lo, mut hi) = (sorted[0], sorted[sorted.len() - 1]);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        // Halved so the span stays finite for any pair of finite endpoints.
        let half_span = hi / 2.0 - lo / 2.0;
        let edges: Vec<f64> = (0..=bins)
            .map(|k| {
                let t = k as f64 / bins as f64;
                lo * (1.0 - t) + hi * t
            })
            .collect();
        let mut counts = vec![0usize; bins];
        for &v in &sorted {
            let t = (v / 2.0 - lo / 2.0) / half_span;
            let idx = ((t * bins as f64) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Normal probability plot: ordered data against standard normal quantiles,
/// with a least-squares line.
///
/// Theoretical quantiles use Filliben's order-statistic medians.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityPlot {
    /// Theoretical standard normal quantiles.
    pub theoretical: Vec<f64>,
    /// Ordered finite data.
    pub ordered: Vec<f64>,
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Correlation between theoretical and ordered values.
    pub r: f64,
}

impl ProbabilityPlot {
    /// Builds the plot from the finite values; `None` with fewer than two.
    pub fn normal(values: &[f64]) -> Option<Self> {
        let ordered = finite_sorted(values);
        let n = ordered.len();
        if n < 2 {
            return None;
        }

        let standard = Normal::new(0.0, 1.0).ok()?;
        let theoretical: Vec<f64> = filliben_medians(n)
            .into_iter()
            .map(|p| standard.inverse_cdf(p))
            .collect();

        let nf = n as f64;
        let mean_x = theoretical.iter().sum::<f64>() / nf;
        let mean_y = ordered.iter().sum::<f64>() / nf;
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (x, y) in theoretical.iter().zip(&ordered) {
            let (dx, dy) = (x - mean_x, y - mean_y);
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let r = sxy / (sxx * syy).sqrt();

        Some(Self {
            theoretical,
            ordered,
            slope,
            intercept,
            r,
        })
    }
}

/// Filliben (1975) estimates of uniform order-statistic medians.
fn filliben_medians(n: usize) -> Vec<f64> {
    let nf = n as f64;
    let last = 0.5_f64.powf(1.0 / nf);
    let mut medians: Vec<f64> = (1..=n)
        .map(|i| (i as f64 - 0.3175) / (nf + 0.365))
        .collect();
    medians[n - 1] = last;
    medians[0] = 1.0 - last;
    medians
}
