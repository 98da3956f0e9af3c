//! Null distributions of the two-sample Kolmogorov-Smirnov statistic.
//!
//! - [`kolmogorov_sf`]: survival function of the limiting Kolmogorov
//!   distribution, `Q(lambda) = 2 * sum_{k>=1} (-1)^(k-1) exp(-2 k^2 lambda^2)`
//! - [`exact_exceedance`]: exact probability, for continuous data, that a
//!   random interleaving of the two samples drives the ECDF gap to the
//!   observed value or beyond
//!
//! # References
//!
//! - Stephens, M. A. (1970). "Use of the Kolmogorov-Smirnov, Cramér-von Mises
//!   and related statistics without extensive tables". JRSS B, 32(1).
//! - Hodges, J. L. (1958). "The significance probability of the Smirnov
//!   two-sample test". Arkiv för Matematik, 3(5).

use std::f64::consts::PI;

use super::Alternative;

const MAX_SERIES_TERMS: usize = 100;
const SERIES_EPS: f64 = 1e-16;
/// Below this point the alternating series converges too slowly and the
/// theta-function form of the CDF is used instead.
const SMALL_LAMBDA: f64 = 1.18;

/// Survival function `P(K > lambda)` of the Kolmogorov distribution.
///
/// Returns 1 for `lambda <= 0` and NaN for NaN input.
///
/// # Examples
///
/// ```rust
/// use ratio_core::comparison::kolmogorov_sf;
///
/// assert_eq!(kolmogorov_sf(0.0), 1.0);
/// // Classic 5% critical value
/// assert!((kolmogorov_sf(1.3581) - 0.05).abs() < 1e-4);
/// ```
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda.is_nan() {
        return f64::NAN;
    }
    if lambda <= 0.0 {
        return 1.0;
    }

    if lambda < SMALL_LAMBDA {
        // CDF = sqrt(2 pi) / lambda * sum_{k>=1} exp(-(2k-1)^2 pi^2 / (8 lambda^2))
        let factor = -PI * PI / (8.0 * lambda * lambda);
        let mut sum = 0.0;
        for k in 1..=MAX_SERIES_TERMS {
            let odd = (2 * k - 1) as f64;
            let term = (factor * odd * odd).exp();
            sum += term;
            if term <= SERIES_EPS * sum {
                break;
            }
        }
        let cdf = (2.0 * PI).sqrt() / lambda * sum;
        return (1.0 - cdf).clamp(0.0, 1.0);
    }

    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=MAX_SERIES_TERMS {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * lambda * lambda).exp();
        sum += sign * term;
        if term <= SERIES_EPS * sum.abs() {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Asymptotic p-value for a two-sample statistic `d` with sample sizes `m`
/// and `n`.
///
/// Two-sided uses the Stephens correction
/// `lambda = (sqrt(ne) + 0.12 + 0.11 / sqrt(ne)) * d` with `ne = m n / (m + n)`.
/// One-sided uses `exp(-2 ne d^2)`.
pub fn asymptotic_p_value(d: f64, m: usize, n: usize, alternative: Alternative) -> f64 {
    let en = effective_size(m, n);
    match alternative {
        Alternative::TwoSided => {
            let sqrt_en = en.sqrt();
            let lambda = (sqrt_en + 0.12 + 0.11 / sqrt_en) * d;
            kolmogorov_sf(lambda)
        }
        Alternative::Less | Alternative::Greater => (-2.0 * en * d * d).exp().clamp(0.0, 1.0),
    }
}

/// Effective sample size `m n / (m + n)`.
#[inline]
pub fn effective_size(m: usize, n: usize) -> f64 {
    let (m, n) = (m as f64, n as f64);
    m * n / (m + n)
}

/// Exact probability that the scaled ECDF gap `i n - j m` reaches `h` along a
/// uniformly random lattice path from `(0, 0)` to `(m, n)`.
///
/// `h` is the observed statistic scaled by `m n`, so the observed gap is an
/// integer. The path walks the merged sample: a step right consumes an
/// element of the first sample, a step up an element of the second.
/// Probability mass is propagated with hypergeometric step probabilities, so
/// every intermediate value stays in `[0, 1]`; the mass that first touches
/// the boundary is accumulated directly, which keeps small p-values precise.
///
/// Runs in `O(m n)` time and `O(n)` memory.
pub fn exact_exceedance(m: usize, n: usize, h: u64, alternative: Alternative) -> f64 {
    if m == 0 || n == 0 {
        return 1.0;
    }

    let outside = |i: usize, j: usize| -> bool {
        let gap = (i as i128) * (n as i128) - (j as i128) * (m as i128);
        let h = h as i128;
        match alternative {
            Alternative::TwoSided => gap.abs() >= h,
            Alternative::Greater => gap >= h,
            Alternative::Less => -gap >= h,
        }
    };

    if outside(0, 0) {
        return 1.0;
    }

    let total = (m + n) as f64;
    let mut exited = 0.0;
    let mut row = vec![0.0_f64; n + 1];
    row[0] = 1.0;

    // Row 0: only up-steps.
    for j in 1..=n {
        let from_below = row[j - 1] * (n - (j - 1)) as f64 / (total - (j - 1) as f64);
        if outside(0, j) {
            exited += from_below;
            row[j] = 0.0;
        } else {
            row[j] = from_below;
        }
    }

    for i in 1..=m {
        for j in 0..=n {
            // Right-step from (i - 1, j).
            let remaining = total - (i - 1) as f64 - j as f64;
            let mut mass = row[j] * (m - (i - 1)) as f64 / remaining;
            // Up-step from (i, j - 1), already updated in this row.
            if j > 0 {
                let remaining = total - i as f64 - (j - 1) as f64;
                mass += row[j - 1] * (n - (j - 1)) as f64 / remaining;
            }
            if outside(i, j) {
                exited += mass;
                row[j] = 0.0;
            } else {
                row[j] = mass;
            }
        }
    }

    exited.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kolmogorov_sf_limits() {
        assert_eq!(kolmogorov_sf(0.0), 1.0);
        assert_eq!(kolmogorov_sf(-1.0), 1.0);
        assert!(kolmogorov_sf(f64::NAN).is_nan());
        assert!(kolmogorov_sf(10.0) < 1e-80);
        assert_relative_eq!(kolmogorov_sf(0.05), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kolmogorov_sf_critical_values() {
        assert_relative_eq!(kolmogorov_sf(1.2238), 0.10, epsilon = 1e-4);
        assert_relative_eq!(kolmogorov_sf(1.3581), 0.05, epsilon = 1e-4);
        assert_relative_eq!(kolmogorov_sf(1.6276), 0.01, epsilon = 1e-4);
    }

    #[test]
    fn test_kolmogorov_sf_branches_agree() {
        // Both series are valid near the switch point.
        let lambda = SMALL_LAMBDA;
        let mut alt = 0.0;
        let mut sign = 1.0;
        for k in 1..=100 {
            let kf = k as f64;
            alt += sign * (-2.0 * kf * kf * lambda * lambda).exp();
            sign = -sign;
        }
        assert_relative_eq!(kolmogorov_sf(lambda - 1e-12), 2.0 * alt, epsilon = 1e-9);
    }

    #[test]
    fn test_kolmogorov_sf_monotone() {
        let mut previous = 1.0;
        for step in 1..400 {
            let value = kolmogorov_sf(step as f64 * 0.01);
            assert!(value <= previous + 1e-12, "not monotone at {}", step);
            previous = value;
        }
    }

    #[test]
    fn test_exact_small_case_by_enumeration() {
        // m = n = 2: six equally likely interleavings.
        // Gap path i*2 - j*2; sup |gap| = 4 (D = 1) for "aabb" and "bbaa".
        assert_relative_eq!(exact_exceedance(2, 2, 4, Alternative::TwoSided), 2.0 / 6.0);
        // Every path has |gap| >= 2 after its first step.
        assert_relative_eq!(exact_exceedance(2, 2, 2, Alternative::TwoSided), 1.0);
        // One-sided: only "aabb" reaches +4.
        assert_relative_eq!(exact_exceedance(2, 2, 4, Alternative::Greater), 1.0 / 6.0);
        assert_relative_eq!(exact_exceedance(2, 2, 4, Alternative::Less), 1.0 / 6.0);
    }

    #[test]
    fn test_exact_zero_threshold_is_certain() {
        assert_eq!(exact_exceedance(5, 7, 0, Alternative::TwoSided), 1.0);
    }

    #[test]
    fn test_exact_equal_sizes_closed_form() {
        // For m = n the exceedance has the closed form
        // 2 * sum_j (-1)^(j-1) C(2n, n - j k) / C(2n, n); n = 400, k = 32.
        let exact = exact_exceedance(400, 400, 32 * 400, Alternative::TwoSided);
        assert_relative_eq!(exact, 0.154_612_919_611_803, epsilon = 1e-10);
    }

    #[test]
    fn test_exact_close_to_asymptotic_for_large_samples() {
        let (m, n) = (400, 400);
        let d = 0.08;
        let h = (d * (m * n) as f64).round() as u64;
        let exact = exact_exceedance(m, n, h, Alternative::TwoSided);
        let asymptotic = asymptotic_p_value(d, m, n, Alternative::TwoSided);
        assert!(
            (exact - asymptotic).abs() < 0.02,
            "exact {} vs asymptotic {}",
            exact,
            asymptotic
        );
    }

    #[test]
    fn test_one_sided_asymptotic() {
        let p = asymptotic_p_value(0.1, 100, 100, Alternative::Greater);
        assert_relative_eq!(p, (-2.0 * 50.0 * 0.01_f64).exp());
    }
}
