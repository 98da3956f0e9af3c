//! Monte Carlo sampler for the ratio-of-means statistic.
//!
//! Each replicate draws, in this order:
//!
//! 1. `n` independent standard normals `X`, then `n` more for `Y`, and
//!    records `mean(X) / mean(Y)`;
//! 2. `n` bivariate normal pairs with covariance `[[1, rho], [rho, 1]]`
//!    (two fresh standard normals per pair, correlated through the Cholesky
//!    factor) and records `mean(X') / mean(Y')`.
//!
//! A replicate therefore consumes exactly `4 * n` standard normal draws and an
//! experiment `4 * n * mc`. The order is fixed so that the same seed always
//! reproduces the same two sequences.
//!
//! Sample buffers are allocated once per experiment and reused by every
//! replicate.

mod ratio;

pub use ratio::{mean, ratio_of_means};

use tracing::{debug, warn};

use crate::covariance::{CholeskyFactor, CovarianceMatrix};
use crate::error::{ConfigError, ExperimentError};
use crate::rng::ExperimentRng;

/// Ratio statistics from both regimes, one entry per replicate.
///
/// Index `i` of both sequences comes from replicate `i`. Non-finite ratios
/// (zero denominators) are kept in place.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatioSamples {
    /// Ratios from independently drawn `X` and `Y`.
    pub uncorrelated: Vec<f64>,
    /// Ratios from bivariate normal `(X', Y')` pairs.
    pub correlated: Vec<f64>,
}

impl RatioSamples {
    /// Number of replicates.
    pub fn len(&self) -> usize {
        self.uncorrelated.len()
    }

    /// Returns `true` if there are no replicates.
    pub fn is_empty(&self) -> bool {
        self.uncorrelated.is_empty()
    }

    /// Number of non-finite ratios as `(uncorrelated, correlated)`.
    pub fn non_finite_counts(&self) -> (usize, usize) {
        (
            count_non_finite(&self.uncorrelated),
            count_non_finite(&self.correlated),
        )
    }
}

fn count_non_finite(values: &[f64]) -> usize {
    values.iter().filter(|v| !v.is_finite()).count()
}

/// Runs `mc` replicates with sample size `n` and correlation `rho`.
///
/// # Errors
///
/// - [`ConfigError::InvalidSampleSize`] if `n == 0`
/// - [`ConfigError::InvalidReplicateCount`] if `mc == 0`
/// - [`CovarianceError::CorrelationOutOfRange`] unless `-1 < rho < 1`
///
/// All checks happen before the generator is touched.
///
/// [`CovarianceError::CorrelationOutOfRange`]: crate::error::CovarianceError::CorrelationOutOfRange
///
/// # Examples
///
/// ```rust
/// use ratio_core::rng::ExperimentRng;
/// use ratio_core::sampler::run_experiment;
///
/// let mut rng = ExperimentRng::from_seed(123);
/// let samples = run_experiment(100, 50, 0.8, &mut rng).unwrap();
///
/// assert_eq!(samples.uncorrelated.len(), 50);
/// assert_eq!(samples.correlated.len(), 50);
/// assert_eq!(rng.draws(), 4 * 100 * 50);
/// ```
pub fn run_experiment(
    n: usize,
    mc: usize,
    rho: f64,
    rng: &mut ExperimentRng,
) -> Result<RatioSamples, ExperimentError> {
    let sigma = CovarianceMatrix::bivariate(rho)?;
    let cholesky = sigma.cholesky()?;
    run_with_cholesky(n, mc, &cholesky, rng)
}

/// Runs the sampler with a precomputed 2x2 Cholesky factor.
///
/// # Errors
///
/// Same sample size and replicate count checks as [`run_experiment`].
pub fn run_with_cholesky(
    n: usize,
    mc: usize,
    cholesky: &CholeskyFactor,
    rng: &mut ExperimentRng,
) -> Result<RatioSamples, ExperimentError> {
    if n == 0 {
        return Err(ConfigError::InvalidSampleSize(n).into());
    }
    if mc == 0 {
        return Err(ConfigError::InvalidReplicateCount(mc).into());
    }

    debug!(n, mc, seed = rng.seed(), "running ratio-of-means sampler");

    let mut x = vec![0.0; n];
    let mut y = vec![0.0; n];
    let mut uncorrelated = Vec::with_capacity(mc);
    let mut correlated = Vec::with_capacity(mc);

    for _ in 0..mc {
        rng.fill_normal(&mut x);
        rng.fill_normal(&mut y);
        uncorrelated.push(ratio_of_means(&x, &y));

        for (xi, yi) in x.iter_mut().zip(y.iter_mut()) {
            let mut z = [rng.gen_normal(), rng.gen_normal()];
            cholesky.transform_inplace(&mut z);
            *xi = z[0];
            *yi = z[1];
        }
        correlated.push(ratio_of_means(&x, &y));
    }

    let samples = RatioSamples {
        uncorrelated,
        correlated,
    };

    let (bad_unc, bad_cor) = samples.non_finite_counts();
    if bad_unc + bad_cor > 0 {
        warn!(
            uncorrelated = bad_unc,
            correlated = bad_cor,
            "non-finite ratios produced by zero denominators"
        );
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CovarianceError;

    #[test]
    fn test_shape() {
        let mut rng = ExperimentRng::from_seed(123);
        for (n, mc) in [(1, 1), (1, 17), (30, 5), (300, 40)] {
            let samples = run_experiment(n, mc, 0.8, &mut rng).unwrap();
            assert_eq!(samples.uncorrelated.len(), mc);
            assert_eq!(samples.correlated.len(), mc);
            assert_eq!(samples.len(), mc);
            assert!(!samples.is_empty());
        }
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = ExperimentRng::from_seed(123);
        let mut rng2 = ExperimentRng::from_seed(123);

        let a = run_experiment(50, 100, 0.8, &mut rng1).unwrap();
        let b = run_experiment(50, 100, 0.8, &mut rng2).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_stream_advances_between_calls() {
        let mut rng = ExperimentRng::from_seed(123);

        let first = run_experiment(20, 10, 0.5, &mut rng).unwrap();
        let second = run_experiment(20, 10, 0.5, &mut rng).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_draw_budget() {
        let mut rng = ExperimentRng::from_seed(9);
        run_experiment(37, 11, -0.3, &mut rng).unwrap();
        assert_eq!(rng.draws(), 4 * 37 * 11);
    }

    #[test]
    fn test_uncorrelated_regime_drawn_first() {
        // The first uncorrelated ratio uses the first 2n draws of the stream.
        let n = 25;
        let mut reference = ExperimentRng::from_seed(77);
        let mut x = vec![0.0; n];
        let mut y = vec![0.0; n];
        reference.fill_normal(&mut x);
        reference.fill_normal(&mut y);
        let expected = ratio_of_means(&x, &y);

        let mut rng = ExperimentRng::from_seed(77);
        let samples = run_experiment(n, 1, 0.8, &mut rng).unwrap();

        assert_eq!(samples.uncorrelated[0], expected);
    }

    #[test]
    fn test_correlated_regime_uses_cholesky() {
        let n = 10;
        let rho: f64 = 0.9;
        let mut reference = ExperimentRng::from_seed(5);
        let mut skip = vec![0.0; 2 * n];
        reference.fill_normal(&mut skip);

        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        for _ in 0..n {
            let z1 = reference.gen_normal();
            let z2 = reference.gen_normal();
            xs.push(z1);
            ys.push(rho * z1 + (1.0 - rho * rho).sqrt() * z2);
        }
        let expected = ratio_of_means(&xs, &ys);

        let mut rng = ExperimentRng::from_seed(5);
        let samples = run_experiment(n, 1, rho, &mut rng).unwrap();

        let tolerance = 1e-12 * expected.abs().max(1.0);
        assert!((samples.correlated[0] - expected).abs() <= tolerance);
    }

    #[test]
    fn test_invalid_parameters_rejected_before_drawing() {
        let mut rng = ExperimentRng::from_seed(1);

        assert!(matches!(
            run_experiment(0, 10, 0.5, &mut rng),
            Err(ExperimentError::Config(ConfigError::InvalidSampleSize(0)))
        ));
        assert!(matches!(
            run_experiment(10, 0, 0.5, &mut rng),
            Err(ExperimentError::Config(
                ConfigError::InvalidReplicateCount(0)
            ))
        ));
        assert!(matches!(
            run_experiment(10, 10, 1.0, &mut rng),
            Err(ExperimentError::Covariance(
                CovarianceError::CorrelationOutOfRange(_)
            ))
        ));
        assert!(matches!(
            run_experiment(10, 10, f64::NAN, &mut rng),
            Err(ExperimentError::Covariance(_))
        ));

        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_high_correlation_concentrates_near_one() {
        let mut rng = ExperimentRng::from_seed(123);
        let samples = run_experiment(300, 200, 0.99, &mut rng).unwrap();

        let mut sorted = samples.correlated.clone();
        sorted.sort_by(f64::total_cmp);
        let median = sorted[sorted.len() / 2];
        assert!(
            (median - 1.0).abs() < 0.1,
            "median correlated ratio {} should be close to 1",
            median
        );
    }

    #[test]
    fn test_non_finite_counts() {
        let samples = RatioSamples {
            uncorrelated: vec![1.0, f64::INFINITY, f64::NAN],
            correlated: vec![0.5, 2.0, f64::NEG_INFINITY],
        };
        assert_eq!(samples.non_finite_counts(), (2, 1));
    }
}
