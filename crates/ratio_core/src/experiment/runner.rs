//! Single experiment: sampler, comparator, optional diagnostics.

use tracing::{debug, warn};

use crate::comparison::{ks_2samp, Alternative, KsTest};
use crate::covariance::CovarianceMatrix;
use crate::diagnostics::DiagnosticsReporter;
use crate::error::ExperimentError;
use crate::rng::ExperimentRng;
use crate::sampler::{run_with_cholesky, RatioSamples};

use super::config::ExperimentConfig;

/// Samples and KS result of one experiment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentOutcome {
    /// Ratio sequences from both regimes.
    pub samples: RatioSamples,
    /// Two-sided KS comparison of the two sequences.
    pub test: KsTest,
}

impl ExperimentOutcome {
    /// p-value of the comparison.
    pub fn p_value(&self) -> f64 {
        self.test.p_value
    }
}

/// Runs one experiment and returns the samples together with the KS result.
///
/// The reporter is invoked only when `config.plots()` is true. A reporter
/// error is logged and otherwise ignored.
///
/// # Errors
///
/// Configuration errors, raised before any random draw.
pub fn run_comparison(
    config: &ExperimentConfig,
    rng: &mut ExperimentRng,
    reporter: &mut dyn DiagnosticsReporter,
) -> Result<ExperimentOutcome, ExperimentError> {
    config.validate()?;
    let cholesky = CovarianceMatrix::bivariate(config.rho())?.cholesky()?;

    let samples = run_with_cholesky(config.n(), config.mc(), &cholesky, rng)?;
    let test = ks_2samp(
        &samples.uncorrelated,
        &samples.correlated,
        Alternative::TwoSided,
        config.method(),
    );

    debug!(
        n = config.n(),
        mc = config.mc(),
        rho = config.rho(),
        statistic = test.statistic,
        p_value = test.p_value,
        "experiment finished"
    );

    if config.plots() {
        if let Err(err) = reporter.report(&samples, &test) {
            warn!(error = %err, "diagnostics reporter failed");
        }
    }

    Ok(ExperimentOutcome { samples, test })
}

/// Runs one experiment and returns its KS p-value.
///
/// # Errors
///
/// Configuration errors, raised before any random draw.
///
/// # Examples
///
/// ```rust
/// use ratio_core::diagnostics::NullReporter;
/// use ratio_core::experiment::{compare_correlations, ExperimentConfig};
///
/// let config = ExperimentConfig::builder().n(30).mc(100).plots(false).build().unwrap();
/// let mut rng = config.rng();
///
/// let p = compare_correlations(&config, &mut rng, &mut NullReporter).unwrap();
/// assert!((0.0..=1.0).contains(&p));
/// ```
pub fn compare_correlations(
    config: &ExperimentConfig,
    rng: &mut ExperimentRng,
    reporter: &mut dyn DiagnosticsReporter,
) -> Result<f64, ExperimentError> {
    run_comparison(config, rng, reporter).map(|outcome| outcome.p_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullReporter;
    use std::io;

    /// Counts invocations; optionally fails.
    #[derive(Default)]
    struct CountingReporter {
        calls: usize,
        fail: bool,
    }

    impl DiagnosticsReporter for CountingReporter {
        fn report(&mut self, samples: &RatioSamples, _test: &KsTest) -> io::Result<()> {
            self.calls += 1;
            assert!(!samples.is_empty());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::Other, "sink closed"))
            } else {
                Ok(())
            }
        }
    }

    fn small_config(plots: bool) -> ExperimentConfig {
        ExperimentConfig::builder()
            .n(40)
            .mc(60)
            .rho(0.8)
            .plots(plots)
            .build()
            .unwrap()
    }

    #[test]
    fn test_reporter_invoked_only_with_plots() {
        let mut reporter = CountingReporter::default();

        let mut rng = ExperimentRng::from_seed(123);
        compare_correlations(&small_config(false), &mut rng, &mut reporter).unwrap();
        assert_eq!(reporter.calls, 0);

        let mut rng = ExperimentRng::from_seed(123);
        compare_correlations(&small_config(true), &mut rng, &mut reporter).unwrap();
        assert_eq!(reporter.calls, 1);
    }

    #[test]
    fn test_plots_do_not_change_result() {
        let mut rng1 = ExperimentRng::from_seed(123);
        let mut rng2 = ExperimentRng::from_seed(123);
        let mut failing = CountingReporter {
            calls: 0,
            fail: true,
        };

        let quiet_config = small_config(false);
        let quiet = compare_correlations(&quiet_config, &mut rng1, &mut NullReporter).unwrap();
        let loud = compare_correlations(&small_config(true), &mut rng2, &mut failing).unwrap();

        assert_eq!(quiet, loud);
        assert_eq!(failing.calls, 1);
    }

    #[test]
    fn test_outcome_matches_direct_comparison() {
        let config = small_config(false);
        let mut rng = config.rng();
        let outcome = run_comparison(&config, &mut rng, &mut NullReporter).unwrap();

        let (statistic, p_value) =
            crate::comparison::compare(&outcome.samples.uncorrelated, &outcome.samples.correlated);
        assert_eq!(outcome.test.statistic, statistic);
        assert_eq!(outcome.p_value(), p_value);
        assert_eq!(outcome.samples.len(), 60);
    }
}
