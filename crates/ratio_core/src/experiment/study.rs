//! Repeated experiments collecting p-values.

use tracing::info;

use crate::diagnostics::NullReporter;
use crate::error::{ConfigError, ExperimentError};
use crate::rng::ExperimentRng;

use super::config::ExperimentConfig;
use super::runner::compare_correlations;

/// p-values from repeated experiments, in run order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PValueStudy {
    /// One p-value per repetition.
    pub p_values: Vec<f64>,
}

impl PValueStudy {
    /// Number of repetitions.
    pub fn len(&self) -> usize {
        self.p_values.len()
    }

    /// Returns `true` if no repetitions were run.
    pub fn is_empty(&self) -> bool {
        self.p_values.is_empty()
    }

    /// Fraction of p-values strictly below `alpha`.
    pub fn rejection_rate(&self, alpha: f64) -> f64 {
        if self.p_values.is_empty() {
            return 0.0;
        }
        let rejected = self.p_values.iter().filter(|&&p| p < alpha).count();
        rejected as f64 / self.p_values.len() as f64
    }

    /// Mean p-value; NaN when empty.
    pub fn mean(&self) -> f64 {
        self.p_values.iter().sum::<f64>() / self.p_values.len() as f64
    }

    /// Smallest p-value.
    pub fn min(&self) -> Option<f64> {
        self.p_values.iter().copied().min_by(f64::total_cmp)
    }

    /// Largest p-value.
    pub fn max(&self) -> Option<f64> {
        self.p_values.iter().copied().max_by(f64::total_cmp)
    }
}

/// Runs the experiment `repetitions` times on the continuing stream of `rng`,
/// with diagnostics disabled.
///
/// # Errors
///
/// - [`ConfigError::InvalidRepetitionCount`] if `repetitions == 0`
/// - any configuration error of the experiment itself
///
/// # Examples
///
/// ```rust
/// use ratio_core::experiment::{run_study, ExperimentConfig};
///
/// let config = ExperimentConfig::builder().n(20).mc(50).build().unwrap();
/// let mut rng = config.rng();
///
/// let study = run_study(&config, 5, &mut rng).unwrap();
/// assert_eq!(study.len(), 5);
/// assert!(study.p_values.iter().all(|p| (0.0..=1.0).contains(p)));
/// ```
pub fn run_study(
    config: &ExperimentConfig,
    repetitions: usize,
    rng: &mut ExperimentRng,
) -> Result<PValueStudy, ExperimentError> {
    if repetitions == 0 {
        return Err(ConfigError::InvalidRepetitionCount(repetitions).into());
    }
    config.validate()?;

    let quiet = config.without_plots();
    let mut p_values = Vec::with_capacity(repetitions);
    for _ in 0..repetitions {
        p_values.push(compare_correlations(&quiet, rng, &mut NullReporter)?);
    }

    let study = PValueStudy { p_values };
    info!(
        repetitions,
        rho = config.rho(),
        mean_p = study.mean(),
        rejection_rate_05 = study.rejection_rate(0.05),
        "p-value study finished"
    );

    Ok(study)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_repetitions_rejected() {
        let config = ExperimentConfig::default();
        let mut rng = config.rng();
        let result = run_study(&config, 0, &mut rng);

        assert!(matches!(
            result,
            Err(ExperimentError::Config(
                ConfigError::InvalidRepetitionCount(0)
            ))
        ));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_study_is_reproducible() {
        let config = ExperimentConfig::builder().n(20).mc(40).build().unwrap();

        let a = run_study(&config, 4, &mut config.rng()).unwrap();
        let b = run_study(&config, 4, &mut config.rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stream_continues_across_repetitions() {
        let config = ExperimentConfig::builder().n(20).mc(40).build().unwrap();
        let mut rng = config.rng();

        let study = run_study(&config, 3, &mut rng).unwrap();
        assert_eq!(study.len(), 3);
        assert_eq!(rng.draws(), 3 * 4 * 20 * 40);
    }

    #[test]
    fn test_summary_statistics() {
        let study = PValueStudy {
            p_values: vec![0.01, 0.2, 0.04, 0.75],
        };

        assert_eq!(study.len(), 4);
        assert_relative_eq!(study.rejection_rate(0.05), 0.5);
        assert_relative_eq!(study.mean(), 0.25);
        assert_eq!(study.min(), Some(0.01));
        assert_eq!(study.max(), Some(0.75));
    }

    #[test]
    fn test_empty_summary() {
        let study = PValueStudy { p_values: vec![] };
        assert!(study.is_empty());
        assert_eq!(study.rejection_rate(0.05), 0.0);
        assert!(study.mean().is_nan());
        assert_eq!(study.min(), None);
    }
}
