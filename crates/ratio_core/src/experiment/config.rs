//! Experiment configuration.
//!
//! The whole configuration surface is `{n, mc, rho, plots}` plus the seed of
//! the random stream and the KS p-value method. There are no files or
//! environment variables; callers set fields through the builder.

use crate::comparison::Method;
use crate::error::ConfigError;
use crate::rng::ExperimentRng;

/// Default per-replicate sample size.
pub const DEFAULT_N: usize = 300;

/// Default number of Monte Carlo replicates.
pub const DEFAULT_MC: usize = 1000;

/// Default correlation of the correlated regime.
pub const DEFAULT_RHO: f64 = 0.8;

/// Default seed of the random stream.
pub const DEFAULT_SEED: u64 = 123;

/// Default number of experiment repetitions in a p-value study.
pub const DEFAULT_REPETITIONS: usize = 1000;

/// Validated experiment configuration.
///
/// Use [`ExperimentConfig::builder`] to construct instances; every field has
/// a default.
///
/// # Examples
///
/// ```rust
/// use ratio_core::experiment::ExperimentConfig;
///
/// let config = ExperimentConfig::builder()
///     .rho(0.5)
///     .plots(false)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n(), 300);
/// assert_eq!(config.mc(), 1000);
/// assert_eq!(config.rho(), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    n: usize,
    mc: usize,
    rho: f64,
    plots: bool,
    seed: u64,
    method: Method,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            mc: DEFAULT_MC,
            rho: DEFAULT_RHO,
            plots: true,
            seed: DEFAULT_SEED,
            method: Method::Asymptotic,
        }
    }
}

impl ExperimentConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::default()
    }

    /// Per-replicate sample size.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of Monte Carlo replicates.
    #[inline]
    pub fn mc(&self) -> usize {
        self.mc
    }

    /// Correlation of the correlated regime.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Whether diagnostics are rendered after the comparison.
    #[inline]
    pub fn plots(&self) -> bool {
        self.plots
    }

    /// Seed for [`ExperimentConfig::rng`].
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// KS p-value method.
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Fresh generator seeded with [`ExperimentConfig::seed`].
    pub fn rng(&self) -> ExperimentRng {
        ExperimentRng::from_seed(self.seed)
    }

    /// Copy of this configuration with diagnostics turned off.
    pub fn without_plots(&self) -> Self {
        Self {
            plots: false,
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `n` is 0
    /// - `mc` is 0
    /// - `rho` is not in the open interval (-1, 1)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n == 0 {
            return Err(ConfigError::InvalidSampleSize(self.n));
        }
        if self.mc == 0 {
            return Err(ConfigError::InvalidReplicateCount(self.mc));
        }
        if !(self.rho > -1.0 && self.rho < 1.0) {
            return Err(ConfigError::InvalidCorrelation(self.rho));
        }
        Ok(())
    }
}

/// Builder for [`ExperimentConfig`].
///
/// Unset fields fall back to [`DEFAULT_N`], [`DEFAULT_MC`], [`DEFAULT_RHO`],
/// `plots = true`, [`DEFAULT_SEED`] and asymptotic p-values.
#[derive(Clone, Debug, Default)]
pub struct ExperimentConfigBuilder {
    n: Option<usize>,
    mc: Option<usize>,
    rho: Option<f64>,
    plots: Option<bool>,
    seed: Option<u64>,
    method: Option<Method>,
}

impl ExperimentConfigBuilder {
    /// Sets the per-replicate sample size (at least 1).
    #[inline]
    pub fn n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Sets the number of Monte Carlo replicates (at least 1).
    #[inline]
    pub fn mc(mut self, mc: usize) -> Self {
        self.mc = Some(mc);
        self
    }

    /// Sets the correlation, in (-1, 1).
    #[inline]
    pub fn rho(mut self, rho: f64) -> Self {
        self.rho = Some(rho);
        self
    }

    /// Enables or disables diagnostics.
    #[inline]
    pub fn plots(mut self, plots: bool) -> Self {
        self.plots = Some(plots);
        self
    }

    /// Sets the seed of the random stream.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the KS p-value method.
    #[inline]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any field is out of range.
    pub fn build(self) -> Result<ExperimentConfig, ConfigError> {
        let defaults = ExperimentConfig::default();
        let config = ExperimentConfig {
            n: self.n.unwrap_or(defaults.n),
            mc: self.mc.unwrap_or(defaults.mc),
            rho: self.rho.unwrap_or(defaults.rho),
            plots: self.plots.unwrap_or(defaults.plots),
            seed: self.seed.unwrap_or(defaults.seed),
            method: self.method.unwrap_or(defaults.method),
        };

        config.validate()?;
        Ok(config)
    }
}
