//! Error types for the ratio-of-means experiment.
//!
//! Configuration problems are reported before any random draw is made.
//! Numerical degeneracy inside a replicate (a zero denominator) is not an
//! error and never appears here.

use thiserror::Error;

/// Invalid experiment parameter.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Per-replicate sample size must be at least 1.
    #[error("Invalid sample size {0}: must be at least 1")]
    InvalidSampleSize(usize),

    /// Number of Monte Carlo replicates must be at least 1.
    #[error("Invalid replicate count {0}: must be at least 1")]
    InvalidReplicateCount(usize),

    /// Correlation must lie in the open interval (-1, 1).
    #[error("Invalid correlation {0}: must be in the open interval (-1, 1)")]
    InvalidCorrelation(f64),

    /// Number of experiment repetitions must be at least 1.
    #[error("Invalid repetition count {0}: must be at least 1")]
    InvalidRepetitionCount(usize),
}

/// Failure to build or decompose a covariance matrix.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CovarianceError {
    /// Correlation outside the open interval (-1, 1) or not finite.
    #[error("Correlation {0} is outside the open interval (-1, 1)")]
    CorrelationOutOfRange(f64),

    /// Matrix is not positive definite.
    #[error("Covariance matrix is not positive definite")]
    NotPositiveDefinite,
}

/// Top-level error for experiment entry points.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExperimentError {
    /// Experiment configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Covariance construction error.
    #[error("Covariance error: {0}")]
    Covariance(#[from] CovarianceError),
}
