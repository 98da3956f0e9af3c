//! Experiment orchestration.
//!
//! [`compare_correlations`] is the single-experiment entry point: validate
//! the configuration, build the covariance matrix, run the sampler, run the
//! KS comparison, optionally hand everything to a diagnostics reporter, and
//! return the p-value.
//!
//! [`run_study`] repeats the experiment on a continuing random stream with
//! diagnostics disabled and collects the p-values.

pub mod config;
mod runner;
mod study;

pub use config::{
    ExperimentConfig, ExperimentConfigBuilder, DEFAULT_MC, DEFAULT_N, DEFAULT_REPETITIONS,
    DEFAULT_RHO, DEFAULT_SEED,
};
pub use runner::{compare_correlations, run_comparison, ExperimentOutcome};
pub use study::{run_study, PValueStudy};
