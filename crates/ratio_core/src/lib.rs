//! # Ratio of Means: Correlated vs Uncorrelated
//!
//! Monte Carlo experiment comparing the sampling distribution of
//! `mean(X) / mean(Y)` when `X` and `Y` are independent standard normals
//! against the case where each `(X_i, Y_i)` pair is bivariate normal with
//! correlation `rho`. The two empirical distributions are compared with a
//! two-sample Kolmogorov-Smirnov test.
//!
//! ## Architecture
//!
//! ```text
//! compare_correlations
//! ├── ExperimentConfig    (n, mc, rho, plots)
//! ├── ExperimentRng       (seeded, passed by &mut)
//! ├── run_experiment()    (sampler: two ratio sequences of length mc)
//! ├── compare()           (two-sample KS statistic and p-value)
//! └── DiagnosticsReporter (optional, invoked only when plots are enabled)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use ratio_core::diagnostics::NullReporter;
//! use ratio_core::experiment::{compare_correlations, ExperimentConfig};
//! use ratio_core::rng::ExperimentRng;
//!
//! let config = ExperimentConfig::builder()
//!     .n(50)
//!     .mc(200)
//!     .rho(0.8)
//!     .plots(false)
//!     .build()
//!     .unwrap();
//!
//! let mut rng = ExperimentRng::from_seed(123);
//! let p_value = compare_correlations(&config, &mut rng, &mut NullReporter).unwrap();
//! assert!((0.0..=1.0).contains(&p_value));
//! ```
//!
//! ## Reproducibility
//!
//! There is no process-wide generator. The caller seeds one
//! [`rng::ExperimentRng`] and threads it through every call; the same seed and
//! the same sequence of calls always reproduce the same numbers.

pub mod comparison;
pub mod covariance;
pub mod diagnostics;
pub mod error;
pub mod experiment;
pub mod rng;
pub mod sampler;

pub use comparison::{compare, ks_2samp, Alternative, KsTest, Method};
pub use covariance::{CholeskyFactor, CovarianceMatrix};
pub use error::{ConfigError, CovarianceError, ExperimentError};
pub use experiment::{compare_correlations, run_study, ExperimentConfig, PValueStudy};
pub use rng::ExperimentRng;
pub use sampler::{run_experiment, RatioSamples};
