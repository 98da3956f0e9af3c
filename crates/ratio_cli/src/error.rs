//! Error types for the CLI.

use thiserror::Error;

use ratio_core::{ConfigError, ExperimentError};

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Experiment configuration or execution error
    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output serialisation error
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Experiment(err.into())
    }
}

impl CliError {
    /// Process exit code: 2 for usage and configuration errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Experiment(_) | Self::InvalidArgument(_) => 2,
            Self::Serialisation(_) | Self::Io(_) => 1,
        }
    }
}
