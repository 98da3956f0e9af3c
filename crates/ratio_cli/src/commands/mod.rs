//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod run;
pub mod study;

use ratio_core::{ExperimentConfig, Method};

use crate::{CliError, ExperimentArgs, Result};

/// Output format accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Parses `--method`.
pub fn parse_method(method: &str) -> Result<Method> {
    match method {
        "auto" => Ok(Method::Auto),
        "exact" => Ok(Method::Exact),
        "asymptotic" => Ok(Method::Asymptotic),
        other => Err(CliError::InvalidArgument(format!(
            "Unknown method: {}. Supported: auto, exact, asymptotic",
            other
        ))),
    }
}

/// Builds a validated configuration from the shared arguments.
pub fn build_config(args: &ExperimentArgs, plots: bool) -> Result<ExperimentConfig> {
    let config = ExperimentConfig::builder()
        .n(args.n)
        .mc(args.mc)
        .rho(args.rho)
        .seed(args.seed)
        .method(parse_method(&args.method)?)
        .plots(plots)
        .build()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExperimentArgs {
        ExperimentArgs {
            n: 10,
            mc: 20,
            rho: 0.5,
            seed: 7,
            method: "exact".to_string(),
            format: "table".to_string(),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(matches!(
            OutputFormat::parse("csv"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("auto").unwrap(), Method::Auto);
        assert_eq!(parse_method("asymptotic").unwrap(), Method::Asymptotic);
        assert!(parse_method("bootstrap").is_err());
    }

    #[test]
    fn test_build_config() {
        let config = build_config(&args(), false).unwrap();
        assert_eq!(config.n(), 10);
        assert_eq!(config.mc(), 20);
        assert_eq!(config.seed(), 7);
        assert_eq!(config.method(), Method::Exact);
        assert!(!config.plots());
    }

    #[test]
    fn test_build_config_rejects_invalid_rho() {
        let mut bad = args();
        bad.rho = 1.0;
        let err = build_config(&bad, true).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
