//! Run command implementation
//!
//! Runs a single experiment, optionally prints the diagnostic summaries, and
//! reports the KS result.

use serde::Serialize;
use tracing::info;

use ratio_core::diagnostics::{DiagnosticsReporter, NullReporter, TerminalReporter};
use ratio_core::experiment::run_comparison;
use ratio_core::{ExperimentConfig, KsTest};

use super::{build_config, OutputFormat};
use crate::{ExperimentArgs, Result};

#[derive(Serialize)]
struct RunReport<'a> {
    config: &'a ExperimentConfig,
    test: &'a KsTest,
    draws: u64,
}

/// Run the run command
pub fn run(args: &ExperimentArgs, plots: bool) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    // JSON output keeps stdout machine-readable.
    let plots = plots && format == OutputFormat::Table;
    let config = build_config(args, plots)?;

    info!("Starting experiment...");
    info!("  Sample size: {}", config.n());
    info!("  Replicates: {}", config.mc());
    info!("  Correlation: {}", config.rho());
    info!("  Seed: {}", config.seed());

    let mut rng = config.rng();
    let mut reporter: Box<dyn DiagnosticsReporter> = if plots {
        Box::new(TerminalReporter::stdout())
    } else {
        Box::new(NullReporter)
    };
    let outcome = run_comparison(&config, &mut rng, reporter.as_mut())?;

    match format {
        OutputFormat::Json => {
            let report = RunReport {
                config: &config,
                test: &outcome.test,
                draws: rng.draws(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            // The terminal reporter already ends with the p-value line.
            if !plots {
                println!("KS statistic: {}", outcome.test.statistic);
                println!("KS Test p-value: {}", outcome.p_value());
            }
        }
    }

    info!("Experiment complete");
    Ok(())
}
