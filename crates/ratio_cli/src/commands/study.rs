//! Study command implementation
//!
//! Repeats the experiment and summarises the distribution of p-values.

use serde::Serialize;
use tracing::info;

use ratio_core::experiment::run_study;
use ratio_core::ExperimentConfig;

use super::{build_config, OutputFormat};
use crate::{CliError, ExperimentArgs, Result};

#[derive(Serialize)]
struct StudyReport<'a> {
    config: &'a ExperimentConfig,
    repetitions: usize,
    alpha: f64,
    rejection_rate: f64,
    mean_p_value: f64,
    min_p_value: Option<f64>,
    max_p_value: Option<f64>,
    p_values: &'a [f64],
}

/// Run the study command
pub fn run(args: &ExperimentArgs, repetitions: usize, alpha: f64) -> Result<()> {
    let format = OutputFormat::parse(&args.format)?;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(CliError::InvalidArgument(format!(
            "alpha must be in (0, 1), got {}",
            alpha
        )));
    }
    let config = build_config(args, false)?;

    info!("Starting p-value study...");
    info!("  Repetitions: {}", repetitions);
    info!("  Sample size: {}", config.n());
    info!("  Replicates: {}", config.mc());
    info!("  Correlation: {}", config.rho());

    let mut rng = config.rng();
    let study = run_study(&config, repetitions, &mut rng)?;

    match format {
        OutputFormat::Json => {
            let report = StudyReport {
                config: &config,
                repetitions: study.len(),
                alpha,
                rejection_rate: study.rejection_rate(alpha),
                mean_p_value: study.mean(),
                min_p_value: study.min(),
                max_p_value: study.max(),
                p_values: &study.p_values,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            println!("\n┌──────────────────────┬──────────────┐");
            println!("│ Metric               │ Value        │");
            println!("├──────────────────────┼──────────────┤");
            println!("│ Repetitions          │ {:>12} │", study.len());
            println!("│ Correlation          │ {:>12.4} │", config.rho());
            println!("│ Mean p-value         │ {:>12.6} │", study.mean());
            println!(
                "│ Min p-value          │ {:>12.6} │",
                study.min().unwrap_or(f64::NAN)
            );
            println!(
                "│ Max p-value          │ {:>12.6} │",
                study.max().unwrap_or(f64::NAN)
            );
            println!(
                "│ Rejected at {:<8} │ {:>11.2}% │",
                alpha,
                100.0 * study.rejection_rate(alpha)
            );
            println!("└──────────────────────┴──────────────┘");
        }
    }

    info!("Study complete");
    Ok(())
}
