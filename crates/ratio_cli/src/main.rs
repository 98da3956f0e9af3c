//! Ratio of Means CLI
//!
//! Command-line entry point for the correlated vs uncorrelated ratio-of-means
//! experiment.
//!
//! # Commands
//!
//! - `ratio-of-means run` - Run one experiment and print its p-value
//! - `ratio-of-means study` - Repeat the experiment and summarise the p-values
//!
//! Logging goes to stderr and honours `RUST_LOG`; `--verbose` raises the
//! default level to `debug`.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ratio_core::experiment::{
    DEFAULT_MC, DEFAULT_N, DEFAULT_REPETITIONS, DEFAULT_RHO, DEFAULT_SEED,
};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Ratio of Means: Correlated vs Uncorrelated
#[derive(Parser)]
#[command(name = "ratio-of-means")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Parameters shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExperimentArgs {
    /// Sample size per replicate
    #[arg(short, long, default_value_t = DEFAULT_N)]
    pub n: usize,

    /// Number of Monte Carlo replicates
    #[arg(short, long, default_value_t = DEFAULT_MC)]
    pub mc: usize,

    /// Correlation of the correlated regime, in (-1, 1)
    #[arg(short, long, default_value_t = DEFAULT_RHO, allow_negative_numbers = true)]
    pub rho: f64,

    /// Seed of the random stream
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// KS p-value method (auto, exact, asymptotic)
    #[arg(long, default_value = "asymptotic")]
    pub method: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one experiment and print the KS p-value
    Run {
        #[command(flatten)]
        args: ExperimentArgs,

        /// Skip the diagnostic summaries
        #[arg(long)]
        no_plots: bool,
    },

    /// Repeat the experiment and summarise the collected p-values
    Study {
        #[command(flatten)]
        args: ExperimentArgs,

        /// Number of experiment repetitions
        #[arg(short = 'k', long, default_value_t = DEFAULT_REPETITIONS)]
        repetitions: usize,

        /// Significance level for the rejection rate
        #[arg(short, long, default_value_t = 0.05)]
        alpha: f64,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let result = match cli.command {
        Commands::Run { args, no_plots } => commands::run::run(&args, !no_plots),
        Commands::Study {
            args,
            repetitions,
            alpha,
        } => commands::study::run(&args, repetitions, alpha),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        std::process::exit(err.exit_code());
    }
}
