use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Drought-duration threshold filter.
#[derive(Parser)]
#[command(
    name = "drought",
    version,
    about = "Remove short drought episodes from gridded duration series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Zero out drought episodes shorter than a threshold.
    Filter(FilterArgs),
    /// Report episode counts and durations.
    Summary(SummaryArgs),
}

/// Arguments for the `filter` subcommand.
#[derive(clap::Args)]
pub struct FilterArgs {
    /// Path to input duration Parquet file (cells in rows, time steps in columns).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for filtered output Parquet file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Minimum drought duration to keep; overrides `[filter].threshold`.
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `summary` subcommand.
#[derive(clap::Args)]
pub struct SummaryArgs {
    /// Path to input duration Parquet file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Apply this threshold before summarising.
    #[arg(short, long)]
    pub threshold: Option<f64>,
}
