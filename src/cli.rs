use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nimbus extreme-value analysis of daily climate series.
#[derive(Parser)]
#[command(
    name = "nimbus",
    version,
    about = "Frequency and IDF analysis of observed and downscaled daily series"
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
    /// Fit a frequency distribution to observed and modelled series.
    Frequency(FrequencyArgs),
    /// Build intensity-duration-frequency tables.
    Idf(IdfArgs),
}

/// Arguments for the `frequency` subcommand.
#[derive(clap::Args)]
pub struct FrequencyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nimbus.toml")]
    pub config: PathBuf,

    /// Path for the JSON result (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the distribution from config.
    #[arg(short, long)]
    pub distribution: Option<String>,
}

/// Arguments for the `idf` subcommand.
#[derive(clap::Args)]
pub struct IdfArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nimbus.toml")]
    pub config: PathBuf,

    /// Path for the JSON result (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the scaling method from config.
    #[arg(short, long)]
    pub method: Option<String>,
}
