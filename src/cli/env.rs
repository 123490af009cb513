use clap::Parser;
use std::path::PathBuf;

use super::commands::Commands;

#[derive(Parser)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Tracker policy file (YAML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub policy: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(short, long, default_value = "human", global = true)]
    pub output: crate::cli::output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}
