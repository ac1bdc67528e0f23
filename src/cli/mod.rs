//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for mods-fetcher using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mods-fetcher - Fedora MODS batch exporter
#[derive(Parser, Debug)]
#[command(name = "mods-fetcher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the collection limits properties file
    #[arg(
        short,
        long,
        default_value = "collection-limits.properties",
        env = "MODS_FETCHER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MODS_FETCHER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rotated JSON log files
    #[arg(long, env = "MODS_FETCHER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export MODS records of all included collections
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// List collections with their resolved export limits
    Plan(commands::plan::PlanArgs),
}
