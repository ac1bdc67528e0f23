//! Export command implementation
//!
//! This module implements the `export` command, which copies the MODS record
//! of every selected collection member into the output directory.

use super::{load_or_report, EXIT_CONNECTION_ERROR, EXIT_FATAL, EXIT_PARTIAL_FAILURE};
use crate::core::export::{ExportCoordinator, ExportSummary};
use clap::Args;
use std::path::PathBuf;

/// Failures listed individually before the summary truncates
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Dry run mode - list what would be exported without fetching or writing
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 when any record failed to export
    #[arg(long)]
    pub strict: bool,

    /// Write the export summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting export command");

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        if self.dry_run {
            tracing::info!("Dry run mode enabled - no records will be written");
            println!("DRY RUN MODE - no records will be fetched or written");
            println!();
        }

        let coordinator = match ExportCoordinator::from_config(config) {
            Ok(c) => c.with_dry_run(self.dry_run),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Fedora client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_CONNECTION_ERROR);
            }
        };

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print_summary(&summary);

        if let Some(path) = &self.report {
            summary.write_report(path)?;
            tracing::info!(path = %path.display(), "Export report written");
            println!("Report written to {}", path.display());
        }

        Ok(self.exit_code(&summary))
    }

    /// Exit code for a completed run
    pub fn exit_code(&self, summary: &ExportSummary) -> i32 {
        if self.strict && !summary.is_successful() {
            EXIT_PARTIAL_FAILURE
        } else {
            0
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("Export Summary:");
    println!("  Collections found: {}", summary.collections_found);
    println!("  Collections exported: {}", summary.collections_exported);
    println!("  Collections skipped: {}", summary.collections_skipped);
    println!("  Members listed: {}", summary.members_listed);
    if summary.dry_run {
        println!("  Records to export: {}", summary.records_exported);
    } else {
        println!("  Records exported: {}", summary.records_exported);
    }
    println!("  Already present: {}", summary.records_existing);
    println!("  Failed: {}", summary.records_failed);
    println!("  Bytes written: {}", summary.bytes_written);
    println!(
        "  Duration: {:.2}s",
        summary.duration_ms as f64 / 1000.0
    );

    if !summary.failures.is_empty() {
        println!();
        println!("Failures:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {} ({}): {}", failure.pid, failure.collection, failure.message);
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
    }
    println!();
}
