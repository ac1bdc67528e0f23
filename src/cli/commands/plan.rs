//! Plan command implementation
//!
//! Lists every collection in the repository together with the limit the
//! export would apply. Members are not enumerated.

use super::{load_or_report, EXIT_CONNECTION_ERROR, EXIT_FATAL};
use crate::core::export::ExportCoordinator;
use crate::core::policy::{ExportLimit, PlanEntry};
use clap::Args;

/// Arguments for the plan command
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Only list collections that would be exported
    #[arg(long)]
    pub included_only: bool,
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Building export plan");

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let inclusion = config.inclusion;

        let coordinator = match ExportCoordinator::from_config(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create Fedora client");
                eprintln!("Failed to initialize Fedora client: {e}");
                return Ok(EXIT_CONNECTION_ERROR);
            }
        };

        let plan = match coordinator.plan().await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list collections");
                eprintln!("Failed to list collections: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        println!("Inclusion mode: {inclusion}");
        println!("{} collections found.", plan.len());
        println!();
        for line in self.render(&plan) {
            println!("{line}");
        }
        Ok(0)
    }

    /// One line per collection: PID and resolved limit
    pub fn render(&self, plan: &[PlanEntry]) -> Vec<String> {
        plan.iter()
            .filter(|entry| !(self.included_only && entry.limit.is_skip()))
            .map(|entry| match entry.limit {
                ExportLimit::Skip => format!("  {}  skip", entry.collection),
                limit => format!("  {}  {}", entry.collection, limit),
            })
            .collect()
    }
}
