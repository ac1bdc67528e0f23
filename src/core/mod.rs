//! Core business logic for mods-fetcher.
//!
//! # Modules
//!
//! - [`policy`] - Per-collection export limits
//! - [`export`] - Export orchestration, record writing and summaries
//!
//! # Export Workflow
//!
//! 1. **List collections**: every object with the collection content model
//! 2. **Resolve limits**: sort collections and apply the inclusion policy
//! 3. **List members**: for each included collection
//! 4. **Copy records**: fetch each selected member's MODS record and write it
//!    unless its file already exists
//! 5. **Report**: log the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use mods_fetcher::config::load_config;
//! use mods_fetcher::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("collection-limits.properties")?;
//! let coordinator = ExportCoordinator::from_config(config)?;
//!
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Exported: {}", summary.records_exported);
//! println!("Failed: {}", summary.records_failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod policy;
