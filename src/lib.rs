// mods-fetcher - Fedora MODS batch exporter
// Copyright (c) 2025 mods-fetcher Contributors
// Licensed under the MIT License

//! # mods-fetcher - Fedora MODS batch exporter
//!
//! mods-fetcher copies the MODS descriptive metadata of the objects held in a
//! Fedora 3 repository to the local filesystem, one file per object, grouped
//! by collection.
//!
//! ## Overview
//!
//! A run:
//! - **Lists** every collection via a resource index search for the
//!   collection content model
//! - **Selects** collections and member counts from a properties file, in
//!   blacklist or whitelist mode
//! - **Lists** the members of each selected collection
//! - **Streams** each member's MODS dissemination to
//!   `<output-dir>/<collection>/<pid>`, with `:` replaced by `_`
//!
//! Files that already exist are left alone, so a rerun only fills gaps. A
//! failure on one record is logged and the run continues.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export policy and orchestration
//! - [`adapters`] - Fedora repository client
//! - [`domain`] - Identifiers and error types
//! - [`config`] - Configuration loading
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mods_fetcher::config::load_config;
//! use mods_fetcher::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("collection-limits.properties")?;
//!     let coordinator = ExportCoordinator::from_config(config)?;
//!
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} records", summary.records_exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```text
//! output-dir=/data/mods
//! fedora-url=http://localhost:8080/fedora
//! inclusion=blacklist
//! # skip entirely
//! iudl:maps=0
//! # first 25 members only
//! iudl:photos=25
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], whose error type is
//! [`domain::FetcherError`]:
//!
//! ```rust,no_run
//! use mods_fetcher::domain::FetcherError;
//!
//! fn example() -> Result<(), FetcherError> {
//!     let config = mods_fetcher::config::load_config("collection-limits.properties")?;
//!     println!("{}", config.fedora_url);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
