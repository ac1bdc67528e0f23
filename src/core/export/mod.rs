//! Export orchestration
//!
//! This module provides the export logic for mods-fetcher, including:
//! - Export coordination
//! - Streaming records to disk
//! - Summary and reporting

pub mod coordinator;
pub mod summary;
pub mod writer;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportSummary, RecordFailure};
pub use writer::WriteRecordError;
