//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{Pid, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// A record that could not be exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// Collection the record was listed under
    pub collection: String,

    /// PID of the record
    pub pid: String,

    /// Error message
    pub message: String,
}

/// Summary of an export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Whether the run was a dry run (nothing written)
    pub dry_run: bool,

    /// Collections reported by the repository
    pub collections_found: usize,

    /// Collections whose members were listed
    pub collections_exported: usize,

    /// Collections skipped by policy
    pub collections_skipped: usize,

    /// Members listed across all exported collections
    pub members_listed: usize,

    /// Records fetched and written (or that would be, in a dry run)
    pub records_exported: usize,

    /// Records skipped because their file already existed
    pub records_existing: usize,

    /// Records that failed to fetch or write
    pub records_failed: usize,

    /// Total bytes written
    pub bytes_written: u64,

    /// Duration of the run in milliseconds
    pub duration_ms: u64,

    /// Per-record failures
    pub failures: Vec<RecordFailure>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            dry_run: false,
            collections_found: 0,
            collections_exported: 0,
            collections_skipped: 0,
            members_listed: 0,
            records_exported: 0,
            records_existing: 0,
            records_failed: 0,
            bytes_written: 0,
            duration_ms: 0,
            failures: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Record a failed record
    pub fn add_failure(&mut self, collection: &Pid, pid: &Pid, message: impl Into<String>) {
        self.records_failed += 1;
        self.failures.push(RecordFailure {
            collection: collection.to_string(),
            pid: pid.to_string(),
            message: message.into(),
        });
    }

    /// Check if every attempted record was exported
    pub fn is_successful(&self) -> bool {
        self.records_failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            dry_run = self.dry_run,
            collections_found = self.collections_found,
            collections_exported = self.collections_exported,
            collections_skipped = self.collections_skipped,
            members_listed = self.members_listed,
            exported = self.records_exported,
            existing = self.records_existing,
            failed = self.records_failed,
            bytes_written = self.bytes_written,
            duration_ms = self.duration_ms,
            "Export completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(
                failure_count = self.failures.len(),
                "Export completed with errors"
            );
        }
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_report(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}
