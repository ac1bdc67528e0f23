//! Export coordinator - main orchestrator for the export process
//!
//! Runs a single sequential pass: list collections, resolve each one's limit,
//! list the members of every included collection and copy their MODS records
//! to disk. Failing to list collections or members aborts the run; a failure
//! on an individual record is logged and the run moves on.

use crate::adapters::fedora::{FedoraClient, FedoraRepository};
use crate::config::FetcherConfig;
use crate::core::export::summary::ExportSummary;
use crate::core::export::writer::{record_path, write_record};
use crate::core::policy::{ExportPolicy, PlanEntry};
use crate::domain::{FetcherError, Pid, Result};
use crate::{log_collection_start, log_record_failure};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    config: FetcherConfig,
    repository: Arc<dyn FedoraRepository>,
    dry_run: bool,
}

impl ExportCoordinator {
    /// Create a coordinator over an existing repository handle
    pub fn new(config: FetcherConfig, repository: Arc<dyn FedoraRepository>) -> Self {
        Self {
            config,
            repository,
            dry_run: false,
        }
    }

    /// Create a coordinator talking to the Fedora server named in `config`
    pub fn from_config(config: FetcherConfig) -> Result<Self> {
        let client = FedoraClient::from_config(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// In a dry run nothing is fetched or written; the coordinator only
    /// reports what it would export
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// List all collections, sorted, with their resolved limits
    pub async fn plan(&self) -> Result<Vec<PlanEntry>> {
        let collections = self.repository.collections().await?;
        Ok(ExportPolicy::from_config(&self.config).plan(collections))
    }

    /// Execute the export
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or a
    /// collection or member listing fails. Record-level failures are counted
    /// in the returned summary instead.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.dry_run;

        let output_dir = &self.config.output_dir;
        if !self.dry_run {
            tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
                FetcherError::Io(format!(
                    "Failed to create output directory {}: {}",
                    output_dir.display(),
                    e
                ))
            })?;
        }

        tracing::info!(
            output_dir = %display_path(output_dir).display(),
            "Output directory: {}",
            display_path(output_dir).display()
        );
        tracing::info!(
            fedora_url = %self.repository.base_url(),
            "Fedora URL: {}",
            self.repository.base_url()
        );
        if self.dry_run {
            tracing::info!("Dry run: no records will be fetched or written");
        }

        let plan = self.plan().await?;
        summary.collections_found = plan.len();
        tracing::info!(count = plan.len(), "{} collections found.", plan.len());

        for entry in &plan {
            if entry.limit.is_skip() {
                summary.collections_skipped += 1;
                tracing::debug!(collection = %entry.collection, "Skipping collection");
                continue;
            }
            self.export_collection(entry, &mut summary).await?;
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Export the selected members of one collection
    async fn export_collection(
        &self,
        entry: &PlanEntry,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let members = self
            .repository
            .collection_members(&entry.collection)
            .await?;

        summary.collections_exported += 1;
        summary.members_listed += members.len();
        log_collection_start!(entry.collection, entry.limit, members.len());

        let collection_dir = self.config.output_dir.join(entry.collection.fs_name());
        if !self.dry_run {
            // Records below will fail individually if this did not work
            if let Err(e) = tokio::fs::create_dir_all(&collection_dir).await {
                tracing::warn!(
                    collection = %entry.collection,
                    path = %collection_dir.display(),
                    error = %e,
                    "Failed to create collection directory"
                );
            }
        }

        let selected = entry.limit.take_count(members.len());
        for pid in members.iter().take(selected) {
            self.export_record(&entry.collection, &collection_dir, pid, summary)
                .await;
        }

        Ok(())
    }

    /// Export one record; never fails, outcomes are recorded in `summary`
    async fn export_record(
        &self,
        collection: &Pid,
        collection_dir: &Path,
        pid: &Pid,
        summary: &mut ExportSummary,
    ) {
        let target = record_path(collection_dir, pid);

        match tokio::fs::try_exists(&target).await {
            Ok(true) => {
                summary.records_existing += 1;
                tracing::trace!(pid = %pid, "Record already exported");
                return;
            }
            Ok(false) => {}
            Err(e) => {
                let error = FetcherError::fetch_failed(
                    pid.as_str(),
                    format!("cannot check {}: {e}", target.display()),
                );
                log_record_failure!(pid, error);
                summary.add_failure(collection, pid, error.to_string());
                return;
            }
        }

        if self.dry_run {
            summary.records_exported += 1;
            tracing::info!(pid = %pid, "  {} would be exported", pid);
            return;
        }

        match self.fetch_and_write(pid, &target).await {
            Ok(bytes) => {
                summary.records_exported += 1;
                summary.bytes_written += bytes;
                tracing::info!(pid = %pid, bytes = bytes, "  {} exported", pid);
            }
            Err(error) => {
                log_record_failure!(pid, error);
                summary.add_failure(collection, pid, error.to_string());
            }
        }
    }

    async fn fetch_and_write(&self, pid: &Pid, target: &Path) -> Result<u64> {
        let stream = self.repository.fetch_metadata(pid).await?;
        write_record(target, stream)
            .await
            .map_err(|e| FetcherError::fetch_failed(pid.as_str(), e))
    }
}

/// Absolute form of `path` for log output, falling back to the path as given
fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
