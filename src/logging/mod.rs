//! Logging and observability
//!
//! Structured logging via `tracing`, with console output and optional
//! rotated JSON files. A few macros keep the export progress events
//! consistent in field naming.
//!
//! # Example
//!
//! ```no_run
//! use mods_fetcher::logging::init_logging;
//! use mods_fetcher::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a collection export
///
/// # Example
///
/// ```no_run
/// use mods_fetcher::log_collection_start;
///
/// log_collection_start!("iudl:maps", "25", 120);
/// ```
#[macro_export]
macro_rules! log_collection_start {
    ($collection:expr, $limit:expr, $count:expr) => {
        tracing::info!(
            collection = %$collection,
            limit = %$limit,
            count = $count,
            "Fetching {} of {} MODS records from collection {}...",
            $limit,
            $count,
            $collection
        );
    };
}

/// Log a failed record together with its full cause chain
///
/// # Example
///
/// ```no_run
/// use mods_fetcher::log_record_failure;
/// use mods_fetcher::domain::FetcherError;
///
/// let error = FetcherError::fetch_failed("iudl:42", "connection reset");
/// log_record_failure!("iudl:42", &error);
/// ```
#[macro_export]
macro_rules! log_record_failure {
    ($pid:expr, $error:expr) => {
        tracing::error!(
            pid = %$pid,
            error = %$error,
            cause = ?$error,
            "Error exporting MODS for {}!",
            $pid
        );
    };
}
