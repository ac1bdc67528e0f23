//! CLI command implementations
//!
//! Every command returns the process exit code:
//! 0 success, 1 failed records under `--strict`, 2 configuration error,
//! 4 Fedora client setup error, 5 fatal error.

use crate::config::{load_config, FetcherConfig};

pub mod export;
pub mod plan;
pub mod validate;

/// Exit code for a partially failed export under `--strict`
pub const EXIT_PARTIAL_FAILURE: i32 = 1;
/// Exit code for an unreadable or invalid configuration
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code when the Fedora client cannot be set up
pub const EXIT_CONNECTION_ERROR: i32 = 4;
/// Exit code for any other fatal error
pub const EXIT_FATAL: i32 = 5;

/// Load the configuration, reporting failures on stderr
///
/// Returns the exit code to use when loading fails.
pub(crate) fn load_or_report(config_path: &str) -> Result<FetcherConfig, i32> {
    load_config(config_path).map_err(|e| {
        tracing::error!(config_path = %config_path, error = %e, "Failed to load configuration");
        eprintln!("Failed to load configuration from {config_path}: {e}");
        EXIT_CONFIG_ERROR
    })
}
