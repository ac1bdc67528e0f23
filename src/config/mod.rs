//! Configuration management for mods-fetcher.
//!
//! Configuration is a `key=value` property file. Reserved keys control the
//! run; every other key is a per-collection export limit.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mods_fetcher::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("collection-limits.properties")?;
//!
//! println!("Fedora URL: {}", config.fedora_url);
//! println!("Output dir: {}", config.output_dir.display());
//! println!("Inclusion:  {}", config.inclusion);
//! # Ok(())
//! # }
//! ```
//!
//! # Recognized Keys
//!
//! | Key               | Required | Meaning                                        |
//! |-------------------|----------|------------------------------------------------|
//! | `output-dir`      | yes      | Root directory for exported records            |
//! | `fedora-url`      | yes      | Fedora base URL                                |
//! | `inclusion`       | no       | `blacklist`, otherwise whitelist semantics     |
//! | `fedora-username` | no       | Basic auth user                                |
//! | `fedora-password` | no       | Basic auth password                            |
//! | `<collection pid>`| no       | Export limit: `0` skip, `N` first N, else all  |
//!
//! # Environment Variables
//!
//! Values may reference the environment with `${VAR_NAME}`. Reserved keys can
//! also be overridden wholesale with `MODS_FETCHER_<KEY>` variables:
//!
//! ```bash
//! export MODS_FETCHER_FEDORA_PASSWORD="secret-password"
//! export MODS_FETCHER_OUTPUT_DIR="/data/mods"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_properties, parse_properties};
pub use schema::{FetcherConfig, InclusionMode, LoggingConfig, Properties};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
