//! Domain types for mods-fetcher.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`Pid`]) with their URI and file-system forms
//! - **Error types** ([`FetcherError`], [`RepositoryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FetcherError>`]:
//!
//! ```rust,no_run
//! use mods_fetcher::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = mods_fetcher::config::load_config("collection-limits.properties")?;
//!     println!("{}", config.fedora_url);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{FetcherError, RepositoryError};
pub use ids::Pid;
pub use result::Result;
