//! External system integrations for mods-fetcher.
//!
//! - [`fedora`] - Fedora 3 repository integration (resource index search and
//!   disseminations)
//!
//! # Design Pattern
//!
//! Adapters isolate the HTTP stack behind the
//! [`FedoraRepository`](fedora::FedoraRepository) trait so the export logic can
//! be tested against in-memory repositories.
//!
//! ```rust,no_run
//! use mods_fetcher::adapters::fedora::{FedoraClient, FedoraRepository};
//! use mods_fetcher::config::secret_string;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FedoraClient::new("https://fedora.example.org/fedora")?
//!     .with_basic_auth("fedoraAdmin".to_string(), secret_string("pass".to_string()));
//!
//! let collections = client.collections().await?;
//! println!("{} collections", collections.len());
//! # Ok(())
//! # }
//! ```

pub mod fedora;
