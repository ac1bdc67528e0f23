//! Fedora adapter implementation
//!
//! This module provides the integration with Fedora 3 repositories: the
//! repository trait, the REST client, and resource index query helpers.

pub mod client;
pub mod query;
pub mod repository;

pub use client::FedoraClient;
pub use repository::{FedoraRepository, MetadataStream, Predicate, COLLECTION_CONTENT_MODEL};
