//! Fedora repository trait definition
//!
//! This module defines the `FedoraRepository` trait the export driver talks
//! to. The HTTP implementation lives in [`super::client`]; tests substitute an
//! in-memory implementation.

use crate::domain::{FetcherError, Pid, Result};
use async_trait::async_trait;
use std::fmt;
use tokio::io::AsyncRead;

/// PID of the content model that marks an object as a collection
pub const COLLECTION_CONTENT_MODEL: &str = "cmodel:collection";

/// Raw bytes of a metadata record, read as it arrives from the server
pub type MetadataStream = Box<dyn AsyncRead + Send + Unpin>;

/// Relationship predicates used in resource index searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Object conforms to a content model
    HasModel,
    /// Object belongs to a collection
    IsMemberOfCollection,
}

impl Predicate {
    /// Full predicate URI as stored in the resource index
    pub fn uri(self) -> &'static str {
        match self {
            Predicate::HasModel => "info:fedora/fedora-system:def/model#hasModel",
            Predicate::IsMemberOfCollection => {
                "info:fedora/fedora-system:def/relations-external#isMemberOfCollection"
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

/// Read-only access to a Fedora repository
///
/// # Example
///
/// ```no_run
/// use mods_fetcher::adapters::fedora::{FedoraClient, FedoraRepository};
///
/// # async fn example() -> mods_fetcher::domain::Result<()> {
/// let client = FedoraClient::new("http://localhost:8080/fedora")?;
///
/// for collection in client.collections().await? {
///     let members = client.collection_members(&collection).await?;
///     println!("{collection}: {} members", members.len());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait FedoraRepository: Send + Sync {
    /// Find every subject related to `object` by `predicate`
    ///
    /// With `object` set to `None` the object position is left unbound and
    /// every subject carrying the predicate matches. Identifiers come back in
    /// server order, without deduplication.
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError::Repository`] if the search cannot be run. These
    /// errors are not recoverable for the caller.
    async fn find_subjects(&self, predicate: Predicate, object: Option<&Pid>) -> Result<Vec<Pid>>;

    /// Fetch the MODS record of one object
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError::FetchFailed`] naming `pid` on any transport or
    /// protocol failure. The request is not retried.
    async fn fetch_metadata(&self, pid: &Pid) -> Result<MetadataStream>;

    /// Base URL of the repository, for display
    fn base_url(&self) -> &str;

    /// All collection objects in the repository
    async fn collections(&self) -> Result<Vec<Pid>> {
        let model = Pid::new(COLLECTION_CONTENT_MODEL).map_err(FetcherError::Validation)?;
        self.find_subjects(Predicate::HasModel, Some(&model)).await
    }

    /// All members of one collection
    async fn collection_members(&self, collection: &Pid) -> Result<Vec<Pid>> {
        self.find_subjects(Predicate::IsMemberOfCollection, Some(collection))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_uris() {
        assert_eq!(
            Predicate::HasModel.uri(),
            "info:fedora/fedora-system:def/model#hasModel"
        );
        assert_eq!(
            Predicate::IsMemberOfCollection.to_string(),
            "info:fedora/fedora-system:def/relations-external#isMemberOfCollection"
        );
    }
}
