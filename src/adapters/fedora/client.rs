//! Fedora REST client
//!
//! Implements [`FedoraRepository`] over the Fedora 3 REST API:
//!
//! - resource index search: `GET {base}/risearch?type=tuples&lang=itql&format=Simple&query=...`
//! - dissemination: `GET {base}/objects/{pid}/methods/{sdef}/{method}?version=`

use super::query::{parse_subjects, subject_query, QUERY_LANG, RESULT_FORMAT};
use super::repository::{FedoraRepository, MetadataStream, Predicate};
use crate::config::{FetcherConfig, SecretString};
use crate::domain::{FetcherError, Pid, RepositoryError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use secrecy::ExposeSecret;
use std::io;
use tokio_util::io::StreamReader;
use url::Url;

/// Service definition that provides the descriptive metadata disseminator
pub const MODS_SERVICE_DEFINITION: &str = "bdef:iudlDescMetadata";

/// Disseminator method returning the MODS record
pub const MODS_METHOD: &str = "getMODS";

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for a Fedora repository
///
/// # Example
///
/// ```no_run
/// use mods_fetcher::adapters::fedora::{FedoraClient, FedoraRepository};
/// use mods_fetcher::domain::Pid;
///
/// # async fn example() -> mods_fetcher::domain::Result<()> {
/// let client = FedoraClient::new("http://localhost:8080/fedora")?;
/// let pid = Pid::new("iudl:1234").unwrap();
/// let mut record = client.fetch_metadata(&pid).await?;
/// let mut out = tokio::io::stdout();
/// tokio::io::copy(&mut record, &mut out).await?;
/// # Ok(())
/// # }
/// ```
pub struct FedoraClient {
    base_url: Url,
    base_url_display: String,
    client: Client,
    credentials: Option<(String, SecretString)>,
}

impl FedoraClient {
    /// Create a client for the repository at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError::Configuration`] if the URL cannot serve as a
    /// base for REST paths or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url_display = base_url.into();
        let base_url = Url::parse(&base_url_display).map_err(|e| {
            FetcherError::Configuration(format!("Invalid Fedora URL '{base_url_display}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetcherError::Configuration(format!(
                "Fedora URL '{base_url_display}' cannot be used as a base URL"
            )));
        }

        let client = ClientBuilder::new()
            .user_agent(concat!("mods-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                FetcherError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            base_url_display,
            client,
            credentials: None,
        })
    }

    /// Create a client from the loaded configuration, including credentials
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let client = Self::new(config.fedora_url.clone())?;
        Ok(match config.credentials() {
            Some((user, pass)) => client.with_basic_auth(user.to_string(), pass.clone()),
            None => client,
        })
    }

    /// Send HTTP Basic credentials with every request
    pub fn with_basic_auth(mut self, username: String, password: SecretString) -> Self {
        tracing::debug!(username = %username, "Using Basic Authentication for Fedora");
        self.credentials = Some((username, password));
        self
    }

    /// Whether requests carry credentials
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Base URL extended with the given path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetcherError::Configuration(format!(
                    "Fedora URL '{}' cannot be used as a base URL",
                    self.base_url_display
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.credentials {
            Some((user, pass)) => {
                let pass: &str = pass.expose_secret().as_ref();
                request.basic_auth(user, Some(pass))
            }
            None => request,
        }
    }
}

/// Read a failed response's body into a short message
async fn error_body(resp: Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    let body = body.trim();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}

#[async_trait]
impl FedoraRepository for FedoraClient {
    async fn find_subjects(&self, predicate: Predicate, object: Option<&Pid>) -> Result<Vec<Pid>> {
        let url = self.endpoint(&["risearch"])?;
        let query = subject_query(predicate, object);

        tracing::debug!(query = %query, "Executing resource index search");

        let resp = self
            .get(url)
            .query(&[
                ("type", "tuples"),
                ("lang", QUERY_LANG),
                ("format", RESULT_FORMAT),
                ("query", query.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = error_body(resp).await;
            return Err(RepositoryError::QueryFailed(format!(
                "search for subjects of <{predicate}> failed with status {status}: {body}"
            ))
            .into());
        }

        let body = resp
            .text()
            .await
            .map_err(|e| RepositoryError::InvalidResponse(e.to_string()))?;

        let pids = parse_subjects(&body);
        tracing::debug!(
            predicate = %predicate,
            count = pids.len(),
            "Resource index search returned"
        );
        Ok(pids)
    }

    async fn fetch_metadata(&self, pid: &Pid) -> Result<MetadataStream> {
        let mut url = self.endpoint(&[
            "objects",
            pid.as_str(),
            "methods",
            MODS_SERVICE_DEFINITION,
            MODS_METHOD,
        ])?;
        url.query_pairs_mut().append_pair("version", "");

        tracing::debug!(url = %url, pid = %pid, "Fetching MODS record");

        let resp = self.get(url).send().await.map_err(|e| {
            FetcherError::fetch_failed(
                pid.as_str(),
                RepositoryError::ConnectionFailed(e.to_string()),
            )
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = error_body(resp).await;
            return Err(FetcherError::fetch_failed(
                pid.as_str(),
                RepositoryError::from_status(status.as_u16(), body),
            ));
        }

        let stream = Box::pin(resp.bytes_stream().map(|chunk| chunk.map_err(io::Error::other)));
        Ok(Box::new(StreamReader::new(stream)))
    }

    fn base_url(&self) -> &str {
        &self.base_url_display
    }
}
