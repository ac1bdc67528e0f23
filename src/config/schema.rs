//! Configuration schema
//!
//! A mods-fetcher configuration is a flat property map. A handful of keys
//! drive the run itself; every other key is read as a per-collection export
//! limit, keyed by collection PID. [`FetcherConfig`] is the typed view over
//! the reserved keys and keeps the full map for the export policy.

use super::secret::{secret_string_opt, SecretString};
use crate::domain::{FetcherError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Raw `key=value` entries as read from the configuration file
pub type Properties = BTreeMap<String, String>;

/// Directory the exported records are written to
pub const KEY_OUTPUT_DIR: &str = "output-dir";
/// Base URL of the Fedora server, e.g. `http://localhost:8080/fedora`
pub const KEY_FEDORA_URL: &str = "fedora-url";
/// `blacklist`, or anything else for whitelist semantics
pub const KEY_INCLUSION: &str = "inclusion";
pub const KEY_FEDORA_USERNAME: &str = "fedora-username";
pub const KEY_FEDORA_PASSWORD: &str = "fedora-password";

const RESERVED_KEYS: [&str; 5] = [
    KEY_OUTPUT_DIR,
    KEY_FEDORA_URL,
    KEY_INCLUSION,
    KEY_FEDORA_USERNAME,
    KEY_FEDORA_PASSWORD,
];

/// Whether `key` configures the run rather than naming a collection
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// How collections without an explicit entry are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InclusionMode {
    /// Unlisted collections are exported in full; entries exclude or limit
    Blacklist,
    /// Unlisted collections are skipped; only listed collections are exported
    #[default]
    Whitelist,
}

impl InclusionMode {
    /// Interpret the `inclusion` value
    ///
    /// Only `blacklist` (any case) selects blacklist mode. Every other value,
    /// including a missing key, means whitelist.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("blacklist") => InclusionMode::Blacklist,
            _ => InclusionMode::Whitelist,
        }
    }

    pub fn is_blacklist(self) -> bool {
        self == InclusionMode::Blacklist
    }
}

impl fmt::Display for InclusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InclusionMode::Blacklist => write!(f, "blacklist"),
            InclusionMode::Whitelist => write!(f, "whitelist"),
        }
    }
}

/// Logging configuration
///
/// Logging starts before the property file is read, so these settings come
/// from the command line rather than from [`FetcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Directory for rotated JSON log files; console only when unset
    pub local_path: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn local_enabled(&self) -> bool {
        self.local_path.is_some()
    }
}

/// Typed configuration for an export run
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Root directory for exported records
    pub output_dir: PathBuf,

    /// Fedora base URL
    pub fedora_url: String,

    /// Default treatment of unlisted collections
    pub inclusion: InclusionMode,

    /// Fedora username (optional)
    pub username: Option<String>,

    /// Fedora password (optional)
    /// Stored securely in memory and automatically zeroized on drop
    pub password: Option<SecretString>,

    /// Every entry from the configuration file except the password
    pub properties: Properties,
}

impl FetcherConfig {
    /// Build the typed view from a property map
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError::Configuration`] if `output-dir` or `fedora-url`
    /// is missing, or if the resulting configuration fails validation.
    pub fn from_properties(mut properties: Properties) -> Result<Self> {
        let output_dir = required(&properties, KEY_OUTPUT_DIR)?;
        let fedora_url = required(&properties, KEY_FEDORA_URL)?;
        let inclusion =
            InclusionMode::from_value(properties.get(KEY_INCLUSION).map(String::as_str));
        let username = optional(&properties, KEY_FEDORA_USERNAME);
        // The password only lives inside the secret, never in the plain map
        let password = secret_string_opt(
            properties
                .remove(KEY_FEDORA_PASSWORD)
                .filter(|value| !value.is_empty()),
        );

        let config = Self {
            output_dir: PathBuf::from(output_dir),
            fedora_url,
            inclusion,
            username,
            password,
            properties,
        };
        config.validate().map_err(FetcherError::Configuration)?;
        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(format!("{KEY_OUTPUT_DIR} cannot be empty"));
        }

        let url = Url::parse(&self.fedora_url)
            .map_err(|e| format!("Invalid {KEY_FEDORA_URL} '{}': {e}", self.fedora_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "Invalid {KEY_FEDORA_URL} '{}': scheme must be http or https",
                self.fedora_url
            ));
        }

        if self.password.is_some() && self.username.is_none() {
            return Err(format!(
                "{KEY_FEDORA_PASSWORD} is set but {KEY_FEDORA_USERNAME} is missing"
            ));
        }

        Ok(())
    }

    /// Credential pair for Basic authentication, if both halves are present
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass)),
            _ => None,
        }
    }

    /// Raw value of a per-collection entry, if one exists
    pub fn collection_entry(&self, collection: &str) -> Option<&str> {
        self.properties.get(collection).map(String::as_str)
    }
}

fn required(properties: &Properties, key: &str) -> Result<String> {
    match properties.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.clone()),
        Some(_) => Err(FetcherError::Configuration(format!(
            "Required key '{key}' is empty"
        ))),
        None => Err(FetcherError::Configuration(format!(
            "Required key '{key}' is missing"
        ))),
    }
}

fn optional(properties: &Properties, key: &str) -> Option<String> {
    properties
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
}
