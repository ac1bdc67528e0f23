//! Secure credential handling using the secrecy crate
//!
//! The Fedora password is held in a `Secret` so that it is zeroed on drop and
//! redacted from `Debug` output. Call `expose_secret()` only at the point the
//! credential is handed to the HTTP client.
//!
//! # Example
//!
//! ```rust
//! use mods_fetcher::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("fedoraAdmin".to_string());
//! assert_eq!(password.expose_secret(), "fedoraAdmin");
//!
//! // Debug output is redacted
//! assert!(!format!("{password:?}").contains("fedoraAdmin"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Helper function to create an optional SecretString from an optional String
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}
