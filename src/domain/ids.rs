//! Fedora object identifiers
//!
//! Fedora 3 assigns every object a PID of the form `namespace:local-id`.
//! This module wraps that string in a newtype and provides the two derived
//! forms the exporter needs: the `info:fedora/` URI used in resource index
//! queries, and a file-system safe name.

use std::fmt;
use std::str::FromStr;

/// Prefix Fedora uses to turn a PID into a resource URI
pub const FEDORA_URI_PREFIX: &str = "info:fedora/";

/// Delimiter between a PID's namespace and local part
pub const PID_DELIMITER: char = ':';

/// Fedora persistent identifier
///
/// # Examples
///
/// ```
/// use mods_fetcher::domain::ids::Pid;
/// use std::str::FromStr;
///
/// let pid = Pid::from_str("iudl:1234").unwrap();
/// assert_eq!(pid.as_str(), "iudl:1234");
/// assert_eq!(pid.fs_name(), "iudl_1234");
/// assert_eq!(pid.to_uri(), "info:fedora/iudl:1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(String);

impl Pid {
    /// Creates a new Pid from a string
    ///
    /// Returns `Err` if the identifier is blank. No further format checks are
    /// made; the server is the authority on what a PID looks like.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("PID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the PID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified resource URI for this PID
    pub fn to_uri(&self) -> String {
        fedora_uri(&self.0)
    }

    /// File or directory name for this PID
    pub fn fs_name(&self) -> String {
        fs_safe_name(&self.0)
    }
}

/// Wrap a bare identifier into its `info:fedora/` URI form
///
/// The input is used as-is; no escaping is applied.
pub fn fedora_uri(id: &str) -> String {
    format!("{FEDORA_URI_PREFIX}{id}")
}

/// Replace every PID delimiter with an underscore
///
/// The mapping is one-way: `a:b` and `a_b` produce the same name.
pub fn fs_safe_name(id: &str) -> String {
    id.replace(PID_DELIMITER, "_")
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Pid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_creation() {
        let pid = Pid::new("cmodel:collection").unwrap();
        assert_eq!(pid.as_str(), "cmodel:collection");
        assert_eq!(pid.to_string(), "cmodel:collection");
    }

    #[test]
    fn test_pid_rejects_blank() {
        assert!(Pid::new("").is_err());
        assert!(Pid::new("   ").is_err());
    }

    #[test]
    fn test_fedora_uri() {
        assert_eq!(fedora_uri("cmodel:collection"), "info:fedora/cmodel:collection");
        assert_eq!(
            Pid::new("iudl:7").unwrap().to_uri(),
            "info:fedora/iudl:7"
        );
    }

    #[test]
    fn test_fs_name_replaces_every_delimiter() {
        assert_eq!(fs_safe_name("a:b:c"), "a_b_c");
        assert_eq!(fs_safe_name("plain"), "plain");
        assert_eq!(Pid::new("iudl:1234").unwrap().fs_name(), "iudl_1234");
    }

    #[test]
    fn test_fs_name_is_one_way() {
        assert_eq!(fs_safe_name("a:b"), fs_safe_name("a_b"));
    }

    #[test]
    fn test_pid_ordering_is_lexicographic() {
        let mut pids = vec![
            Pid::new("iudl:b").unwrap(),
            Pid::new("iudl:a").unwrap(),
            Pid::new("archive:z").unwrap(),
        ];
        pids.sort();
        let sorted: Vec<&str> = pids.iter().map(Pid::as_str).collect();
        assert_eq!(sorted, vec!["archive:z", "iudl:a", "iudl:b"]);
    }
}
