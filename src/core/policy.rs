//! Per-collection export policy
//!
//! Decides how many member records of each collection to export. The
//! decision depends on whether the collection has its own entry in the
//! configuration and, if not, on the inclusion mode:
//!
//! | Entry present | Entry is an integer | Mode      | Limit      |
//! |---------------|---------------------|-----------|------------|
//! | yes           | yes (N)             | any       | N          |
//! | yes           | no                  | any       | all        |
//! | no            | -                   | blacklist | all        |
//! | no            | -                   | whitelist | skip       |
//!
//! An entry of `0` skips the collection. Negative entries mean "all".

use crate::config::{FetcherConfig, InclusionMode, Properties};
use crate::domain::Pid;
use std::fmt;

/// Resolved number of records to export from one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLimit {
    /// Export nothing; the collection is not touched
    Skip,
    /// Export every member
    All,
    /// Export the first N members in server order
    First(usize),
}

impl ExportLimit {
    /// Interpret an integer limit: `0` skips, negative means all
    pub fn from_raw(limit: i64) -> Self {
        match limit {
            0 => ExportLimit::Skip,
            n if n < 0 => ExportLimit::All,
            n => ExportLimit::First(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    /// Integer form: `0` skip, `-1` all, `N` first N
    pub fn as_raw(self) -> i64 {
        match self {
            ExportLimit::Skip => 0,
            ExportLimit::All => -1,
            ExportLimit::First(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }

    pub fn is_skip(self) -> bool {
        self == ExportLimit::Skip
    }

    /// How many of `available` members this limit selects
    pub fn take_count(self, available: usize) -> usize {
        match self {
            ExportLimit::Skip => 0,
            ExportLimit::All => available,
            ExportLimit::First(n) => n.min(available),
        }
    }
}

impl fmt::Display for ExportLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportLimit::Skip => write!(f, "0"),
            ExportLimit::All => write!(f, "all"),
            ExportLimit::First(n) => write!(f, "{n}"),
        }
    }
}

/// Resolve the export limit for one collection
///
/// `properties` is the full configuration map; any key equal to the
/// collection PID counts as an explicit entry.
///
/// # Examples
///
/// ```
/// use mods_fetcher::config::{InclusionMode, Properties};
/// use mods_fetcher::core::policy::{resolve_limit, ExportLimit};
///
/// let mut props = Properties::new();
/// props.insert("iudl:maps".to_string(), "25".to_string());
///
/// assert_eq!(
///     resolve_limit("iudl:maps", &props, InclusionMode::Whitelist),
///     ExportLimit::First(25)
/// );
/// assert_eq!(resolve_limit("iudl:photos", &props, InclusionMode::Whitelist), ExportLimit::Skip);
/// assert_eq!(resolve_limit("iudl:photos", &props, InclusionMode::Blacklist), ExportLimit::All);
/// ```
pub fn resolve_limit(
    collection: &str,
    properties: &Properties,
    mode: InclusionMode,
) -> ExportLimit {
    match properties.get(collection) {
        // Java-style int parsing: anything that is not a 32-bit integer means "all"
        Some(value) => match value.trim().parse::<i32>() {
            Ok(n) => ExportLimit::from_raw(i64::from(n)),
            Err(_) => ExportLimit::All,
        },
        None if mode.is_blacklist() => ExportLimit::All,
        None => ExportLimit::Skip,
    }
}

/// One collection with its resolved limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub collection: Pid,
    pub limit: ExportLimit,
}

/// Export policy bound to a loaded configuration
#[derive(Debug, Clone, Copy)]
pub struct ExportPolicy<'a> {
    properties: &'a Properties,
    mode: InclusionMode,
}

impl<'a> ExportPolicy<'a> {
    pub fn new(properties: &'a Properties, mode: InclusionMode) -> Self {
        Self { properties, mode }
    }

    pub fn from_config(config: &'a FetcherConfig) -> Self {
        Self::new(&config.properties, config.inclusion)
    }

    /// Limit for a single collection
    pub fn limit_for(&self, collection: &Pid) -> ExportLimit {
        resolve_limit(collection.as_str(), self.properties, self.mode)
    }

    /// Sort collections lexicographically and resolve each one's limit
    pub fn plan(&self, mut collections: Vec<Pid>) -> Vec<PlanEntry> {
        collections.sort();
        collections
            .into_iter()
            .map(|collection| PlanEntry {
                limit: self.limit_for(&collection),
                collection,
            })
            .collect()
    }
}
