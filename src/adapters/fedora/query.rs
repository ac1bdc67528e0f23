//! Resource index query construction and result parsing
//!
//! Searches are written in iTQL and requested in the `Simple` tuple format,
//! which returns one line per result row:
//!
//! ```text
//! subject : <info:fedora/iudl:1234>
//! ```

use super::repository::Predicate;
use crate::domain::ids::FEDORA_URI_PREFIX;
use crate::domain::Pid;
use regex::Regex;
use std::sync::OnceLock;

/// Query language tag sent with every search
pub const QUERY_LANG: &str = "itql";

/// Result format tag sent with every search
pub const RESULT_FORMAT: &str = "Simple";

/// Build the iTQL query selecting every subject of `predicate`
///
/// # Examples
///
/// ```
/// use mods_fetcher::adapters::fedora::query::subject_query;
/// use mods_fetcher::adapters::fedora::Predicate;
/// use mods_fetcher::domain::Pid;
///
/// let collection = Pid::new("iudl:maps").unwrap();
/// assert_eq!(
///     subject_query(Predicate::IsMemberOfCollection, Some(&collection)),
///     "select $subject from <#ri> where $subject \
///      <info:fedora/fedora-system:def/relations-external#isMemberOfCollection> \
///      <info:fedora/iudl:maps>"
/// );
/// ```
pub fn subject_query(predicate: Predicate, object: Option<&Pid>) -> String {
    let object = match object {
        Some(pid) => format!("<{}>", pid.to_uri()),
        None => "$other".to_string(),
    };
    format!(
        "select $subject from <#ri> where $subject <{}> {}",
        predicate.uri(),
        object
    )
}

fn subject_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(
            r"^subject : <{}([^>]+)>$",
            regex::escape(FEDORA_URI_PREFIX)
        ))
        .expect("subject line pattern is valid")
    })
}

/// Extract the identifier from one line of a `Simple` result
///
/// The whole line must match; anything else yields `None`.
pub fn parse_subject_line(line: &str) -> Option<Pid> {
    let captures = subject_line_pattern().captures(line)?;
    Pid::new(&captures[1]).ok()
}

/// Extract identifiers from a `Simple` result body
///
/// Lines that are not subject rows are skipped. Order is preserved and
/// duplicates are kept.
pub fn parse_subjects(body: &str) -> Vec<Pid> {
    let mut pids = Vec::new();
    for line in body.lines() {
        match parse_subject_line(line) {
            Some(pid) => pids.push(pid),
            None if !line.trim().is_empty() => {
                tracing::trace!(line = %line, "Skipping non-subject line in query result");
            }
            None => {}
        }
    }
    pids
}
