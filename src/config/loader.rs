//! Configuration loader for `key=value` property files
//!
//! The file format follows Java `.properties` conventions closely enough that
//! existing `collection-limits.properties` files load unchanged:
//!
//! ```text
//! # where to write the records
//! output-dir=/data/mods
//! fedora-url=http://localhost:8080/fedora
//! inclusion=blacklist
//!
//! # collection limits: 0 skips, -1 or "all" exports everything
//! iudl\:photos=0
//! iudl:maps=25
//! ```
//!
//! Escapes and line continuations are decoded as `java.util.Properties` does.
//! The one difference is that only `=` separates a key from its value, since
//! collection PIDs contain colons.

use super::schema::{
    FetcherConfig, Properties, KEY_FEDORA_PASSWORD, KEY_FEDORA_URL, KEY_FEDORA_USERNAME,
    KEY_INCLUSION, KEY_OUTPUT_DIR,
};
use crate::domain::errors::FetcherError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "MODS_FETCHER_";

/// Loads configuration from a property file
///
/// This function:
/// 1. Reads the file
/// 2. Parses `key=value` lines
/// 3. Performs environment variable substitution (`${VAR}` syntax) in values
/// 4. Applies environment variable overrides (`MODS_FETCHER_*` prefix)
/// 5. Builds and validates the typed [`FetcherConfig`]
///
/// # Errors
///
/// Returns [`FetcherError::ConfigUnavailable`] if the file cannot be read, and
/// [`FetcherError::Configuration`] if a line is malformed, a referenced
/// environment variable is unset, or a required key is missing.
///
/// # Examples
///
/// ```no_run
/// use mods_fetcher::config::loader::load_config;
///
/// let config = load_config("collection-limits.properties").expect("Failed to load config");
/// println!("Writing to {}", config.output_dir.display());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FetcherConfig> {
    let mut properties = load_properties(path)?;
    apply_env_overrides(&mut properties);
    FetcherConfig::from_properties(properties)
}

/// Reads a property file into a raw key/value map without validation
pub fn load_properties(path: impl AsRef<Path>) -> Result<Properties> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        FetcherError::ConfigUnavailable(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_properties(&contents)
}

/// Parses property file contents
///
/// Blank lines and lines starting with `#` or `!` are ignored. A line ending
/// in an odd number of backslashes continues on the next line, whose leading
/// whitespace is dropped. Keys and values are trimmed and their escapes
/// (`\\`, `\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\` before any other
/// character) decoded. When a key repeats, the last value wins.
pub fn parse_properties(contents: &str) -> Result<Properties> {
    let mut properties = Properties::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for (line_no, line) in logical_lines(contents) {
        let (raw_key, raw_value) = split_entry(&line).ok_or_else(|| {
            FetcherError::Configuration(format!(
                "Line {line_no}: expected 'key=value', got '{line}'"
            ))
        })?;

        let key = unescape(raw_key.trim())
            .map_err(|e| FetcherError::Configuration(format!("Line {line_no}: {e}")))?;
        if key.is_empty() {
            return Err(FetcherError::Configuration(format!(
                "Line {line_no}: empty key"
            )));
        }

        let value = unescape(raw_value.trim())
            .map_err(|e| FetcherError::Configuration(format!("Line {line_no}: {e}")))?;
        let value = substitute_env_vars(&value, &mut missing_vars);
        properties.insert(key, value);
    }

    if !missing_vars.is_empty() {
        return Err(FetcherError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(properties)
}

/// Join continued lines, dropping comments and blank lines
///
/// Yields each logical line with the 1-based number of its first physical line.
fn logical_lines(contents: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, physical) in contents.lines().enumerate() {
        let stripped = physical.trim_start();

        let (line_no, mut line) = match pending.take() {
            Some((line_no, mut joined)) => {
                joined.push_str(stripped);
                (line_no, joined)
            }
            None => {
                if stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with('!') {
                    continue;
                }
                (index + 1, stripped.to_string())
            }
        };

        if ends_with_continuation(&line) {
            line.pop();
            pending = Some((line_no, line));
        } else {
            lines.push((line_no, line));
        }
    }

    // A continuation on the last line simply ends the entry
    if let Some(entry) = pending {
        lines.push(entry);
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Split at the first `=` that is not escaped with a backslash
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' if !escaped => return Some((&line[..i], &line[i + 1..])),
            _ => escaped = false,
        }
    }
    None
}

/// Decode backslash escapes in a key or value
fn unescape(input: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("malformed \\uXXXX escape '\\u{hex}'"))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Unset variables are collected into `missing_vars` and left in place.
fn substitute_env_vars(input: &str, missing_vars: &mut Vec<String>) -> String {
    env_var_pattern()
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Applies environment variable overrides using the `MODS_FETCHER_*` prefix
///
/// Each reserved key maps to `MODS_FETCHER_<KEY>` with dashes turned into
/// underscores, e.g. `fedora-url` → `MODS_FETCHER_FEDORA_URL`. Collection
/// limits cannot be overridden this way.
fn apply_env_overrides(properties: &mut Properties) {
    for key in [
        KEY_OUTPUT_DIR,
        KEY_FEDORA_URL,
        KEY_INCLUSION,
        KEY_FEDORA_USERNAME,
        KEY_FEDORA_PASSWORD,
    ] {
        if let Ok(value) = std::env::var(env_override_name(key)) {
            properties.insert(key.to_string(), value);
        }
    }
}

/// Environment variable name that overrides a reserved key
pub fn env_override_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('-', "_").to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_entries() {
        let props = parse_properties(
            "output-dir=/tmp/mods\n\
             fedora-url = http://localhost:8080/fedora\n\
             inclusion=blacklist\n",
        )
        .unwrap();

        assert_eq!(props.get("output-dir").unwrap(), "/tmp/mods");
        assert_eq!(props.get("fedora-url").unwrap(), "http://localhost:8080/fedora");
        assert_eq!(props.get("inclusion").unwrap(), "blacklist");
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let props = parse_properties("# comment\n! also a comment\n\n   \nkey=value\n").unwrap();
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_colon_in_key_is_not_a_separator() {
        let props = parse_properties("iudl:maps=25\n").unwrap();
        assert_eq!(props.get("iudl:maps").unwrap(), "25");
    }

    #[test]
    fn test_escaped_colon_in_key() {
        let props = parse_properties("iudl\\:photos=0\n").unwrap();
        assert_eq!(props.get("iudl:photos").unwrap(), "0");
    }

    #[test]
    fn test_escaped_equals_in_key() {
        let props = parse_properties("a\\=b=c\n").unwrap();
        assert_eq!(props.get("a=b").unwrap(), "c");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let props = parse_properties("fedora-url=http://host/fedora?x=1\n").unwrap();
        assert_eq!(props.get("fedora-url").unwrap(), "http://host/fedora?x=1");
    }

    #[test]
    fn test_empty_value_is_distinct_from_missing() {
        let props = parse_properties("iudl:maps=\n").unwrap();
        assert_eq!(props.get("iudl:maps").map(String::as_str), Some(""));
        assert!(props.get("iudl:photos").is_none());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let props = parse_properties("iudl:maps=1\niudl:maps=2\n").unwrap();
        assert_eq!(props.get("iudl:maps").unwrap(), "2");
    }

    #[test]
    fn test_line_without_separator_is_rejected() {
        let err = parse_properties("output-dir\n").unwrap_err();
        assert!(matches!(err, FetcherError::Configuration(_)));
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_value_escapes_are_decoded() {
        let props = parse_properties(
            "output-dir=C:\\\\data\\\\mods\nsep=a\\tb\ntitle=Caf\\u00e9\nplain=\\q\n",
        )
        .unwrap();
        assert_eq!(props.get("output-dir").unwrap(), "C:\\data\\mods");
        assert_eq!(props.get("sep").unwrap(), "a\tb");
        assert_eq!(props.get("title").unwrap(), "Caf\u{e9}");
        assert_eq!(props.get("plain").unwrap(), "q");
    }

    #[test]
    fn test_malformed_unicode_escape_is_rejected() {
        let err = parse_properties("title=\\u00zz\n").unwrap_err();
        assert!(err.to_string().contains("Line 1"));
    }

    #[test]
    fn test_line_continuation() {
        let props = parse_properties(
            "fedora-url=http://localhost:8080/\\\n    fedora\ninclusion=blacklist\n",
        )
        .unwrap();
        assert_eq!(props.get("fedora-url").unwrap(), "http://localhost:8080/fedora");
        assert_eq!(props.get("inclusion").unwrap(), "blacklist");
    }

    #[test]
    fn test_even_backslashes_do_not_continue() {
        let props = parse_properties("output-dir=C:\\\\\nnext=1\n").unwrap();
        assert_eq!(props.get("output-dir").unwrap(), "C:\\");
        assert_eq!(props.get("next").unwrap(), "1");
    }

    #[test]
    fn test_continuation_error_reports_first_line() {
        let err = parse_properties("k=v\nbroken\\\n  still-broken\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(parse_properties("=value\n").is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MODS_FETCHER_LOADER_TEST_HOST", "fedora.example.org");
        let props =
            parse_properties("fedora-url=https://${MODS_FETCHER_LOADER_TEST_HOST}/fedora\n")
                .unwrap();
        assert_eq!(
            props.get("fedora-url").unwrap(),
            "https://fedora.example.org/fedora"
        );
        std::env::remove_var("MODS_FETCHER_LOADER_TEST_HOST");
    }

    #[test]
    fn test_missing_env_var_is_reported() {
        let err =
            parse_properties("fedora-password=${MODS_FETCHER_LOADER_TEST_UNSET}\n").unwrap_err();
        assert!(err
            .to_string()
            .contains("MODS_FETCHER_LOADER_TEST_UNSET"));
    }

    #[test]
    fn test_env_vars_in_comments_are_ignored() {
        let props = parse_properties("# ${MODS_FETCHER_LOADER_TEST_COMMENTED}\nk=v\n").unwrap();
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_env_override_name() {
        assert_eq!(env_override_name("fedora-url"), "MODS_FETCHER_FEDORA_URL");
        assert_eq!(env_override_name("output-dir"), "MODS_FETCHER_OUTPUT_DIR");
    }

    #[test]
    fn test_missing_file_is_config_unavailable() {
        let err = load_properties("/nonexistent/collection-limits.properties").unwrap_err();
        assert!(matches!(err, FetcherError::ConfigUnavailable(_)));
    }
}
