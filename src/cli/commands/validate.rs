//! Validate config command implementation
//!
//! This module implements the `validate-config` command for checking the
//! collection limits file without contacting Fedora.

use super::load_or_report;
use crate::config::schema::is_reserved_key;
use crate::config::FetcherConfig;
use crate::core::policy::resolve_limit;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        println!("Configuration is valid");
        println!();
        for line in describe(&config) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

/// Human-readable summary of a loaded configuration, password redacted
pub fn describe(config: &FetcherConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Output directory: {}", config.output_dir.display()),
        format!("  Fedora URL: {}", config.fedora_url),
        format!("  Inclusion: {}", config.inclusion),
        format!(
            "  Username: {}",
            config.username.as_deref().unwrap_or("(none)")
        ),
        format!(
            "  Password: {}",
            if config.password.is_some() { "***" } else { "(none)" }
        ),
    ];

    let entries: Vec<(&String, &String)> = config
        .properties
        .iter()
        .filter(|(key, _)| !is_reserved_key(key))
        .collect();
    lines.push(format!("  Collection entries: {}", entries.len()));
    for (collection, raw) in entries {
        let limit = resolve_limit(collection, &config.properties, config.inclusion);
        lines.push(format!("    {collection} = {raw} ({limit})"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_properties;

    fn config(contents: &str) -> FetcherConfig {
        FetcherConfig::from_properties(parse_properties(contents).unwrap()).unwrap()
    }

    #[test]
    fn test_describe_redacts_password() {
        let cfg = config(
            "output-dir=/data/mods\nfedora-url=http://localhost:8080/fedora\n\
             fedora-username=fedoraAdmin\nfedora-password=hunter2\n",
        );
        let text = describe(&cfg).join("\n");
        assert!(text.contains("Username: fedoraAdmin"));
        assert!(text.contains("Password: ***"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_describe_lists_collection_entries() {
        let cfg = config(
            "output-dir=/data/mods\nfedora-url=http://localhost:8080/fedora\n\
             inclusion=blacklist\niudl:maps=0\niudl:photos=25\niudl:books=all\n",
        );
        let text = describe(&cfg).join("\n");
        assert!(text.contains("Inclusion: blacklist"));
        assert!(text.contains("Collection entries: 3"));
        assert!(text.contains("iudl:maps = 0 (0)"));
        assert!(text.contains("iudl:photos = 25 (25)"));
        assert!(text.contains("iudl:books = all (all)"));
        assert!(!text.contains("output-dir ="));
    }
}
