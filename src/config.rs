//! Configuration file support for sbom-graph.
//!
//! Provides YAML-based configuration through `sbom-graph.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! flags always take precedence over config file values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::application::dto::OutputFormat;
use crate::graph_inspection::domain::Severity;
use crate::shared::Result;

const CONFIG_FILENAME: &str = "sbom-graph.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub exclude_packages: Option<Vec<String>>,
    pub check_vulnerabilities: Option<bool>,
    pub fail_on: Option<String>,
    pub ecosystem: Option<String>,
    pub ignore_vulnerabilities: Option<Vec<IgnoreVulnerability>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// An advisory entry to ignore during vulnerability checks.
#[derive(Debug, Deserialize)]
pub struct IgnoreVulnerability {
    pub id: String,
    pub reason: Option<String>,
}

impl ConfigFile {
    /// Parsed output format, if one is configured.
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|s| OutputFormat::from_str(s).map_err(|e| anyhow::anyhow!(e)))
            .transpose()
    }

    /// Parsed fail threshold, if one is configured.
    pub fn fail_severity(&self) -> Result<Option<Severity>> {
        self.fail_on
            .as_deref()
            .map(|s| Severity::from_str(s).map_err(|e| anyhow::anyhow!(e)))
            .transpose()
    }

    /// Ids of all ignored advisories.
    pub fn ignored_ids(&self) -> Vec<String> {
        self.ignore_vulnerabilities
            .as_ref()
            .map(|entries| entries.iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref ignore_vulnerabilities) = config.ignore_vulnerabilities {
        for (i, entry) in ignore_vulnerabilities.iter().enumerate() {
            if entry.id.trim().is_empty() {
                bail!(
                    "Invalid config: ignore_vulnerabilities[{}].id must not be empty.\n\n\
                     💡 Hint: Each entry must have a non-empty 'id' field (e.g., \"GHSA-xxxx-xxxx-xxxx\").",
                    i
                );
            }
        }
    }

    // Fail early on values the CLI would reject later
    config.output_format()?;
    config.fail_severity()?;

    Ok(())
}

/// Print warnings for unknown configuration keys.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
