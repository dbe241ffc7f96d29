// src/config.rs

//! Run configuration
//!
//! Settings are parsed once into [`ConvertConfig`] and passed to the core by
//! reference. An optional TOML file provides the base values; command-line
//! flags override individual fields.
//!
//! # Example config.toml
//!
//! ```toml
//! recipe-url = "https://src.fedoraproject.org/rpms/{name}/raw/{ref}/f/{name}.spec"
//! checksum-url = "https://src.fedoraproject.org/rpms/{name}/raw/{ref}/f/sources"
//! jobs = 8
//! timeout-secs = 20
//!
//! [defines]
//! dist = ".fc41"
//! ```

use crate::error::{Error, Result};
use crate::recipe::MacroTable;
use crate::repository::{DEFAULT_CHECKSUM_URL, DEFAULT_RECIPE_URL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Default number of packages processed concurrently
pub const DEFAULT_JOBS: usize = 4;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default runtime for generated manifests
pub const DEFAULT_RUNTIME: &str = "org.fedoraproject.Platform";

/// Default SDK for generated manifests
pub const DEFAULT_SDK: &str = "org.fedoraproject.Sdk";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConvertConfig {
    /// Recipe URL template (`{name}`, `{ref}`)
    pub recipe_url: String,
    /// Checksum manifest URL template (`{name}`, `{ref}`)
    pub checksum_url: String,
    /// Maximum packages fetched and translated at once
    pub jobs: usize,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Attempts per request for transient failures
    pub max_retries: u32,
    /// Runtime id written to the manifest
    pub runtime: String,
    /// SDK id written to the manifest
    pub sdk: String,
    /// Macro defaults; recipe definitions take precedence
    pub defines: BTreeMap<String, String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            recipe_url: DEFAULT_RECIPE_URL.to_string(),
            checksum_url: DEFAULT_CHECKSUM_URL.to_string(),
            jobs: DEFAULT_JOBS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: crate::repository::client::MAX_RETRIES,
            runtime: DEFAULT_RUNTIME.to_string(),
            sdk: DEFAULT_SDK.to_string(),
            defines: BTreeMap::new(),
        }
    }
}

impl ConvertConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if !self.recipe_url.contains("{name}") {
            return Err(Error::ConfigError(format!(
                "recipe-url must contain a {{name}} placeholder: {}",
                self.recipe_url
            )));
        }
        if !self.checksum_url.contains("{name}") {
            return Err(Error::ConfigError(format!(
                "checksum-url must contain a {{name}} placeholder: {}",
                self.checksum_url
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Worker count, never zero
    pub fn jobs(&self) -> usize {
        self.jobs.max(1)
    }

    /// Macro defaults as a table for recipe expansion
    pub fn macro_defaults(&self) -> MacroTable {
        self.defines
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Parse a `NAME=VALUE` macro definition
pub fn parse_define(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::ConfigError(format!(
            "Invalid macro definition '{arg}', expected NAME=VALUE"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.recipe_url, DEFAULT_RECIPE_URL);
        assert_eq!(config.jobs(), DEFAULT_JOBS);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.macro_defaults().is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConvertConfig::from_toml_str(
            r#"
jobs = 0
timeout-secs = 5

[defines]
dist = ".fc41"
"#,
        )
        .unwrap();

        assert_eq!(config.jobs(), 1);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.sdk, DEFAULT_SDK);
        assert_eq!(config.macro_defaults().get("dist"), Some(".fc41"));
    }

    #[test]
    fn test_template_without_name_is_rejected() {
        let err = ConvertConfig::from_toml_str("recipe-url = \"https://example.org/static.spec\"");
        assert!(matches!(err, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_unknown_key_type_is_rejected() {
        assert!(ConvertConfig::from_toml_str("jobs = \"many\"").is_err());
    }

    #[test]
    fn test_parse_define() {
        assert_eq!(
            parse_define("dist=.fc41").unwrap(),
            ("dist".to_string(), ".fc41".to_string())
        );
        assert_eq!(parse_define("empty=").unwrap().1, "");
        assert!(parse_define("novalue").is_err());
        assert!(parse_define("=x").is_err());
    }
}
