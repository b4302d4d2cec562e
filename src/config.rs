// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Exporter configuration
//!
//! Settings come from an optional TOML file, the environment and command-line
//! flags. The binary layers them (flag over environment over file over
//! defaults) and calls [`ExporterConfig::validate`] before serving.

use crate::error::{ExporterError, Result};
use serde::Deserialize;
use std::net::SocketAddr;

/// Default listen address
pub const DEFAULT_LISTEN: &str = ":9759";

/// Region used for the unscoped `DescribeRegions` call
pub const DEFAULT_DISCOVERY_REGION: &str = "us-east-1";

/// Exporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    pub access_key_id: String,
    pub secret_key: String,
    /// Regions to scan; empty means every region the account can see
    pub regions: Vec<String>,
    pub listen: String,
    pub discovery_region: String,
    pub debug: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_key: String::new(),
            regions: Vec::new(),
            listen: DEFAULT_LISTEN.into(),
            discovery_region: DEFAULT_DISCOVERY_REGION.into(),
            debug: false,
        }
    }
}

impl ExporterConfig {
    /// Load from TOML file
    pub fn from_toml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExporterError::Configuration(format!("Cannot read {}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| ExporterError::Configuration(format!("TOML parse error: {}", e)))?;
        config.regions = dedup_regions(config.regions.iter().map(String::as_str));
        Ok(config)
    }

    /// Generate sample config
    pub fn sample_toml() -> String {
        r#"# AWS Exporter Configuration
# access_key_id = "AKIA..."
# secret_key = "..."

# Regions to scan. Leave empty to scan every region.
regions = []
listen = ":9759"
discovery_region = "us-east-1"
debug = false
"#
        .into()
    }

    /// Override credentials with those set in the environment
    ///
    /// Call after loading the file and before applying flags. Empty variables
    /// are ignored. `AWS_SECRET_ACCESS_KEY` is read when `AWS_SECRET_KEY` is
    /// unset, since that is the name the AWS tooling uses.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = lookup("AWS_ACCESS_KEY_ID") {
            self.access_key_id = v;
        }
        if let Some(v) = lookup("AWS_SECRET_KEY").or_else(|| lookup("AWS_SECRET_ACCESS_KEY")) {
            self.secret_key = v;
        }
    }

    /// Check that the process can start
    pub fn validate(&self) -> Result<()> {
        if self.access_key_id.is_empty() {
            return Err(ExporterError::MissingCredentials(
                "No access key ID given.".into(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(ExporterError::MissingCredentials(
                "No secret key given.".into(),
            ));
        }
        if self.discovery_region.trim().is_empty() {
            return Err(ExporterError::Configuration(
                "discovery region must not be empty".into(),
            ));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Resolve the listen string to a bindable address
    ///
    /// A bare `:port` binds every interface.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let listen = self.listen.trim();
        let full = if listen.starts_with(':') {
            format!("0.0.0.0{}", listen)
        } else {
            listen.to_string()
        };
        full.parse().map_err(|e| {
            ExporterError::Configuration(format!("Invalid listen address {}: {}", self.listen, e))
        })
    }
}

/// Split a comma-separated region list
pub fn parse_regions(list: &str) -> Vec<String> {
    dedup_regions(list.split(','))
}

/// Trim, drop blanks and keep the first occurrence of each region
fn dedup_regions<'a>(regions: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for region in regions.into_iter().map(str::trim).filter(|r| !r.is_empty()) {
        if !out.iter().any(|r| r == region) {
            out.push(region.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn configured() -> ExporterConfig {
        ExporterConfig {
            access_key_id: "AKIATEST".into(),
            secret_key: "secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_default() {
        let config = ExporterConfig::default();
        assert_eq!(config.listen, ":9759");
        assert_eq!(config.discovery_region, "us-east-1");
        assert!(config.regions.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn test_sample_toml_parses() {
        let config = ExporterConfig::from_toml(&ExporterConfig::sample_toml()).unwrap();
        assert_eq!(config, ExporterConfig::default());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ExporterConfig::from_toml(
            r#"
regions = ["eu-central-1", "us-west-2"]
debug = true
"#,
        )
        .unwrap();
        assert_eq!(config.regions, vec!["eu-central-1", "us-west-2"]);
        assert!(config.debug);
        assert_eq!(config.listen, DEFAULT_LISTEN);
    }

    #[test]
    fn test_from_toml_dedups_regions() {
        let config = ExporterConfig::from_toml(
            r#"regions = ["us-east-1", " eu-west-1", "us-east-1", ""]"#,
        )
        .unwrap();
        assert_eq!(config.regions, vec!["us-east-1", "eu-west-1"]);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = ExporterConfig::from_toml("regions = 5").unwrap_err();
        assert!(matches!(err, ExporterError::Configuration(_)));
    }

    #[test]
    fn test_parse_regions() {
        assert_eq!(
            parse_regions("us-east-1, eu-west-1,,us-east-1 "),
            vec!["us-east-1", "eu-west-1"]
        );
        assert!(parse_regions("").is_empty());
        assert!(parse_regions(" , ").is_empty());
    }

    #[test]
    fn test_validate_missing_access_key() {
        let config = ExporterConfig {
            access_key_id: String::new(),
            ..configured()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "No access key ID given.");
    }

    #[test]
    fn test_validate_missing_secret() {
        let config = ExporterConfig {
            secret_key: String::new(),
            ..configured()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "No secret key given.");
    }

    #[test]
    fn test_socket_addr() {
        let config = configured();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:9759");

        let config = ExporterConfig {
            listen: "127.0.0.1:9100".into(),
            ..configured()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 9100);

        let config = ExporterConfig {
            listen: "not-an-address".into(),
            ..configured()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("AWS_ACCESS_KEY_ID", ""),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
        ]
        .into_iter()
        .collect();

        let mut config = ExporterConfig::from_toml(
            r#"
access_key_id = "AKIAFILE"
secret_key = "file-secret"
"#,
        )
        .unwrap();
        config.apply_env_with(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.access_key_id, "AKIAFILE");
        assert_eq!(config.secret_key, "env-secret");
    }

    #[test]
    fn test_secret_key_env_preferred() {
        let env: HashMap<&str, &str> = [
            ("AWS_SECRET_KEY", "primary"),
            ("AWS_SECRET_ACCESS_KEY", "fallback"),
        ]
        .into_iter()
        .collect();

        let mut config = ExporterConfig::default();
        config.apply_env_with(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.secret_key, "primary");
        assert!(config.access_key_id.is_empty());
    }
}
