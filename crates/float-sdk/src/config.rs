/*
[INPUT]:  Built-in module defaults, caller overlays, YAML configuration file
[OUTPUT]: Merged per-module configuration and SDK-wide configuration
[POS]:    Configuration layer - module hosts, credentials, timeouts
[UPDATE]: When adding configuration options
*/

use std::path::Path;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::http::{ClientConfig, FloatError, Result};

/// Effective configuration of one resource client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Hostname (`api-auth.hellofloat.com`, `host:port`) or full origin
    /// (`http://127.0.0.1:8080`)
    pub host: String,
    /// Attach session cookies to requests
    pub with_credentials: bool,
}

impl ModuleConfig {
    pub fn new(host: impl Into<String>, with_credentials: bool) -> Self {
        Self {
            host: host.into(),
            with_credentials,
        }
    }

    /// Apply an overlay; fields the overlay leaves unset keep their value
    pub fn merged(&self, overlay: &ModuleOverlay) -> Self {
        Self {
            host: overlay.host.clone().unwrap_or_else(|| self.host.clone()),
            with_credentials: overlay.with_credentials.unwrap_or(self.with_credentials),
        }
    }

    /// Base URL requests are sent under, always ending in `/`
    ///
    /// Bare hosts are addressed over https. A path in the host
    /// (`http://gateway/float`) is kept as a prefix of every endpoint.
    pub fn base_url(&self) -> Result<Url> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(FloatError::Config("module host is empty".to_string()));
        }
        let base = if host.contains("://") {
            format!("{host}/")
        } else {
            format!("https://{host}/")
        };
        Ok(Url::parse(&base)?)
    }

    /// Absolute URL of an endpoint on this module's host
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url()?.join(path.trim_start_matches('/'))?)
    }
}

/// Caller-supplied partial module configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleOverlay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_credentials: Option<bool>,
}

impl ModuleOverlay {
    pub fn host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            with_credentials: None,
        }
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = Some(with_credentials);
        self
    }
}

/// SDK-wide configuration
///
/// ```yaml
/// users:
///   host: qa-api.hellofloat.com:4443
/// scoring:
///   host: qa-api.hellofloat.com:443
///   with_credentials: true
/// timeouts:
///   request_secs: 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatConfig {
    pub users: ModuleOverlay,
    pub passwords: ModuleOverlay,
    pub scoring: ModuleOverlay,
    pub accounts: ModuleOverlay,
    pub cards: ModuleOverlay,
    pub timeouts: ClientConfig,
}

impl FloatConfig {
    /// Point every module at the same host
    pub fn with_host(host: impl Into<String>) -> Self {
        let overlay = ModuleOverlay::host(host);
        Self {
            users: overlay.clone(),
            passwords: overlay.clone(),
            scoring: overlay.clone(),
            accounts: overlay.clone(),
            cards: overlay,
            timeouts: ClientConfig::default(),
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| FloatError::Config(format!("invalid YAML configuration: {e}")))
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FloatError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_fields() {
        let defaults = ModuleConfig::new("api-auth.hellofloat.com", true);
        let merged = defaults.merged(&ModuleOverlay::host("qa-api.hellofloat.com:4443"));
        assert_eq!(merged.host, "qa-api.hellofloat.com:4443");
        assert!(merged.with_credentials);

        let merged = defaults.merged(&ModuleOverlay::default().with_credentials(false));
        assert_eq!(merged.host, "api-auth.hellofloat.com");
        assert!(!merged.with_credentials);
    }

    #[test]
    fn test_endpoint_adds_https_to_bare_host() {
        let config = ModuleConfig::new("qa-api.hellofloat.com:4443", false);
        assert_eq!(
            config.endpoint("/user/u1").unwrap().as_str(),
            "https://qa-api.hellofloat.com:4443/user/u1"
        );
    }

    #[test]
    fn test_endpoint_keeps_explicit_scheme() {
        let config = ModuleConfig::new("http://127.0.0.1:8080/", false);
        assert_eq!(
            config.endpoint("/card").unwrap().as_str(),
            "http://127.0.0.1:8080/card"
        );
    }

    #[test]
    fn test_endpoint_keeps_host_path_prefix() {
        let config = ModuleConfig::new("http://gateway/float", true);
        assert_eq!(config.base_url().unwrap().as_str(), "http://gateway/float/");
        assert_eq!(
            config.endpoint("/user/u1").unwrap().as_str(),
            "http://gateway/float/user/u1"
        );
        assert_eq!(
            ModuleConfig::new("gateway/v2/", false).endpoint("/score").unwrap().as_str(),
            "https://gateway/v2/score"
        );
    }

    #[test]
    fn test_empty_host_is_config_error() {
        let err = ModuleConfig::new("  ", false).base_url().unwrap_err();
        assert!(matches!(err, FloatError::Config(_)));
    }

    #[test]
    fn test_yaml_deep_merge() {
        let config = FloatConfig::from_yaml_str(
            "users:\n  host: qa-api.hellofloat.com:4443\ntimeouts:\n  request_secs: 5\n",
        )
        .unwrap();
        assert_eq!(config.users.host.as_deref(), Some("qa-api.hellofloat.com:4443"));
        assert_eq!(config.users.with_credentials, None);
        assert_eq!(config.scoring, ModuleOverlay::default());
        assert_eq!(config.timeouts.request_secs, 5);
        assert_eq!(config.timeouts.connect_secs, ClientConfig::default().connect_secs);
    }

    #[test]
    fn test_from_file_missing() {
        let err = FloatConfig::from_file("/nonexistent/float.yaml").unwrap_err();
        assert!(matches!(err, FloatError::Config(_)));
    }
}
