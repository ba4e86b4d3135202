// src/core/config_manager.rs
//! Portal configuration: defaults, `portal.yaml`, environment, command line

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::utils::normalize_base_url;

const DEFAULT_CONFIG_FILE: &str = "portal.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub max_upload_bytes: u64,
    pub session_idle_minutes: u64,
    /// Cached reads never go stale when unset
    pub cache_stale_seconds: Option<u64>,
    pub port: u16,
    /// Base64 key for Rocket's private cookies; generated per process when unset
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 60,
            max_upload_bytes: 10 * 1024 * 1024,
            session_idle_minutes: 30,
            cache_stale_seconds: None,
            port: 8000,
            secret_key: None,
        }
    }
}

impl PortalConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes * 60)
    }

    pub fn cache_stale_after(&self) -> Option<Duration> {
        self.cache_stale_seconds.map(Duration::from_secs)
    }

    fn validate(mut self) -> Result<Self> {
        let url = normalize_base_url(&self.api_base_url);
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("api_base_url must start with http:// or https://, got '{}'", url);
        }
        self.api_base_url = url;

        if self.timeout_seconds == 0 {
            bail!("timeout_seconds must be greater than zero");
        }
        if self.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be greater than zero");
        }
        if self.session_idle_minutes == 0 {
            bail!("session_idle_minutes must be greater than zero");
        }
        Ok(self)
    }
}

/// Values given on the command line; they win over everything else
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<PortalConfig>,
    #[serde(default)]
    production: Option<PortalConfig>,
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load the configuration from the process environment
    pub fn load(overrides: &ConfigOverrides) -> Result<PortalConfig> {
        Self::load_with(overrides, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment lookup
    pub fn load_with<F>(overrides: &ConfigOverrides, env: F) -> Result<PortalConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = env("RESUMEAI_ENV")
            .or_else(|| env("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());
        info!("Loading portal configuration for environment: {}", environment);

        let mut config = match &overrides.config_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Configuration file not found: {}", path.display());
                }
                Self::load_from_file(path, &environment)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path, &environment)?
                } else {
                    PortalConfig::default()
                }
            }
        };

        if let Some(url) = env("RESUMEAI_API_URL") {
            config.api_base_url = url;
        }
        if let Some(raw) = env("RESUMEAI_TIMEOUT_SECS") {
            config.timeout_seconds = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid RESUMEAI_TIMEOUT_SECS: {}", raw))?;
        }
        if let Some(raw) = env("ROCKET_PORT") {
            config.port = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid ROCKET_PORT: {}", raw))?;
        }
        if let Some(key) = env("RESUMEAI_SECRET_KEY") {
            config.secret_key = Some(key);
        }

        if let Some(url) = &overrides.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(port) = overrides.port {
            config.port = port;
        }

        config.validate()
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<PortalConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };
        Ok(section.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const YAML: &str = "
local:
  api_base_url: http://localhost:5000/
  timeout_seconds: 15
production:
  api_base_url: https://api.resumeai.kr
  cache_stale_seconds: 300
  port: 9000
";

    #[test]
    fn test_sections_are_picked_by_environment() {
        let file = yaml_file(YAML);
        let overrides = ConfigOverrides {
            config_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let local = ConfigManager::load_with(&overrides, env_of(&[])).unwrap();
        assert_eq!(local.api_base_url, "http://localhost:5000");
        assert_eq!(local.timeout_seconds, 15);
        assert_eq!(local.max_upload_bytes, 10 * 1024 * 1024);

        let prod =
            ConfigManager::load_with(&overrides, env_of(&[("ENVIRONMENT", "production")]))
                .unwrap();
        assert_eq!(prod.api_base_url, "https://api.resumeai.kr");
        assert_eq!(prod.cache_stale_after(), Some(Duration::from_secs(300)));
        assert_eq!(prod.port, 9000);
        assert_eq!(prod.timeout_seconds, 60);
    }

    #[test]
    fn test_environment_then_flags_override_file() {
        let file = yaml_file(YAML);
        let overrides = ConfigOverrides {
            config_path: Some(file.path().to_path_buf()),
            api_url: Some("http://10.0.0.5:5000".to_string()),
            port: None,
        };
        let config = ConfigManager::load_with(
            &overrides,
            env_of(&[
                ("RESUMEAI_API_URL", "http://ignored:1"),
                ("RESUMEAI_TIMEOUT_SECS", "5"),
                ("ROCKET_PORT", "8080"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:5000");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let overrides = ConfigOverrides {
            config_path: Some(PathBuf::from("/nonexistent/portal.yaml")),
            ..Default::default()
        };
        assert!(ConfigManager::load_with(&overrides, env_of(&[])).is_err());
    }

    #[test]
    fn test_validation() {
        let bad_scheme = ConfigOverrides {
            config_path: Some(yaml_file("local:\n  api_base_url: ftp://x\n").path().to_path_buf()),
            ..Default::default()
        };
        assert!(ConfigManager::load_with(&bad_scheme, env_of(&[])).is_err());

        let file = yaml_file("local:\n  timeout_seconds: 0\n");
        let zero_timeout = ConfigOverrides {
            config_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(ConfigManager::load_with(&zero_timeout, env_of(&[])).is_err());

        let file = yaml_file("local: {}\n");
        let overrides = ConfigOverrides {
            config_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(ConfigManager::load_with(
            &overrides,
            env_of(&[("RESUMEAI_TIMEOUT_SECS", "soon")])
        )
        .is_err());
    }
}
