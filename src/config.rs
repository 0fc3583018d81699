//! Configuration management for mayacmd.
//!
//! Configuration is loaded from `~/.config/mayacmd/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Command-port endpoint settings.
    #[serde(default)]
    pub port: PortConfig,
    /// Defaults applied when CLI arguments are omitted.
    #[serde(default)]
    pub defaults: Defaults,
}

/// Where to find Maya's command port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConfig {
    /// Host Maya is listening on (default: 127.0.0.1).
    #[serde(default = "default_host")]
    pub host: String,
    /// Command port number (default: 1234).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timeout in seconds for connect/write/read (default: 5).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    1234
}

fn default_timeout_secs() -> u64 {
    5
}

/// Optional defaults for subcommand arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Plugin path used when `mayacmd load` is run without an argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    /// Read Maya's one-line reply after sending (default: false).
    #[serde(default)]
    pub reply: bool,
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("mayacmd"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, using defaults if not found.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// The command-port address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.port.host, self.port.port)
    }

    /// The configured network timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.port.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port.host, "127.0.0.1");
        assert_eq!(config.port.port, 1234);
        assert_eq!(config.port.timeout_secs, 5);
        assert!(config.defaults.plugin.is_none());
        assert!(!config.defaults.reply);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:1234");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("1234"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
[port]
host = "10.0.0.5"
port = 7001

[defaults]
plugin = "/builds/scene_exporter.mll"
reply = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.port.host, "10.0.0.5");
        assert_eq!(config.port.port, 7001);
        // timeout_secs omitted, falls back to the field default
        assert_eq!(config.port.timeout_secs, 5);
        assert_eq!(
            config.defaults.plugin.as_deref(),
            Some("/builds/scene_exporter.mll")
        );
        assert!(config.defaults.reply);
    }

    #[test]
    fn test_empty_config_deserializes() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.address(), "127.0.0.1:1234");
    }
}
