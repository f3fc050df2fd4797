//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_DATA_DIR, CONFIG_DIR_ENV, DEFAULT_HOST, DEFAULT_PORT};
use crate::models::catalog::DEFAULT_TYPE_SCALE;

/// Agent bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Base URL of the running web server
    pub url: String,
    /// HTTP timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            url: format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"),
            timeout_ms: 1500,
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Quiet period before a snapshot is written, in milliseconds
    pub debounce_ms: u64,
    /// Snapshot file (defaults to `snapshot.json` in the config directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            path: None,
        }
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Offline export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory bundles are written to when `--output` is not given
    pub output_dir: PathBuf,
    /// Type scale used when an imported document names none
    pub default_type_scale: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_type_scale: DEFAULT_TYPE_SCALE.to_string(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Tokensmith/config.toml`
/// - macOS: `~/Library/Application Support/Tokensmith/config.toml`
/// - Windows: `%APPDATA%\Tokensmith\config.toml`
///
/// A missing file means defaults. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Agent bridge
    pub bridge: BridgeConfig,
    /// Snapshot persistence
    pub snapshot: SnapshotConfig,
    /// Web server
    pub server: ServerConfig,
    /// Offline export
    pub export: ExportConfig,
}

/// Keys accepted by [`Config::set`] and [`Config::get`].
pub const CONFIG_KEYS: [&str; 8] = [
    "bridge.url",
    "bridge.timeout_ms",
    "snapshot.debounce_ms",
    "snapshot.path",
    "server.host",
    "server.port",
    "export.output_dir",
    "export.default_type_scale",
];

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Tokensmith/`
    /// - macOS: `~/Library/Application Support/Tokensmith/`
    /// - Windows: `%APPDATA%\Tokensmith\`
    ///
    /// `TOKENSMITH_CONFIG_DIR` replaces the platform directory when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        // Atomic rename
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp config file to: {}", path.display()))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `bridge.url` is an http(s) URL
    /// - `bridge.timeout_ms` and `server.port` are non-zero
    /// - `export.default_type_scale` is not empty
    pub fn validate(&self) -> Result<()> {
        if !(self.bridge.url.starts_with("http://") || self.bridge.url.starts_with("https://")) {
            anyhow::bail!(
                "Invalid bridge.url '{}'. Expected an http:// or https:// URL",
                self.bridge.url
            );
        }
        if self.bridge.timeout_ms == 0 {
            anyhow::bail!("bridge.timeout_ms must be greater than 0");
        }
        if self.server.port == 0 {
            anyhow::bail!("server.port must be greater than 0");
        }
        if self.export.default_type_scale.trim().is_empty() {
            anyhow::bail!("export.default_type_scale must not be empty");
        }
        Ok(())
    }

    /// Returns the value of a dotted key as a string.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "bridge.url" => self.bridge.url.clone(),
            "bridge.timeout_ms" => self.bridge.timeout_ms.to_string(),
            "snapshot.debounce_ms" => self.snapshot.debounce_ms.to_string(),
            "snapshot.path" => self
                .snapshot
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "server.host" => self.server.host.clone(),
            "server.port" => self.server.port.to_string(),
            "export.output_dir" => self.export.output_dir.display().to_string(),
            "export.default_type_scale" => self.export.default_type_scale.clone(),
            other => anyhow::bail!(
                "Unknown config key '{other}'. Valid keys: {}",
                CONFIG_KEYS.join(", ")
            ),
        };
        Ok(value)
    }

    /// Sets a dotted key from a string.
    ///
    /// The change is applied only if the resulting config validates.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_number = |v: &str| -> Result<u64> {
            v.parse()
                .with_context(|| format!("Invalid number '{v}' for {key}"))
        };

        let mut next = self.clone();
        match key {
            "bridge.url" => next.bridge.url = value.trim_end_matches('/').to_string(),
            "bridge.timeout_ms" => next.bridge.timeout_ms = parse_number(value)?,
            "snapshot.debounce_ms" => next.snapshot.debounce_ms = parse_number(value)?,
            "snapshot.path" => {
                next.snapshot.path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "server.host" => next.server.host = value.to_string(),
            "server.port" => {
                next.server.port = value
                    .parse()
                    .with_context(|| format!("Invalid port '{value}'"))?;
            }
            "export.output_dir" => next.export.output_dir = PathBuf::from(value),
            "export.default_type_scale" => next.export.default_type_scale = value.to_string(),
            other => anyhow::bail!(
                "Unknown config key '{other}'. Valid keys: {}",
                CONFIG_KEYS.join(", ")
            ),
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.bridge.url, "http://127.0.0.1:4319");
        assert_eq!(config.bridge.timeout_ms, 1500);
        assert_eq!(config.snapshot.debounce_ms, 500);
        assert_eq!(config.server.port, 4319);
        assert_eq!(config.export.default_type_scale, "major-third");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        config.bridge.url = "localhost:4319".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.bridge.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[bridge]\ntimeout_ms = 250\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.bridge.timeout_ms, 250);
        assert_eq!(config.bridge.url, BridgeConfig::default().url);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.set("snapshot.path", "/tmp/tokensmith.json").unwrap();
        config.set("server.port", "8080").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::new();
        config.set("bridge.url", "http://example.test:9000/").unwrap();
        assert_eq!(config.get("bridge.url").unwrap(), "http://example.test:9000");

        assert!(config.set("server.port", "not-a-port").is_err());
        assert!(config.set("bridge.url", "ftp://nope").is_err());
        assert!(config.set("ui.theme", "dark").is_err());
        assert!(config.get("ui.theme").is_err());
        assert_eq!(config.get("snapshot.path").unwrap(), "");
    }
}
