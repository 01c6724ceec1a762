//! TOML-based configuration for the backend.
//!
//! Read from the path in `CLOUDWIN_CONFIG` if set, otherwise from the
//! platform-appropriate config file:
//! - Windows:  `%APPDATA%\cloudwin\config.toml`
//! - Linux:    `~/.config/cloudwin/config.toml`
//! - macOS:    `~/Library/Application Support/cloudwin/config.toml`
//!
//! ```toml
//! [lifecycle]
//! poll_interval_us = 1000
//!
//! [window]
//! default_width = 1920
//! default_height = 1080
//!
//! [input]
//! text_decoding = "utf8"   # or "ascii-only"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a missing file, a missing
//! section or a missing key all fall back to the values above.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::consume_input::TextDecoding;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CLOUDWIN_CONFIG";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Lifecycle monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifecycleConfig {
    /// Upper bound on how long the monitor waits for one lifecycle event
    /// before re-checking the termination flag.
    #[serde(default = "default_poll_interval_us")]
    pub poll_interval_us: u64,
}

/// Size given to windows created without an explicit size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub default_width: u32,
    #[serde(default = "default_height")]
    pub default_height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    #[serde(default)]
    pub text_decoding: TextDecoding,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ──────────────────────────────────────────────────────────

fn default_poll_interval_us() -> u64 {
    1000
}
fn default_width() -> u32 {
    1920
}
fn default_height() -> u32 {
    1080
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            poll_interval_us: default_poll_interval_us(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            default_height: default_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LifecycleConfig {
    /// Poll interval as a `Duration`, never zero.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_micros(self.poll_interval_us.max(1))
    }
}

// ── Config repository ────────────────────────────────────────────────────────

/// Resolves the config file path: `CLOUDWIN_CONFIG` first, then the
/// platform config directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither is available.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config from [`config_file_path`], returning defaults if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<BackendConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config from `path`, returning defaults if it does not exist.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from(path: &Path) -> Result<BackendConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BackendConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path` as pretty TOML, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &BackendConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("cloudwin"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("cloudwin"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("cloudwin"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("cloudwin_test_{}", Uuid::new_v4()))
            .join("config.toml")
    }

    #[test]
    fn test_defaults() {
        // Arrange / Act
        let cfg = BackendConfig::default();

        // Assert
        assert_eq!(cfg.lifecycle.poll_interval_us, 1000);
        assert_eq!(cfg.lifecycle.poll_interval(), Duration::from_millis(1));
        assert_eq!(cfg.window.default_width, 1920);
        assert_eq!(cfg.window.default_height, 1080);
        assert_eq!(cfg.input.text_decoding, TextDecoding::Utf8);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: BackendConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, BackendConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_keys() {
        // Arrange
        let toml_str = r#"
[lifecycle]
poll_interval_us = 250

[input]
text_decoding = "ascii-only"
"#;

        // Act
        let cfg: BackendConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.lifecycle.poll_interval_us, 250);
        assert_eq!(cfg.input.text_decoding, TextDecoding::AsciiOnly);
        assert_eq!(cfg.window.default_width, 1920);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let cfg = LifecycleConfig { poll_interval_us: 0 };
        assert_eq!(cfg.poll_interval(), Duration::from_micros(1));
    }

    #[test]
    fn test_unknown_text_decoding_is_parse_error() {
        let result: Result<BackendConfig, _> = toml::from_str("[input]\ntext_decoding = \"latin1\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let cfg = load_config_from(&temp_path()).expect("missing file is not an error");
        assert_eq!(cfg, BackendConfig::default());
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_save_and_load_round_trip() {
        // Arrange
        let path = temp_path();
        let mut cfg = BackendConfig::default();
        cfg.window.default_width = 1280;
        cfg.window.default_height = 720;
        cfg.logging.level = "debug".to_string();

        // Act
        save_config(&cfg, &path).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if std::env::var_os(CONFIG_PATH_ENV).is_some() {
            return;
        }
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"), "got {path:?}");
        }
    }
}
