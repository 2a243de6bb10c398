//! Dashboard configuration.
//!
//! Values come from an optional TOML file, then environment variables,
//! then built-in defaults:
//!
//! ```toml
//! api_url = "http://localhost:8001"
//! snapshot_path = "data/emergency_incidents.json"
//! locale = "he"
//! utc_offset_minutes = 120
//! offline = false
//!
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8080
//! static_dir = "app/dist"
//! ```

use std::path::{Path, PathBuf};

use emergency_map_annotation::FormatOptions;
use emergency_map_models::Locale;
use emergency_map_store::snapshot::DEFAULT_SNAPSHOT_PATH;
use serde::{Deserialize, Serialize};

/// Backend URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override has an unusable value.
    #[error("Invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// View server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of static frontend files, served at `/` when present.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("app/dist"),
        }
    }
}

/// Everything needed to build a [`crate::Dashboard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Remote backend base URL.
    pub api_url: String,
    /// Use the bundled seed data instead of the remote backend.
    pub offline: bool,
    /// Local incident snapshot file.
    pub snapshot_path: PathBuf,
    /// Display language.
    pub locale: Locale,
    /// Offset from UTC, in minutes, that timestamps are shown in.
    pub utc_offset_minutes: i32,
    /// View server settings.
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            offline: false,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            locale: Locale::default(),
            utc_offset_minutes: 0,
            server: ServerConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads the config file at `path` (if given), then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment variable holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for values that do not parse.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("EMERGENCY_MAP_API_URL") {
            self.api_url = url;
        }
        if let Some(path) = get("EMERGENCY_MAP_SNAPSHOT") {
            self.snapshot_path = PathBuf::from(path);
        }
        if let Some(value) = get("EMERGENCY_MAP_LOCALE") {
            self.locale = parse_env("EMERGENCY_MAP_LOCALE", value)?;
        }
        if let Some(value) = get("EMERGENCY_MAP_UTC_OFFSET_MINUTES") {
            self.utc_offset_minutes = parse_env("EMERGENCY_MAP_UTC_OFFSET_MINUTES", value)?;
        }
        if let Some(value) = get("EMERGENCY_MAP_OFFLINE") {
            self.offline = parse_flag("EMERGENCY_MAP_OFFLINE", value)?;
        }
        if let Some(addr) = get("BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(value) = get("PORT") {
            self.server.port = parse_env("PORT", value)?;
        }
        Ok(())
    }

    /// Formatting options for the configured locale and offset.
    #[must_use]
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions::new(self.locale, self.utc_offset_minutes)
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { name, value }),
    }
}
