//! Configuration loading and merging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var that overrides the user config path.
pub const CONFIG_ENV: &str = "PREFIX_LOOP_CONFIG";

/// Name of the project config file looked up in the working directory.
pub const PROJECT_CONFIG: &str = ".prefix-loop.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure.
///
/// Scalars are optional so a project file can override a user file in
/// either direction.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `.history` and `.errors` files.
    pub log_dir: Option<PathBuf>,

    /// Line printed after every command.
    pub divider: Option<String>,

    /// Preload editor recall from the history file (default on).
    pub load_history: Option<bool>,

    /// Dispatch audit settings.
    pub audit: AuditConfig,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging (default off).
    pub enabled: Option<bool>,
    /// Path to audit log file.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if let Some(user_config) = Self::load_file(&path)? {
                config = user_config;
            }
        }

        if let Some(cwd) = cwd {
            if let Some(project_config) = Self::load_file(&cwd.join(PROJECT_CONFIG))? {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Parse a config file, or `None` if it does not exist.
    pub fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Get user config path.
    /// Respects PREFIX_LOOP_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("prefix-loop").join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for scalars).
    fn merge(&mut self, other: Config) {
        if other.log_dir.is_some() {
            self.log_dir = other.log_dir;
        }
        if other.divider.is_some() {
            self.divider = other.divider;
        }
        if other.load_history.is_some() {
            self.load_history = other.load_history;
        }
        if other.audit.enabled.is_some() {
            self.audit.enabled = other.audit.enabled;
        }
        if other.audit.path.is_some() {
            self.audit.path = other.audit.path;
        }
    }

    /// Directory for history and error logs.
    ///
    /// Falls back to the platform data directory, then the current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("prefix-loop")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Whether to preload editor recall from the history file.
    pub fn load_history(&self) -> bool {
        self.load_history.unwrap_or(true)
    }

    /// Text of the line written after every command.
    pub fn divider(&self) -> &str {
        self.divider.as_deref().unwrap_or("")
    }

    /// Audit log path, if auditing is on.
    pub fn audit_path(&self) -> Option<&Path> {
        if self.audit.enabled.unwrap_or(false) {
            self.audit.path.as_deref()
        } else {
            None
        }
    }
}
