//! Runtime configuration.
//!
//! # Responsibility
//! - Define display, storage, and logging settings with defaults.
//! - Load settings from TOML and overlay environment variables.
//!
//! # Invariants
//! - Precedence: caller overrides > environment > file > defaults.
//! - `display.panel_title` is never blank after validation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "SCENE_NOTES_DB";
pub const ENV_LOG_LEVEL: &str = "SCENE_NOTES_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SCENE_NOTES_LOG_DIR";
pub const ENV_PANEL_TITLE: &str = "SCENE_NOTES_PANEL_TITLE";

const DEFAULT_PANEL_TITLE: &str = "Notes";
const DEFAULT_DB_FILE_NAME: &str = "scene_notes.sqlite3";

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotesConfig {
    pub display: DisplayConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Presentation settings for host adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Title of the notes panel/tab.
    pub panel_title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            panel_title: DEFAULT_PANEL_TITLE.to_string(),
        }
    }
}

/// Project document location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
        }
    }
}

/// File logging settings. Logging stays off while `dir` is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub level: Option<String>,
    /// Absolute directory for rolling log files.
    pub dir: Option<PathBuf>,
}

impl NotesConfig {
    /// Parses TOML text; missing sections fall back to defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays values found through `lookup` (usually the process
    /// environment). Blank values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(ENV_DB_PATH) {
            self.storage.db_path = PathBuf::from(value);
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            self.logging.level = Some(value);
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            self.logging.dir = Some(PathBuf::from(value));
        }
        if let Some(value) = read(ENV_PANEL_TITLE) {
            self.display.panel_title = value;
        }
        self
    }

    /// Overlays the current process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.panel_title.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "display.panel_title must not be blank".to_string(),
            ));
        }
        if self.storage.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.db_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file.
pub fn load_from_toml(path: &Path) -> Result<NotesConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    NotesConfig::from_toml_str(&contents)
}
