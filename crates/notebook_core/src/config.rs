//! Runtime configuration for the notebook composition root.
//!
//! # Responsibility
//! - Resolve where the blob database and logs live.
//! - Validate user-supplied overrides before anything is opened.
//!
//! # Invariants
//! - `data_dir` is absolute once validated; logging requires it.
//! - `storage_key` is a non-blank single-line string.

use crate::logging::{default_log_level, normalize_level};
use crate::store::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "notebook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No platform data directory could be resolved.
    DataDirUnavailable,
    RelativeDataDir(PathBuf),
    InvalidStorageKey(String),
    InvalidDbFileName(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataDirUnavailable => write!(f, "cannot determine a data directory"),
            Self::RelativeDataDir(path) => {
                write!(f, "data_dir must be absolute, got `{}`", path.display())
            }
            Self::InvalidStorageKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::InvalidDbFileName(name) => write!(f, "invalid database file name `{name}`"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings consumed by `app::Notebook::open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub storage_key: String,
    pub log_level: String,
}

impl NotebookConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
        }
    }

    /// Defaults rooted at the platform data directory.
    pub fn from_project_dirs() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("org", "notebook", "notebook")
            .ok_or(ConfigError::DataDirUnavailable)?;
        Ok(Self::with_data_dir(dirs.data_dir()))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_dir.is_absolute() {
            return Err(ConfigError::RelativeDataDir(self.data_dir.clone()));
        }

        let key = self.storage_key.as_str();
        if key.trim().is_empty() || key.contains(['\n', '\r']) {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }

        let file = self.db_file_name.as_str();
        if file.trim().is_empty() || file.contains(['/', '\\']) {
            return Err(ConfigError::InvalidDbFileName(self.db_file_name.clone()));
        }

        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}
