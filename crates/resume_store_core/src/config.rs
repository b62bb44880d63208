//! Store configuration.
//!
//! # Responsibility
//! - Resolve the SQLite store file location.
//!
//! # Invariants
//! - An unset or blank `RESUME_STORE_DB_PATH` falls back to
//!   [`DEFAULT_DB_FILE_NAME`] in the working directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the store file path.
pub const DB_PATH_ENV: &str = "RESUME_STORE_DB_PATH";

/// Store file used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "resume_analyzer.db";

/// Configuration handed explicitly to [`crate::ResumeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Reads [`DB_PATH_ENV`], falling back to [`DEFAULT_DB_FILE_NAME`].
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DB_PATH_ENV).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(path) => Self::with_db_path(path),
            None => Self::default(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_db_path(DEFAULT_DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DB_FILE_NAME};
    use std::path::Path;

    #[test]
    fn blank_env_value_falls_back_to_default() {
        assert_eq!(
            StoreConfig::from_env_value(None).db_path(),
            Path::new(DEFAULT_DB_FILE_NAME)
        );
        assert_eq!(
            StoreConfig::from_env_value(Some("   ")).db_path(),
            Path::new(DEFAULT_DB_FILE_NAME)
        );
    }

    #[test]
    fn env_value_is_trimmed() {
        let config = StoreConfig::from_env_value(Some("  /var/lib/resumes.db \n"));
        assert_eq!(config.db_path(), Path::new("/var/lib/resumes.db"));
    }
}
