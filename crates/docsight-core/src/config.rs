//! Configuration and data directory management.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DOCS_DIR: &str = "data/test_docs";
pub const DEFAULT_SCRATCH_DIR: &str = "temp_files";
pub const DEFAULT_MAX_CHARS_FOR_SUMMARY: usize = 15_000;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 15;

/// Paths to the directories Docsight reads from and writes to.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Root for relative document paths and the local test-document picker.
    pub docs_dir: PathBuf,
    /// Downloaded documents land here until analysis finishes.
    pub scratch_dir: PathBuf,
}

impl DataPaths {
    /// Directories are not created here; the scratch directory is created on
    /// first download.
    pub fn new(docs_dir: impl AsRef<Path>, scratch_dir: impl AsRef<Path>) -> Self {
        Self {
            docs_dir: docs_dir.as_ref().to_path_buf(),
            scratch_dir: scratch_dir.as_ref().to_path_buf(),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(DEFAULT_DOCS_DIR, DEFAULT_SCRATCH_DIR)
    }
}

/// Top-level Docsight configuration.
#[derive(Debug, Clone)]
pub struct DocsightConfig {
    pub data_paths: DataPaths,
    /// Document text is cut to this many characters before it reaches the model.
    pub max_chars_for_summary: usize,
    /// Fixed timeout for remote document downloads.
    pub download_timeout: Duration,
}

impl Default for DocsightConfig {
    fn default() -> Self {
        Self {
            data_paths: DataPaths::default(),
            max_chars_for_summary: DEFAULT_MAX_CHARS_FOR_SUMMARY,
            download_timeout: Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
        }
    }
}

impl DocsightConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `REPO_DOCS_DIR` is resolved against `base_dir` when relative.
    pub fn from_env(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();

        let docs_dir = std::env::var("REPO_DOCS_DIR").unwrap_or_else(|_| DEFAULT_DOCS_DIR.into());
        let scratch_dir =
            std::env::var("DOCSIGHT_SCRATCH_DIR").unwrap_or_else(|_| DEFAULT_SCRATCH_DIR.into());

        let max_chars_for_summary = std::env::var("DOCSIGHT_MAX_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CHARS_FOR_SUMMARY);

        Self {
            data_paths: DataPaths::new(base_dir.join(docs_dir), scratch_dir),
            max_chars_for_summary,
            download_timeout: Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
        }
    }

    /// Configuration rooted at explicit directories, used by tests and embedders.
    pub fn with_paths(docs_dir: impl AsRef<Path>, scratch_dir: impl AsRef<Path>) -> Self {
        Self {
            data_paths: DataPaths::new(docs_dir, scratch_dir),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocsightConfig::default();
        assert_eq!(config.data_paths.docs_dir, PathBuf::from("data/test_docs"));
        assert_eq!(config.data_paths.scratch_dir, PathBuf::from("temp_files"));
        assert_eq!(config.max_chars_for_summary, 15_000);
        assert_eq!(config.download_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_with_paths_keeps_limits() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocsightConfig::with_paths(dir.path().join("docs"), dir.path().join("tmp"));
        assert_eq!(config.data_paths.docs_dir, dir.path().join("docs"));
        assert_eq!(config.data_paths.scratch_dir, dir.path().join("tmp"));
        assert_eq!(config.max_chars_for_summary, DEFAULT_MAX_CHARS_FOR_SUMMARY);
        // Paths are not created eagerly
        assert!(!dir.path().join("tmp").exists());
    }
}
