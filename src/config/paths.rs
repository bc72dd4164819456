//! Path management for SeedSaver
//!
//! ## Path Resolution Order
//!
//! 1. `SEEDSAVER_DATA_DIR` environment variable (if set)
//! 2. Platform config directory from `directories`
//!    (`~/.config/seedsaver` on Linux, `~/Library/Application Support/...` on macOS,
//!    `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

use crate::error::SeedsaverError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SEEDSAVER_DATA_DIR";

/// Manages all paths used by SeedSaver
#[derive(Debug, Clone)]
pub struct SeedsaverPaths {
    /// Base directory for settings and the audit log
    base_dir: PathBuf,
}

impl SeedsaverPaths {
    /// Create a new SeedsaverPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SeedsaverError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "seedsaver")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SeedsaverError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create SeedsaverPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Where artifacts go when neither `--output` nor a configured directory is given
    ///
    /// The user's documents directory if the platform has one, otherwise the
    /// current directory.
    pub fn default_output_dir(&self) -> PathBuf {
        UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SeedsaverError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SeedsaverError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have ever been saved
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
