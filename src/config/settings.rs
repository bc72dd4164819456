//! User settings for SeedSaver
//!
//! Output location, template override, envelope format and password policy.
//! Settings never hold secrets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::SeedsaverPaths;
use crate::archive::FormatVersion;
use crate::error::SeedsaverError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Minimum password length enforced before encoding
pub const MIN_PASSWORD_LEN: usize = 6;

/// User settings for SeedSaver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory where sealed artifacts are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Replacement for the built-in viewer template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    /// Envelope format for new archives
    #[serde(default)]
    pub format_version: FormatVersion,

    /// Minimum password length in characters
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Whether archive events go to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_min_password_len() -> usize {
    MIN_PASSWORD_LEN
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            output_dir: None,
            template_path: None,
            format_version: FormatVersion::default(),
            min_password_len: default_min_password_len(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &SeedsaverPaths) -> Result<Self, SeedsaverError> {
        let settings: Settings = read_json(paths.settings_file())
            .map_err(|e| SeedsaverError::Config(format!("Failed to load settings: {}", e)))?;

        if settings.min_password_len < MIN_PASSWORD_LEN {
            return Err(SeedsaverError::Config(format!(
                "min_password_len must be at least {}",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SeedsaverPaths) -> Result<(), SeedsaverError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Read the configured template, or the built-in one
    pub fn load_template(&self) -> Result<String, SeedsaverError> {
        match &self.template_path {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                SeedsaverError::Template(format!(
                    "Failed to read template {}: {}",
                    path.display(),
                    e
                ))
            }),
            None => Ok(crate::archive::DEFAULT_TEMPLATE.to_string()),
        }
    }

    /// Resolve the output directory
    pub fn output_dir(&self, paths: &SeedsaverPaths) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| paths.default_output_dir())
    }
}
