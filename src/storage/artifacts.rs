//! Artifact files on disk
//!
//! Sealed archives are named `encrypted-image-YYYY-MM-DD-HH-MM-SS.html` and
//! are never overwritten once written.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::file_io::{unique_path, write_atomic};
use crate::error::SeedsaverError;

/// Largest artifact `read` will load
///
/// A phone photo is a few MB; base64 and HTML overhead stay well under this.
pub const MAX_ARTIFACT_BYTES: u64 = 256 * 1024 * 1024;

/// Reads and writes artifacts within one output directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File stem for an artifact created at `now`
    pub fn file_stem(now: DateTime<Utc>) -> String {
        format!("encrypted-image-{}", now.format("%Y-%m-%d-%H-%M-%S"))
    }

    /// Write a new artifact and return its path
    pub fn write(&self, document: &str, now: DateTime<Utc>) -> Result<PathBuf, SeedsaverError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SeedsaverError::Storage(format!(
                "Failed to create output directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = unique_path(&self.dir, &Self::file_stem(now), "html");
        write_atomic(&path, document.as_bytes())?;
        Ok(path)
    }

    /// Read an artifact from an arbitrary path
    pub fn read(path: &Path) -> Result<String, SeedsaverError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            SeedsaverError::Storage(format!("Failed to open {}: {}", path.display(), e))
        })?;
        if metadata.len() > MAX_ARTIFACT_BYTES {
            return Err(SeedsaverError::Storage(format!(
                "{} is too large to be an archive ({} bytes)",
                path.display(),
                metadata.len()
            )));
        }
        std::fs::read_to_string(path).map_err(|e| {
            SeedsaverError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}
