//! Storage layer for SeedSaver
//!
//! Atomic file writes plus the naming rules for artifact files.

pub mod artifacts;
pub mod file_io;

pub use artifacts::ArtifactStore;
pub use file_io::{read_json, write_atomic, write_json_atomic};
