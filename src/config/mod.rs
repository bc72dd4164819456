//! Configuration module for SeedSaver
//!
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SeedsaverPaths;
pub use settings::Settings;
