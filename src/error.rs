//! Custom error types for SeedSaver
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Encode-side variants are fatal to a single
//! archive attempt; only [`SeedsaverError::DecodeFailure`] invites a retry.

use thiserror::Error;

/// The main error type for SeedSaver operations
#[derive(Error, Debug)]
pub enum SeedsaverError {
    /// The operating system random source could not produce bytes
    #[error("Secure random source unavailable: {0}")]
    RandomnessUnavailable(String),

    /// The document template is unusable (missing/duplicated placeholder)
    #[error("Template error: {0}")]
    Template(String),

    /// Salt or envelope text is structurally broken
    #[error("Malformed archive: {0}")]
    MalformedEnvelope(String),

    /// Padding or tag check failed after decryption
    ///
    /// Deliberately carries no detail: a wrong password and a corrupted
    /// ciphertext must look identical to the caller.
    #[error("Wrong password or corrupted archive")]
    DecodeFailure,

    /// Cipher setup errors (key or IV of the wrong size)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input rejected before reaching the codec (password policy, empty image)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SeedsaverError {
    /// Create a malformed-envelope error
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedEnvelope(detail.into())
    }

    /// Create a template error
    pub fn template(detail: impl Into<String>) -> Self {
        Self::Template(detail.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SeedsaverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SeedsaverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SeedSaver operations
pub type SeedsaverResult<T> = Result<T, SeedsaverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeedsaverError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_decode_failure_is_generic() {
        let err = SeedsaverError::DecodeFailure;
        assert_eq!(err.to_string(), "Wrong password or corrupted archive");
    }

    #[test]
    fn test_malformed_display() {
        let err = SeedsaverError::malformed("salt is not hex");
        assert_eq!(err.to_string(), "Malformed archive: salt is not hex");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SeedsaverError = io_err.into();
        assert!(matches!(err, SeedsaverError::Io(_)));
    }
}
