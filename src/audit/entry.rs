//! Audit entry data structures
//!
//! An entry records that something happened to an artifact, never what was
//! inside it: no salts, envelopes, passwords or image bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::archive::FormatVersion;

/// Types of archive events that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// A new artifact was written
    Seal,
    /// An artifact was decoded successfully
    Open,
    /// A password attempt was rejected
    OpenFailed,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Seal => write!(f, "SEAL"),
            Operation::Open => write!(f, "OPEN"),
            Operation::OpenFailed => write!(f, "OPEN_FAILED"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry id
    pub id: Uuid,

    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Artifact path as given on the command line or written by seal
    pub artifact: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<FormatVersion>,

    /// Plaintext size in bytes (seal and open only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_bytes: Option<usize>,
}

impl AuditEntry {
    fn new(operation: Operation, artifact: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            operation,
            artifact: artifact.into(),
            format_version: None,
            payload_bytes: None,
        }
    }

    /// Entry for a freshly written artifact
    pub fn seal(artifact: impl Into<String>, version: FormatVersion, payload_bytes: usize) -> Self {
        Self {
            format_version: Some(version),
            payload_bytes: Some(payload_bytes),
            ..Self::new(Operation::Seal, artifact)
        }
    }

    /// Entry for a successful decode
    pub fn open(artifact: impl Into<String>, version: FormatVersion, payload_bytes: usize) -> Self {
        Self {
            format_version: Some(version),
            payload_bytes: Some(payload_bytes),
            ..Self::new(Operation::Open, artifact)
        }
    }

    /// Entry for a rejected password attempt
    pub fn open_failed(artifact: impl Into<String>) -> Self {
        Self::new(Operation::OpenFailed, artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_entry_fields() {
        let entry = AuditEntry::seal("out/encrypted-image.html", FormatVersion::V2, 1024);
        assert_eq!(entry.operation, Operation::Seal);
        assert_eq!(entry.format_version, Some(FormatVersion::V2));
        assert_eq!(entry.payload_bytes, Some(1024));
    }

    #[test]
    fn test_failed_entry_omits_optional_fields() {
        let entry = AuditEntry::open_failed("a.html");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"open_failed\""));
        assert!(!json.contains("payload_bytes"));
        assert!(!json.contains("format_version"));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::OpenFailed.to_string(), "OPEN_FAILED");
    }
}
