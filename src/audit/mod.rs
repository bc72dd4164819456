//! Audit logging for SeedSaver
//!
//! Records which artifacts were sealed and opened in an append-only JSONL
//! log. Entries carry paths, sizes and format versions only.
//!
//! # Example
//!
//! ```rust,ignore
//! use seedsaver::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::seal(path.display().to_string(), FormatVersion::V1, payload.len()))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
