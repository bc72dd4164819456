//! SeedSaver - password-protected, self-contained image archives
//!
//! An image is encrypted under a password and embedded in a single HTML
//! file that decrypts itself in the browser. This crate produces those
//! archives and can also open them from the command line.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Key derivation, AES-CBC, HMAC tags, secure memory
//! - `archive`: Envelope framing, template assembly, encoder and decoder
//! - `config`: Configuration and path management
//! - `storage`: Atomic file writes and artifact naming
//! - `audit`: Audit logging system
//! - `cli`: Command handlers
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use seedsaver::archive::{seal, DEFAULT_TEMPLATE};
//!
//! let document = seal(DEFAULT_TEMPLATE, image_base64.as_bytes(), b"correct-password")?;
//! std::fs::write("encrypted-image.html", document)?;
//! ```

pub mod archive;
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

pub use error::SeedsaverError;
