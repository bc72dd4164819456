//! Cryptographic primitives for SeedSaver
//!
//! PBKDF2-HMAC-SHA256 key derivation, AES-256-CBC with PKCS#7 padding, and
//! the optional HMAC-SHA256 tag used by authenticated archives.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{compute_tag, decrypt, encrypt, generate_iv, verify_tag, BLOCK_SIZE, TAG_SIZE};
pub use key_derivation::{derive_key, DerivedKey, Salt, ITERATIONS, KEY_SIZE, SALT_SIZE};
pub use secure_memory::{SecureBytes, SecureString};
