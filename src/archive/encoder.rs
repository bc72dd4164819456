//! Archive encoder
//!
//! Turns (plaintext, password) into the hex salt and envelope text that get
//! substituted into the artifact template. Each call draws its own salt and
//! IV, so encoding the same image twice never yields the same archive.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::crypto::{compute_tag, derive_key, encrypt, generate_iv, Salt};
use crate::error::SeedsaverResult;

use super::envelope::{Envelope, FormatVersion};

/// Output of a single encode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArchive {
    /// Lowercase hex salt (32 characters)
    pub salt_hex: String,
    /// Base64 envelope text
    pub envelope_text: String,
}

/// Encrypts payloads into archive envelopes
pub struct Encoder<R = OsRng> {
    rng: R,
    version: FormatVersion,
}

impl Encoder<OsRng> {
    /// Encoder backed by the operating system RNG, producing v1 envelopes
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for Encoder<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> Encoder<R> {
    /// Encoder drawing salts and IVs from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            version: FormatVersion::default(),
        }
    }

    /// Select the envelope format
    pub fn format(mut self, version: FormatVersion) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Encrypt `plaintext` under a key derived from `password`
    ///
    /// Fails only when the random source does. The derived key lives for the
    /// duration of this call and is zeroized when it returns.
    pub fn encode(&mut self, plaintext: &[u8], password: &[u8]) -> SeedsaverResult<EncodedArchive> {
        let salt = Salt::generate(&mut self.rng)?;
        let iv = generate_iv(&mut self.rng)?;
        let key = derive_key(password, &salt);

        let ciphertext = encrypt(plaintext, &key, &iv)?;
        let mut envelope = Envelope::new(self.version, iv, ciphertext);
        if self.version.is_authenticated() {
            let tag = compute_tag(&key.mac_key()?, &envelope.signed_bytes())?;
            envelope = envelope.seal(tag);
        }

        tracing::debug!(
            version = %self.version,
            payload_bytes = plaintext.len(),
            "encoded archive envelope"
        );

        Ok(EncodedArchive {
            salt_hex: salt.to_hex(),
            envelope_text: envelope.to_text()?,
        })
    }
}

/// Encode with the OS random source and the default format
pub fn encode(plaintext: &[u8], password: &[u8]) -> SeedsaverResult<EncodedArchive> {
    Encoder::new().encode(plaintext, password)
}
