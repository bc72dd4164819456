//! Archive decoder
//!
//! Mirrors the viewer embedded in the artifact so archives can be checked
//! without a browser. Structural problems (bad hex, bad base64, unknown
//! frame) are reported as [`SeedsaverError::MalformedEnvelope`] before any
//! key is derived; everything after derivation collapses into a single
//! [`SeedsaverError::DecodeFailure`].

use crate::crypto::{decrypt, derive_key, verify_tag, Salt, SecureBytes};
use crate::error::{SeedsaverError, SeedsaverResult};

use super::envelope::Envelope;
use super::template::ArchiveContents;

/// A parsed archive, ready for password attempts
#[derive(Debug, Clone)]
pub struct SealedArchive {
    salt: Salt,
    envelope: Envelope,
}

impl SealedArchive {
    /// Parse salt hex and envelope text
    pub fn parse(salt_hex: &str, envelope_text: &str) -> SeedsaverResult<Self> {
        Ok(Self {
            salt: Salt::from_hex(salt_hex.trim())?,
            envelope: Envelope::parse(envelope_text)?,
        })
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Try one password
    ///
    /// v1 archives accept a wrong password whenever the garbage plaintext
    /// happens to end in valid padding (about 1 in 256); the result is then
    /// returned unchanged. v2 archives reject those through the tag.
    pub fn open(&self, password: &[u8]) -> SeedsaverResult<SecureBytes> {
        let key = derive_key(password, &self.salt);

        if let Some(tag) = self.envelope.tag() {
            verify_tag(&key.mac_key()?, &self.envelope.signed_bytes(), tag)?;
        }

        let plaintext = decrypt(self.envelope.ciphertext(), &key, self.envelope.iv())?;
        Ok(SecureBytes::from(plaintext))
    }
}

impl TryFrom<&ArchiveContents> for SealedArchive {
    type Error = SeedsaverError;

    fn try_from(contents: &ArchiveContents) -> SeedsaverResult<Self> {
        Self::parse(&contents.salt, &contents.envelope)
    }
}

/// Decode an archive in one shot
pub fn decode(salt_hex: &str, envelope_text: &str, password: &[u8]) -> SeedsaverResult<SecureBytes> {
    SealedArchive::parse(salt_hex, envelope_text)?.open(password)
}

/// Where an interactive decode currently stands
#[derive(Debug)]
pub enum SessionState {
    /// Waiting for the user to type a password
    AwaitingPassword,
    /// Key derivation and decryption in progress
    Verifying,
    /// The payload was recovered
    Decoded(SecureBytes),
    /// The last attempt failed; a new password may be submitted
    Failed,
}

impl SessionState {
    /// Whether [`DecoderSession::submit`] is currently allowed
    pub fn accepts_password(&self) -> bool {
        matches!(self, SessionState::AwaitingPassword | SessionState::Failed)
    }
}

/// Interactive password loop over one archive
///
/// No attempt counter and no lockout: the archive is a static file, so
/// limiting retries here would protect nothing.
#[derive(Debug)]
pub struct DecoderSession {
    archive: SealedArchive,
    state: SessionState,
}

impl DecoderSession {
    pub fn new(archive: SealedArchive) -> Self {
        Self {
            archive,
            state: SessionState::AwaitingPassword,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn archive(&self) -> &SealedArchive {
        &self.archive
    }

    /// Attempt a password
    ///
    /// Submitting while already decoded starts a fresh attempt, the same as
    /// calling [`DecoderSession::reset`] first.
    pub fn submit(&mut self, password: &[u8]) -> &SessionState {
        self.state = SessionState::Verifying;
        self.state = match self.archive.open(password) {
            Ok(plaintext) => SessionState::Decoded(plaintext),
            Err(e) => {
                tracing::debug!(error = %e, "decode attempt rejected");
                SessionState::Failed
            }
        };
        &self.state
    }

    /// Drop any decoded payload and wait for a password again
    pub fn reset(&mut self) {
        self.state = SessionState::AwaitingPassword;
    }

    /// Take the decoded payload, leaving the session awaiting a password
    pub fn take_plaintext(&mut self) -> Option<SecureBytes> {
        match std::mem::replace(&mut self.state, SessionState::AwaitingPassword) {
            SessionState::Decoded(plaintext) => Some(plaintext),
            other => {
                self.state = other;
                None
            }
        }
    }
}
