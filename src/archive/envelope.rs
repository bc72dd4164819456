//! Ciphertext envelope framing
//!
//! The envelope is the standard padded base64 encoding of:
//!
//! ```text
//! +--------+---------+--------+---------+----------------+-------------+
//! | "SSAV" | version | iv_len | iv      | ciphertext     | tag (v2)    |
//! | 4 B    | 1 B     | 1 B    | iv_len  | 16*k B, k >= 1 | 32 B        |
//! +--------+---------+--------+---------+----------------+-------------+
//! ```
//!
//! Version 2 appends an HMAC-SHA256 over every preceding frame byte. The
//! JavaScript viewer in `assets/template.html` parses the same layout.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::crypto::{BLOCK_SIZE, TAG_SIZE};
use crate::error::{SeedsaverError, SeedsaverResult};

/// Frame magic, ASCII "SSAV"
pub const MAGIC: [u8; 4] = *b"SSAV";

/// Magic + version + IV length
const HEADER_SIZE: usize = 6;

/// Envelope format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatVersion {
    /// AES-256-CBC, padding is the only integrity signal
    #[default]
    V1,
    /// AES-256-CBC plus an HMAC-SHA256 tag (encrypt-then-MAC)
    V2,
}

impl FormatVersion {
    /// Byte stored in the frame header
    pub fn as_byte(self) -> u8 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }

    /// Parse the frame header byte
    pub fn from_byte(byte: u8) -> SeedsaverResult<Self> {
        match byte {
            1 => Ok(FormatVersion::V1),
            2 => Ok(FormatVersion::V2),
            other => Err(SeedsaverError::malformed(format!(
                "unsupported envelope version {}",
                other
            ))),
        }
    }

    /// Whether the envelope carries an authentication tag
    pub fn is_authenticated(self) -> bool {
        matches!(self, FormatVersion::V2)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_byte())
    }
}

/// A parsed envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    version: FormatVersion,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Option<[u8; TAG_SIZE]>,
}

impl Envelope {
    /// Build an unsigned envelope; v2 envelopes get their tag via [`Envelope::seal`]
    pub fn new(version: FormatVersion, iv: [u8; BLOCK_SIZE], ciphertext: Vec<u8>) -> Self {
        Self {
            version,
            iv: iv.to_vec(),
            ciphertext,
            tag: None,
        }
    }

    /// Attach the authentication tag
    pub fn seal(mut self, tag: [u8; TAG_SIZE]) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> Option<&[u8; TAG_SIZE]> {
        self.tag.as_ref()
    }

    /// Bytes covered by the v2 tag: header, IV and ciphertext
    pub fn signed_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.iv.len() + self.ciphertext.len());
        out.extend_from_slice(&MAGIC);
        out.push(self.version.as_byte());
        out.push(self.iv.len() as u8);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Serialize to the text embedded in the artifact
    pub fn to_text(&self) -> SeedsaverResult<String> {
        let mut frame = self.signed_bytes();
        match (self.version.is_authenticated(), &self.tag) {
            (true, Some(tag)) => frame.extend_from_slice(tag),
            (true, None) => {
                return Err(SeedsaverError::Encryption(
                    "v2 envelope serialized before its tag was attached".to_string(),
                ))
            }
            (false, _) => {}
        }
        Ok(STANDARD.encode(frame))
    }

    /// Parse envelope text
    ///
    /// Only structural checks happen here; nothing in this function depends
    /// on the password, so its errors can't act as a password oracle.
    pub fn parse(text: &str) -> SeedsaverResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SeedsaverError::malformed("envelope is empty"));
        }
        let frame = STANDARD
            .decode(text)
            .map_err(|e| SeedsaverError::malformed(format!("envelope is not valid base64: {}", e)))?;

        if frame.len() < HEADER_SIZE || frame[..4] != MAGIC {
            return Err(SeedsaverError::malformed("envelope header not recognised"));
        }
        let version = FormatVersion::from_byte(frame[4])?;
        let iv_len = frame[5] as usize;
        if iv_len != BLOCK_SIZE {
            return Err(SeedsaverError::malformed(format!(
                "unsupported IV length {}",
                iv_len
            )));
        }

        let body = &frame[HEADER_SIZE..];
        let tag_len = if version.is_authenticated() { TAG_SIZE } else { 0 };
        if body.len() < iv_len + tag_len {
            return Err(SeedsaverError::malformed("envelope is truncated"));
        }
        let (iv, rest) = body.split_at(iv_len);
        let (ciphertext, tag_bytes) = rest.split_at(rest.len() - tag_len);

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(SeedsaverError::malformed(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let tag = if version.is_authenticated() {
            let mut tag = [0u8; TAG_SIZE];
            tag.copy_from_slice(tag_bytes);
            Some(tag)
        } else {
            None
        };

        Ok(Self {
            version,
            iv: iv.to_vec(),
            ciphertext: ciphertext.to_vec(),
            tag,
        })
    }
}
