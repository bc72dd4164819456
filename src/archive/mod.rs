//! Encrypted self-contained archive format
//!
//! An archive is one HTML document carrying a hex salt, a base64 envelope and
//! the JavaScript needed to turn both back into the image given the password.
//!
//! # Architecture
//!
//! - `encoder`: password + payload → salt hex and envelope text
//! - `envelope`: the versioned binary frame inside the envelope text
//! - `template`: placeholder substitution and data-island extraction
//! - `decoder`: the inverse transform plus an interactive password session
//!
//! # Example
//!
//! ```rust,ignore
//! use seedsaver::archive::{self, template::DEFAULT_TEMPLATE};
//!
//! let document = archive::seal(DEFAULT_TEMPLATE, image_base64.as_bytes(), b"correct-password")?;
//! let contents = archive::template::extract(&document)?;
//! let image = archive::decode(&contents.salt, &contents.envelope, b"correct-password")?;
//! ```

pub mod decoder;
pub mod encoder;
pub mod envelope;
pub mod template;

pub use decoder::{decode, DecoderSession, SealedArchive, SessionState};
pub use encoder::{encode, EncodedArchive, Encoder};
pub use envelope::{Envelope, FormatVersion};
pub use template::{assemble, extract, ArchiveContents, DEFAULT_TEMPLATE};

use rand::{CryptoRng, RngCore};

use crate::error::SeedsaverResult;

/// Encode `plaintext` and substitute the result into `template`
///
/// The template is validated before any key derivation so a packaging defect
/// fails fast instead of after the slow KDF.
pub fn seal_with<R: RngCore + CryptoRng>(
    encoder: &mut Encoder<R>,
    template: &str,
    plaintext: &[u8],
    password: &[u8],
) -> SeedsaverResult<String> {
    template::validate(template)?;
    let encoded = encoder.encode(plaintext, password)?;
    assemble(template, &encoded.salt_hex, &encoded.envelope_text)
}

/// [`seal_with`] using the OS random source and v1 envelopes
pub fn seal(template: &str, plaintext: &[u8], password: &[u8]) -> SeedsaverResult<String> {
    seal_with(&mut Encoder::new(), template, plaintext, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedsaverError;

    #[test]
    fn test_seal_then_extract_then_decode() {
        let document = seal(DEFAULT_TEMPLATE, b"MDEyMzQ1Njc4OQ==", b"correct-password").unwrap();

        let contents = extract(&document).unwrap();
        assert_eq!(contents.salt.len(), 32);

        let sealed = SealedArchive::try_from(&contents).unwrap();
        let plaintext = sealed.open(b"correct-password").unwrap();
        assert_eq!(plaintext.as_bytes(), b"MDEyMzQ1Njc4OQ==");
    }

    #[test]
    fn test_seal_rejects_bad_template_up_front() {
        let err = seal("<html></html>", b"x", b"pw1234").unwrap_err();
        assert!(matches!(err, SeedsaverError::Template(_)));
    }

    #[test]
    fn test_sealed_documents_differ_between_runs() {
        let a = seal(DEFAULT_TEMPLATE, b"same", b"pw1234").unwrap();
        let b = seal(DEFAULT_TEMPLATE, b"same", b"pw1234").unwrap();
        assert_ne!(a, b);
    }
}
