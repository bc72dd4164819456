//! AES-256-CBC encryption/decryption with PKCS#7 padding
//!
//! CBC carries no authentication tag. Decryption under a wrong key still
//! produces a block-aligned plaintext; the only signal that something is off
//! is the trailing PKCS#7 padding, which is invalid with probability close to
//! 255/256. Callers that need certainty layer an HMAC on top (see
//! [`compute_tag`] / [`verify_tag`]).

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;

use crate::error::{SeedsaverError, SeedsaverResult};

use super::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// AES block size, also the IV size
pub const BLOCK_SIZE: usize = 16;

/// Size of the HMAC-SHA256 tag
pub const TAG_SIZE: usize = 32;

/// Generate a fresh random IV
pub fn generate_iv<R: RngCore + CryptoRng>(rng: &mut R) -> SeedsaverResult<[u8; BLOCK_SIZE]> {
    let mut iv = [0u8; BLOCK_SIZE];
    rng.try_fill_bytes(&mut iv)
        .map_err(|e| SeedsaverError::RandomnessUnavailable(e.to_string()))?;
    Ok(iv)
}

/// Encrypt plaintext data using AES-256-CBC
///
/// Output length is always a non-zero multiple of [`BLOCK_SIZE`]; an empty
/// plaintext still produces one full block of padding.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey, iv: &[u8; BLOCK_SIZE]) -> SeedsaverResult<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| SeedsaverError::Encryption(format!("Failed to create cipher: {}", e)))?;

    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt ciphertext using AES-256-CBC
///
/// Invalid padding maps to [`SeedsaverError::DecodeFailure`].
pub fn decrypt(ciphertext: &[u8], key: &DerivedKey, iv: &[u8]) -> SeedsaverResult<Vec<u8>> {
    if iv.len() != BLOCK_SIZE {
        return Err(SeedsaverError::malformed(format!(
            "Invalid IV size: expected {}, got {}",
            BLOCK_SIZE,
            iv.len()
        )));
    }
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(SeedsaverError::malformed(format!(
            "Ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| SeedsaverError::Encryption(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| SeedsaverError::DecodeFailure)
}

/// HMAC-SHA256 over `data`
pub fn compute_tag(mac_key: &DerivedKey, data: &[u8]) -> SeedsaverResult<[u8; TAG_SIZE]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key.as_bytes())
        .map_err(|e| SeedsaverError::Encryption(format!("Failed to create MAC: {}", e)))?;
    mac.update(data);
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Constant-time tag check; a mismatch is a [`SeedsaverError::DecodeFailure`]
pub fn verify_tag(mac_key: &DerivedKey, data: &[u8], tag: &[u8]) -> SeedsaverResult<()> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key.as_bytes())
        .map_err(|e| SeedsaverError::Encryption(format!("Failed to create MAC: {}", e)))?;
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| SeedsaverError::DecodeFailure)
}
