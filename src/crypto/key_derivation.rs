//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the 256-bit archive key from a password and a random salt. The
//! hash, iteration count and output length are part of the archive format:
//! the viewer embedded in every artifact hardcodes the same values, so
//! changing any of them silently breaks every existing archive.

use hkdf::Hkdf;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SeedsaverError, SeedsaverResult};

/// PBKDF2 iteration count
pub const ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// Salt length generated for new archives (128 bits)
pub const SALT_SIZE: usize = 16;

/// HKDF info string separating the v2 MAC key from the cipher key
const MAC_KEY_INFO: &[u8] = b"seedsaver/v2/mac";

/// Random per-archive salt
///
/// Stored in cleartext next to the ciphertext. Decoders accept any length;
/// the encoder only ever generates [`SALT_SIZE`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    /// Generate a fresh 128-bit salt
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> SeedsaverResult<Self> {
        let mut bytes = vec![0u8; SALT_SIZE];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| SeedsaverError::RandomnessUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Parse a salt from its hex form, whatever its length
    pub fn from_hex(text: &str) -> SeedsaverResult<Self> {
        if text.is_empty() {
            return Err(SeedsaverError::malformed("salt is empty"));
        }
        hex::decode(text)
            .map(Self)
            .map_err(|e| SeedsaverError::malformed(format!("salt is not valid hex: {}", e)))
    }

    /// Lowercase hex encoding, as embedded in the artifact
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Raw salt bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Salt length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A derived encryption key
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The 32-byte key for AES-256
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Expand the key into the HMAC key used by v2 envelopes
    pub fn mac_key(&self) -> SeedsaverResult<DerivedKey> {
        let hk = Hkdf::<Sha256>::new(None, &self.key);
        let mut okm = [0u8; KEY_SIZE];
        hk.expand(MAC_KEY_INFO, &mut okm)
            .map_err(|e| SeedsaverError::Encryption(format!("HKDF expand failed: {}", e)))?;
        Ok(DerivedKey { key: okm })
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a password
///
/// Cannot fail: PBKDF2 accepts any password and salt length.
pub fn derive_key(password: &[u8], salt: &Salt) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt.as_bytes(), ITERATIONS, &mut key);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn salt(byte: u8) -> Salt {
        Salt(vec![byte; SALT_SIZE])
    }

    fn differing_bits(a: &[u8; KEY_SIZE], b: &[u8; KEY_SIZE]) -> u32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
    }

    #[test]
    fn test_known_vector() {
        // PBKDF2-HMAC-SHA256("password", "salt", 100000, 32)
        let key = derive_key(b"password", &Salt(b"salt".to_vec()));
        assert_eq!(
            hex::encode(key.as_bytes()),
            "0394a2ede332c9a13eb82e9b24631604c31df978b4e2f0fbd2c549944f9d79a5"
        );
    }

    #[test]
    fn test_same_password_same_key() {
        let s = salt(7);
        let key1 = derive_key(b"test_password", &s);
        let key2 = derive_key(b"test_password", &s);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_password_bit_flip_avalanche() {
        let s = salt(7);
        let key1 = derive_key(b"test_password", &s);
        let key2 = derive_key(b"test_passwore", &s);
        // Roughly half of 256 bits should differ; allow a wide statistical band.
        let bits = differing_bits(key1.as_bytes(), key2.as_bytes());
        assert!((64..=192).contains(&bits), "{} bits differ", bits);
    }

    #[test]
    fn test_salt_bit_flip_avalanche() {
        let mut flipped = salt(7);
        flipped.0[0] ^= 0x01;
        let key1 = derive_key(b"test_password", &salt(7));
        let key2 = derive_key(b"test_password", &flipped);
        let bits = differing_bits(key1.as_bytes(), key2.as_bytes());
        assert!((64..=192).contains(&bits), "{} bits differ", bits);
    }

    #[test]
    fn test_generated_salt_is_128_bits() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = Salt::generate(&mut rng).unwrap();
        assert_eq!(s.len(), SALT_SIZE);
        assert_eq!(s.to_hex().len(), 32);
    }

    #[test]
    fn test_generated_salts_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Salt::generate(&mut rng).unwrap();
        let b = Salt::generate(&mut rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_salt_hex_is_lowercase() {
        let s = Salt(vec![0xAB, 0xCD, 0xEF]);
        assert_eq!(s.to_hex(), "abcdef");
    }

    #[test]
    fn test_salt_from_hex_accepts_any_length() {
        let s = Salt::from_hex("00112233445566778899aabbccddeeff0011").unwrap();
        assert_eq!(s.len(), 18);
        let upper = Salt::from_hex("ABCD").unwrap();
        assert_eq!(upper.as_bytes(), &[0xAB, 0xCD]);
    }

    #[test]
    fn test_salt_from_hex_rejects_garbage() {
        assert!(Salt::from_hex("").is_err());
        assert!(Salt::from_hex("abc").is_err());
        assert!(Salt::from_hex("zz").is_err());
    }

    #[test]
    fn test_mac_key_differs_from_cipher_key() {
        let key = DerivedKey::from_bytes([3u8; KEY_SIZE]);
        let mac = key.mac_key().unwrap();
        assert_ne!(key.as_bytes(), mac.as_bytes());
        assert_eq!(mac.as_bytes(), key.mac_key().unwrap().as_bytes());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = DerivedKey::from_bytes([0x41; KEY_SIZE]);
        assert_eq!(format!("{:?}", key), "DerivedKey([REDACTED])");
    }
}
