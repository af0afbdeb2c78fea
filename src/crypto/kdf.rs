//! Password-based key derivation (PBKDF2-HMAC-SHA256 or Argon2id).

use crate::config::{KdfParams, KEY_LENGTH, SALT_LENGTH};
use crate::error::{Error, Result};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

/// A symmetric key derived from a passphrase.
///
/// Zeroized on drop and redacted in `Debug` output.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Borrow the raw key. Use only for an immediate cipher operation.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Draw a fresh random salt.
pub fn generate_salt<R: RngCore + CryptoRng>(rng: &mut R) -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    rng.fill_bytes(&mut salt);
    salt
}

/// Turns a passphrase and salt into a 256-bit key.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDeriver {
    params: KdfParams,
}

impl KeyDeriver {
    /// Create a deriver with the given parameters.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// The parameters in use.
    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Derive a key from `passphrase` and a 16-byte `salt`.
    ///
    /// Deterministic: the same inputs always give the same key. Input
    /// validation happens before any hashing.
    pub fn derive(&self, passphrase: &[u8], salt: &[u8]) -> Result<DerivedKey> {
        if passphrase.is_empty() {
            return Err(Error::InvalidInput(
                "Passphrase cannot be empty".to_string(),
            ));
        }
        if salt.len() != SALT_LENGTH {
            return Err(Error::InvalidInput(format!(
                "Salt must be exactly {} bytes, got {}",
                SALT_LENGTH,
                salt.len()
            )));
        }

        let mut key = [0u8; KEY_LENGTH];
        match self.params {
            KdfParams::Pbkdf2Sha256 { iterations } => {
                if iterations == 0 {
                    return Err(Error::KeyDerivation(
                        "PBKDF2 iteration count must be non-zero".to_string(),
                    ));
                }
                pbkdf2::pbkdf2_hmac::<Sha256>(passphrase, salt, iterations, &mut key);
            }
            KdfParams::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                let params = Params::new(memory_kib, iterations, parallelism, Some(KEY_LENGTH))
                    .map_err(|e| Error::KeyDerivation(e.to_string()))?;
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .hash_password_into(passphrase, salt, &mut key)
                    .map_err(|e| Error::KeyDerivation(e.to_string()))?;
            }
        }

        let derived = DerivedKey::from_bytes(key);
        zeroize::Zeroize::zeroize(&mut key);
        Ok(derived)
    }
}
