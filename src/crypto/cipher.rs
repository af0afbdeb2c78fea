//! AES-256-GCM authenticated encryption.

use crate::config::{NONCE_LENGTH, TAG_LENGTH};
use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key};
use rand::{CryptoRng, RngCore};

/// A fresh, single-use nonce for sealing.
///
/// Deliberately neither `Clone` nor `Copy`, and only obtainable from a
/// CSPRNG. [`CipherEngine::seal`] takes it by value, so one nonce cannot
/// seal twice:
///
/// ```compile_fail
/// use sealed_text::crypto::{CipherEngine, DerivedKey, Nonce};
///
/// let engine = CipherEngine::new(&DerivedKey::from_bytes([7u8; 32]));
/// let nonce = Nonce::generate(&mut rand::rngs::OsRng);
/// engine.seal(nonce, b"first", b"").unwrap();
/// engine.seal(nonce, b"second", b"").unwrap();
/// ```
#[derive(Debug)]
pub struct Nonce([u8; NONCE_LENGTH]);

impl Nonce {
    /// Draw a new random nonce.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_LENGTH];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// The raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LENGTH] {
        &self.0
    }
}

/// Output of [`CipherEngine::seal`]: the nonce that was used and
/// `ciphertext || tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LENGTH],
    pub ciphertext: Vec<u8>,
}

/// AES-256-GCM cipher bound to one derived key.
///
/// The expanded AES key schedule holds the raw key in its first round keys.
/// It is zeroized when the engine is dropped (`aes` is built with its
/// `zeroize` feature), so no key copy outlives a `seal` or `open` call.
pub struct CipherEngine {
    cipher: Aes256Gcm,
}

impl CipherEngine {
    /// Create a cipher from a derived key.
    pub fn new(key: &DerivedKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher }
    }

    /// Encrypt `plaintext`, binding `aad` into the tag.
    ///
    /// Returns: ciphertext || tag (16 bytes), alongside the consumed nonce.
    pub fn seal(&self, nonce: Nonce, plaintext: &[u8], aad: &[u8]) -> Result<Sealed> {
        let ciphertext = self
            .cipher
            .encrypt(
                aes_gcm::Nonce::from_slice(nonce.as_bytes()),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|e| Error::Encryption(e.to_string()))?;

        Ok(Sealed {
            nonce: nonce.0,
            ciphertext,
        })
    }

    /// Decrypt `ciphertext || tag` produced by [`seal`](Self::seal).
    ///
    /// Any failure is reported as [`Error::Authentication`] with no detail.
    pub fn open(
        &self,
        nonce: &[u8; NONCE_LENGTH],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        if ciphertext.len() < TAG_LENGTH {
            return Err(Error::Authentication);
        }

        self.cipher
            .decrypt(
                aes_gcm::Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| Error::Authentication)
    }
}
