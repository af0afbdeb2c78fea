//! Artifact layout and its portable text encoding.
//!
//! ```text
//! bytes[0..16]   salt
//! bytes[16..28]  nonce
//! bytes[28..]    ciphertext || tag (16 bytes)
//! ```
//!
//! The text form is standard base64 (`+`, `/`, `=` padding, no line wraps).

use crate::config::{HEADER_LENGTH, NONCE_LENGTH, SALT_LENGTH, TAG_LENGTH};
use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A decoded artifact: everything needed to decrypt except the passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    salt: [u8; SALT_LENGTH],
    nonce: [u8; NONCE_LENGTH],
    ciphertext: Vec<u8>,
}

impl Artifact {
    /// Assemble an artifact from its parts.
    pub fn new(salt: [u8; SALT_LENGTH], nonce: [u8; NONCE_LENGTH], ciphertext: Vec<u8>) -> Self {
        Self {
            salt,
            nonce,
            ciphertext,
        }
    }

    pub fn salt(&self) -> &[u8; SALT_LENGTH] {
        &self.salt
    }

    pub fn nonce(&self) -> &[u8; NONCE_LENGTH] {
        &self.nonce
    }

    /// Ciphertext including the trailing tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Plaintext length implied by the layout, if the tag fits.
    pub fn plaintext_len(&self) -> Option<usize> {
        self.ciphertext.len().checked_sub(TAG_LENGTH)
    }

    /// Total size of the binary layout.
    pub fn size(&self) -> usize {
        HEADER_LENGTH + self.ciphertext.len()
    }

    /// Serialize to `salt || nonce || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Parse the binary layout. Needs at least the 28-byte header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LENGTH {
            return Err(Error::Format(format!(
                "artifact is {} bytes, need at least {}",
                data.len(),
                HEADER_LENGTH
            )));
        }

        let (salt_bytes, rest) = data.split_at(SALT_LENGTH);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LENGTH);

        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(salt_bytes);
        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(nonce_bytes);

        Ok(Self {
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode as base64 text.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode base64 text. Surrounding whitespace is ignored.
    pub fn decode(text: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| Error::Format(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}
