//! Encrypt and decrypt text into portable artifacts.
//!
//! ```text
//! encrypt: plaintext + passphrase -> salt -> key -> nonce -> seal -> base64
//! decrypt: base64 -> (salt, nonce, ct) -> key -> open -> plaintext
//! ```
//!
//! Every call derives its own key and draws its own salt and nonce; nothing
//! is shared between calls.

use crate::artifact::Artifact;
use crate::config::KdfParams;
use crate::crypto::{generate_salt, CipherEngine, KeyDeriver, Nonce};
use crate::error::{Error, FailureCause, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

/// Associated data bound into every tag. Empty today.
const ARTIFACT_AAD: &[u8] = b"";

/// Encrypt `plaintext` under `passphrase` with the default KDF settings.
///
/// # Example
///
/// ```no_run
/// use sealed_text::{decrypt_artifact, encrypt_artifact};
///
/// let text = encrypt_artifact("hello world", "correct horse").unwrap();
/// assert_eq!(decrypt_artifact(&text, "correct horse").unwrap(), "hello world");
/// ```
pub fn encrypt_artifact(plaintext: &str, passphrase: &str) -> Result<String> {
    Sealer::default().encrypt(plaintext, passphrase)
}

/// Decrypt an artifact produced by [`encrypt_artifact`].
///
/// Malformed text and failed authentication both surface as
/// [`Error::DecryptionFailed`].
pub fn decrypt_artifact(text: &str, passphrase: &str) -> Result<String> {
    Sealer::default().decrypt(text, passphrase)
}

/// Encrypts and decrypts artifacts with a fixed KDF configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sealer {
    deriver: KeyDeriver,
}

impl Sealer {
    /// Create a sealer, rejecting unusable KDF parameters.
    pub fn new(params: KdfParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            deriver: KeyDeriver::new(params),
        })
    }

    /// The KDF parameters in use.
    pub fn kdf(&self) -> &KdfParams {
        self.deriver.params()
    }

    /// Encrypt using the operating system's CSPRNG.
    pub fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String> {
        self.encrypt_with_rng(&mut OsRng, plaintext, passphrase)
    }

    /// Encrypt drawing salt and nonce from `rng`.
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        plaintext: &str,
        passphrase: &str,
    ) -> Result<String> {
        let artifact = self.seal(rng, plaintext.as_bytes(), passphrase)?;
        Ok(artifact.encode())
    }

    /// Produce the binary artifact for `plaintext`.
    pub fn seal<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
        passphrase: &str,
    ) -> Result<Artifact> {
        if passphrase.is_empty() {
            return Err(Error::InvalidInput(
                "Passphrase cannot be empty".to_string(),
            ));
        }

        let salt = generate_salt(rng);
        let key = self.deriver.derive(passphrase.as_bytes(), &salt)?;
        let sealed = CipherEngine::new(&key).seal(Nonce::generate(rng), plaintext, ARTIFACT_AAD)?;
        drop(key);

        let artifact = Artifact::new(salt, sealed.nonce, sealed.ciphertext);
        debug!(
            kdf = self.kdf().name(),
            plaintext_len = plaintext.len(),
            artifact_len = artifact.size(),
            "sealed artifact"
        );
        Ok(artifact)
    }

    /// Decrypt base64 artifact text.
    pub fn decrypt(&self, text: &str, passphrase: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Artifact text cannot be empty".to_string(),
            ));
        }
        if passphrase.is_empty() {
            return Err(Error::InvalidInput(
                "Passphrase cannot be empty".to_string(),
            ));
        }

        self.open_text(text, passphrase).map_err(|e| {
            let e = e.into_decryption_failure();
            if let Some(cause) = e.failure_cause() {
                debug!(?cause, kdf = self.kdf().name(), "artifact rejected");
            }
            e
        })
    }

    /// Decrypt an already-decoded artifact to raw bytes.
    ///
    /// Errors keep their internal cause (`Format` or `Authentication`);
    /// [`decrypt`](Self::decrypt) adds `Encoding` for non-UTF-8 plaintext.
    pub fn open(&self, artifact: &Artifact, passphrase: &str) -> Result<Vec<u8>> {
        let key = self.deriver.derive(passphrase.as_bytes(), artifact.salt())?;
        CipherEngine::new(&key).open(artifact.nonce(), artifact.ciphertext(), ARTIFACT_AAD)
    }

    fn open_text(&self, text: &str, passphrase: &str) -> Result<String> {
        let artifact = Artifact::decode(text)?;
        let plaintext = self.open(&artifact, passphrase)?;
        debug!(plaintext_len = plaintext.len(), "opened artifact");
        String::from_utf8(plaintext).map_err(|_| Error::DecryptionFailed(FailureCause::Encoding))
    }
}
