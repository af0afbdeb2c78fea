//! Password-based text encryption into portable artifacts.
//!
//! A passphrase is stretched into a 256-bit key, the text is sealed with
//! AES-256-GCM, and the result is packed into one base64 string that carries
//! everything except the passphrase.
//!
//! # Features
//!
//! - **PBKDF2-HMAC-SHA256 (100,000 iterations)** by default, Argon2id optional
//! - **AES-256-GCM**: fresh 96-bit nonce per encryption, 128-bit tag
//! - **Portable artifacts**: `base64(salt || nonce || ciphertext || tag)`
//! - **No oracle**: malformed input and a wrong passphrase fail identically
//!
//! # Architecture
//!
//! ```text
//! passphrase + salt → KDF → key
//! key + nonce + text → AES-256-GCM → ciphertext || tag
//! salt || nonce || ciphertext || tag → base64
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sealed_text::{decrypt_artifact, encrypt_artifact};
//!
//! let artifact = encrypt_artifact("hello world", "correct horse").unwrap();
//! let plaintext = decrypt_artifact(&artifact, "correct horse").unwrap();
//! assert_eq!(plaintext, "hello world");
//!
//! assert!(decrypt_artifact(&artifact, "wrong password").is_err());
//! ```

pub mod artifact;
pub mod config;
pub mod crypto;
pub mod error;
pub mod seal;
pub mod session;
pub mod store;

pub use artifact::Artifact;
pub use config::{KdfParams, ToolConfig};
pub use error::{Error, FailureCause, Result};
pub use seal::{decrypt_artifact, encrypt_artifact, Sealer};
pub use session::CipherSession;
pub use store::{FileInputStore, InputStore, MemoryInputStore};
