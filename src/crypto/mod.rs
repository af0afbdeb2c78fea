//! Cryptographic primitives for sealed-text.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 (default) or Argon2id password-based key derivation
//! - AES-256-GCM authenticated encryption with single-use nonces

mod cipher;
mod kdf;

pub use cipher::{CipherEngine, Nonce, Sealed};
pub use kdf::{generate_salt, DerivedKey, KeyDeriver};
