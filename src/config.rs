//! Configuration constants and types for sealed-text.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Derived key length in bytes (256 bits).
pub const KEY_LENGTH: usize = 32;

/// AES-GCM authentication tag length in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Bytes preceding the ciphertext in an artifact.
pub const HEADER_LENGTH: usize = SALT_LENGTH + NONCE_LENGTH;

/// Smallest artifact an encryption can produce (empty plaintext).
pub const MIN_SEALED_LENGTH: usize = HEADER_LENGTH + TAG_LENGTH;

/// Default PBKDF2-HMAC-SHA256 iteration count.
///
/// Artifacts produced by other tools with the same layout assume this value,
/// so changing it breaks interchange unless both sides are reconfigured.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

/// Lowest PBKDF2 iteration count accepted from configuration.
pub const MIN_PBKDF2_ITERATIONS: u32 = 1_000;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Argon2id parameters for the memory-hard option.
pub mod argon2_params {
    /// Memory cost in KiB (64 MB).
    pub const MEMORY_COST: u32 = 65536;

    /// Time cost (iterations).
    pub const TIME_COST: u32 = 3;

    /// Parallelism factor.
    pub const PARALLELISM: u32 = 4;
}

/// Key derivation function and its cost parameters.
///
/// Artifacts do not record the KDF, so both ends must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum KdfParams {
    /// PBKDF2 with HMAC-SHA256.
    Pbkdf2Sha256 { iterations: u32 },
    /// Argon2id (memory-hard).
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        KdfParams::Pbkdf2Sha256 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// PBKDF2-HMAC-SHA256 with a custom iteration count.
    pub fn pbkdf2(iterations: u32) -> Self {
        KdfParams::Pbkdf2Sha256 { iterations }
    }

    /// Argon2id with the default cost parameters.
    pub fn argon2id() -> Self {
        KdfParams::Argon2id {
            memory_kib: argon2_params::MEMORY_COST,
            iterations: argon2_params::TIME_COST,
            parallelism: argon2_params::PARALLELISM,
        }
    }

    /// Short algorithm name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            KdfParams::Pbkdf2Sha256 { .. } => "pbkdf2-sha256",
            KdfParams::Argon2id { .. } => "argon2id",
        }
    }

    /// Validate the cost parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            KdfParams::Pbkdf2Sha256 { iterations } => {
                if iterations < MIN_PBKDF2_ITERATIONS {
                    return Err(Error::Config(format!(
                        "PBKDF2 iterations must be at least {}",
                        MIN_PBKDF2_ITERATIONS
                    )));
                }
            }
            KdfParams::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                argon2::Params::new(memory_kib, iterations, parallelism, Some(KEY_LENGTH))
                    .map_err(|e| Error::Config(format!("Argon2id parameters rejected: {}", e)))?;
            }
        }
        Ok(())
    }
}

/// Settings for the command-line tool, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Key derivation settings.
    pub kdf: KdfParams,

    /// Persist the last input text (never the passphrase).
    pub remember_last_input: bool,

    /// Override for the input store location.
    pub store_path: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            remember_last_input: false,
            store_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ToolConfig {
    /// Load a configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: ToolConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.kdf.validate()?;
        if self.log_level.trim().is_empty() {
            return Err(Error::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    /// Where the input store lives.
    ///
    /// `$XDG_STATE_HOME/sealed-text/last-input.json`, falling back to
    /// `$HOME/.local/state/...`. `None` when neither is set.
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.store_path {
            return Some(path.clone());
        }
        let base = std::env::var_os("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/state"))
            })?;
        Some(base.join("sealed-text").join("last-input.json"))
    }
}
