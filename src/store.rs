//! Persistence for the last typed input string.
//!
//! Only the input text is ever stored: the plaintext a user typed for
//! encryption, or the artifact they pasted for decryption. The trait has no
//! way to receive a passphrase or key.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage for the most recent input text.
pub trait InputStore {
    /// Remember `input`, replacing any previous value.
    fn save_last_input(&mut self, input: &str) -> Result<()>;

    /// The remembered input, if any.
    fn load_last_input(&self) -> Result<Option<String>>;

    /// Forget the remembered input.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory store, useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryInputStore {
    last_input: Option<String>,
}

impl MemoryInputStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputStore for MemoryInputStore {
    fn save_last_input(&mut self, input: &str) -> Result<()> {
        self.last_input = Some(input.to_string());
        Ok(())
    }

    fn load_last_input(&self) -> Result<Option<String>> {
        Ok(self.last_input.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.last_input = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredInput {
    last_input: String,
}

/// JSON file store.
///
/// Writes go to an owner-only (0600 on Unix) temporary file in the same
/// directory, which is then renamed over the target. A crash mid-write
/// leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileInputStore {
    path: PathBuf,
}

impl FileInputStore {
    /// Store at `path`. The file and its parent directory are created on
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputStore for FileInputStore {
    fn save_last_input(&mut self, input: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let doc = StoredInput {
            last_input: input.to_string(),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(&doc)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn load_last_input(&self) -> Result<Option<String>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let doc: StoredInput = serde_json::from_slice(&data)?;
        Ok(Some(doc.last_input))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
