//! Tests for remembering the last input without leaking secrets.

use sealed_text::{
    CipherSession, FileInputStore, InputStore, KdfParams, MemoryInputStore, Result, Sealer,
};
use std::fs;
use tempfile::TempDir;

/// Records every value handed to the store.
#[derive(Default)]
struct RecordingStore {
    saved: Vec<String>,
}

impl InputStore for RecordingStore {
    fn save_last_input(&mut self, input: &str) -> Result<()> {
        self.saved.push(input.to_string());
        Ok(())
    }

    fn load_last_input(&self) -> Result<Option<String>> {
        Ok(self.saved.last().cloned())
    }

    fn clear(&mut self) -> Result<()> {
        self.saved.clear();
        Ok(())
    }
}

/// Fails every write.
struct BrokenStore;

impl InputStore for BrokenStore {
    fn save_last_input(&mut self, _input: &str) -> Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn load_last_input(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

fn sealer() -> Sealer {
    Sealer::new(KdfParams::pbkdf2(1_000)).expect("valid params")
}

#[test]
fn test_passphrase_never_reaches_store() {
    let passphrase = "very-secret-passphrase";
    let mut session = CipherSession::with_store(sealer(), RecordingStore::default());

    let artifact = session.encrypt("plain input", passphrase).unwrap();
    session.decrypt(&artifact, passphrase).unwrap();
    let _ = session.decrypt(&artifact, "another-secret");

    let saved = &session.store().unwrap().saved;
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[0], "plain input");
    assert_eq!(saved[1], artifact);
    for value in saved {
        assert!(!value.contains(passphrase));
        assert!(!value.contains("another-secret"));
    }
}

#[test]
fn test_file_store_persists_across_instances() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("state").join("last-input.json");

    let mut store = FileInputStore::new(&path);
    assert_eq!(store.load_last_input().unwrap(), None);
    store.save_last_input("draft text").unwrap();

    let reopened = FileInputStore::new(&path);
    assert_eq!(
        reopened.load_last_input().unwrap().as_deref(),
        Some("draft text")
    );
}

#[test]
fn test_file_store_never_contains_passphrase() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("last-input.json");
    let passphrase = "hunter2-but-longer";

    let mut session = CipherSession::with_store(sealer(), FileInputStore::new(&path));
    session.encrypt("hello world", passphrase).unwrap();

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("hello world"));
    assert!(!on_disk.contains(passphrase));
}

#[test]
fn test_file_store_clear() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("last-input.json");

    let mut store = FileInputStore::new(&path);
    store.save_last_input("temporary").unwrap();
    store.clear().unwrap();
    store.clear().unwrap();

    assert!(!path.exists());
    assert_eq!(store.load_last_input().unwrap(), None);
}

#[test]
fn test_file_store_replaces_document_without_leftovers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("last-input.json");

    let mut store = FileInputStore::new(&path);
    store.save_last_input("first").unwrap();
    store.save_last_input("second").unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("last-input.json")]);
    assert_eq!(store.load_last_input().unwrap().as_deref(), Some("second"));
}

#[cfg(unix)]
#[test]
fn test_file_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("last-input.json");
    fs::write(&path, br#"{"last_input": "old"}"#).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let mut store = FileInputStore::new(&path);
    store.save_last_input("secret plaintext").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_corrupt_store_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("last-input.json");
    fs::write(&path, b"{ not json").unwrap();

    let store = FileInputStore::new(&path);
    assert!(store.load_last_input().is_err());
}

#[test]
fn test_store_failure_does_not_fail_encryption() {
    let mut session = CipherSession::with_store(sealer(), BrokenStore);

    let artifact = session.encrypt("still works", "password").unwrap();
    assert_eq!(session.decrypt(&artifact, "password").unwrap(), "still works");
}

#[test]
fn test_memory_store_through_session() {
    let mut session = CipherSession::with_store(sealer(), MemoryInputStore::new());
    session.encrypt("first", "password").unwrap();
    session.encrypt("second", "password").unwrap();

    assert_eq!(session.last_input().unwrap().as_deref(), Some("second"));
}
