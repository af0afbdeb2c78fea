//! A sealer paired with an optional input store.

use crate::error::Result;
use crate::seal::Sealer;
use crate::store::InputStore;
use tracing::warn;

/// Runs encrypt/decrypt requests and remembers the input text when enabled.
///
/// The store only ever sees the input text. A store failure is logged and
/// does not fail the cryptographic operation.
#[derive(Debug)]
pub struct CipherSession<S> {
    sealer: Sealer,
    store: Option<S>,
}

impl<S: InputStore> CipherSession<S> {
    /// A session that never persists anything.
    pub fn new(sealer: Sealer) -> Self {
        Self {
            sealer,
            store: None,
        }
    }

    /// A session that records each input in `store`.
    pub fn with_store(sealer: Sealer, store: S) -> Self {
        Self {
            sealer,
            store: Some(store),
        }
    }

    pub fn sealer(&self) -> &Sealer {
        &self.sealer
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn encrypt(&mut self, plaintext: &str, passphrase: &str) -> Result<String> {
        self.remember(plaintext);
        self.sealer.encrypt(plaintext, passphrase)
    }

    pub fn decrypt(&mut self, text: &str, passphrase: &str) -> Result<String> {
        self.remember(text);
        self.sealer.decrypt(text, passphrase)
    }

    /// The remembered input, if a store is attached and holds one.
    pub fn last_input(&self) -> Result<Option<String>> {
        match &self.store {
            Some(store) => store.load_last_input(),
            None => Ok(None),
        }
    }

    fn remember(&mut self, input: &str) {
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.save_last_input(input) {
                warn!(error = %e, "could not remember last input");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KdfParams;
    use crate::store::MemoryInputStore;

    fn session() -> CipherSession<MemoryInputStore> {
        CipherSession::with_store(
            Sealer::new(KdfParams::pbkdf2(1_000)).unwrap(),
            MemoryInputStore::new(),
        )
    }

    #[test]
    fn test_remembers_plaintext_on_encrypt() {
        let mut session = session();
        session.encrypt("remember me", "hunter22").unwrap();

        assert_eq!(session.last_input().unwrap().as_deref(), Some("remember me"));
    }

    #[test]
    fn test_remembers_artifact_on_decrypt() {
        let mut session = session();
        let text = session.encrypt("data", "hunter22").unwrap();
        session.decrypt(&text, "hunter22").unwrap();

        assert_eq!(session.last_input().unwrap(), Some(text));
    }

    #[test]
    fn test_no_store_no_memory() {
        let mut session: CipherSession<MemoryInputStore> =
            CipherSession::new(Sealer::new(KdfParams::pbkdf2(1_000)).unwrap());
        session.encrypt("data", "hunter22").unwrap();

        assert_eq!(session.last_input().unwrap(), None);
        assert!(session.store().is_none());
    }
}
