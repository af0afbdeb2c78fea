//! Error types for sealed-text.

use thiserror::Error;

/// Result type alias for sealed-text operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a decryption was rejected.
///
/// Kept for diagnostics and tests only. Both causes render identically to
/// the user so a caller cannot tell a malformed artifact from a wrong
/// passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The artifact text was not valid base64 or was too short.
    Format,
    /// The authentication tag did not verify.
    Authentication,
    /// The tag verified but the plaintext is not UTF-8 text.
    Encoding,
}

/// Errors that can occur in sealed-text operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller contract violation: missing passphrase, input or bad salt length.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed artifact (bad base64 or undersized layout).
    #[error("Malformed artifact: {0}")]
    Format(String),

    /// Tag verification failed (wrong passphrase or tampered data).
    #[error("Authentication failed")]
    Authentication,

    /// Unified user-facing decryption failure.
    #[error("Decryption failed: invalid password or corrupted data")]
    DecryptionFailed(FailureCause),

    /// Key derivation error.
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error while reading input or the input store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// The internal cause of a decryption failure, if this is one.
    pub fn failure_cause(&self) -> Option<FailureCause> {
        match self {
            Error::DecryptionFailed(cause) => Some(*cause),
            Error::Format(_) => Some(FailureCause::Format),
            Error::Authentication => Some(FailureCause::Authentication),
            _ => None,
        }
    }

    /// Collapse format and authentication errors into `DecryptionFailed`.
    pub(crate) fn into_decryption_failure(self) -> Self {
        match self.failure_cause() {
            Some(cause) => Error::DecryptionFailed(cause),
            None => self,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_failure_hides_cause() {
        let format = Error::DecryptionFailed(FailureCause::Format);
        let auth = Error::DecryptionFailed(FailureCause::Authentication);

        assert_eq!(format.to_string(), auth.to_string());
        assert_eq!(format.failure_cause(), Some(FailureCause::Format));
        assert_eq!(auth.failure_cause(), Some(FailureCause::Authentication));
    }

    #[test]
    fn test_encoding_cause_renders_like_the_others() {
        let encoding = Error::DecryptionFailed(FailureCause::Encoding);
        let auth = Error::DecryptionFailed(FailureCause::Authentication);

        assert_eq!(encoding.to_string(), auth.to_string());
        assert_eq!(
            encoding.into_decryption_failure().failure_cause(),
            Some(FailureCause::Encoding)
        );
    }

    #[test]
    fn test_collapse_keeps_other_errors() {
        let collapsed = Error::Format("too short".into()).into_decryption_failure();
        assert!(matches!(
            collapsed,
            Error::DecryptionFailed(FailureCause::Format)
        ));

        let untouched = Error::InvalidInput("missing".into()).into_decryption_failure();
        assert!(matches!(untouched, Error::InvalidInput(_)));
    }
}
