use std::io;

use crate::cipher::{CipherError, MacError};
use crate::header::HeaderError;
use crate::keys::KeysError;
use crate::rs::RsError;

/// Unified crate error. Every module-level error converts into this one via
/// `From`, so pipeline code can use `?` across module boundaries.
#[derive(Debug)]
pub enum VaultError {
    Io(io::Error),
    Keys(KeysError),
    Cipher(CipherError),
    Mac(MacError),
    Rs(RsError),
    Header(HeaderError),
    /// MAC tag did not match the recomputed tag. Distinct from `Rs`
    /// corruption: this indicates a wrong password or tampering, not a
    /// bounded number of bit flips the codec can reason about locally.
    TagMismatch,
    Validation(String),
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultError::Io(e) => write!(f, "I/O error: {}", e),
            VaultError::Keys(e) => write!(f, "key derivation error: {}", e),
            VaultError::Cipher(e) => write!(f, "cipher error: {}", e),
            VaultError::Mac(e) => write!(f, "MAC error: {}", e),
            VaultError::Rs(e) => write!(f, "Reed-Solomon error: {}", e),
            VaultError::Header(e) => write!(f, "header error: {}", e),
            VaultError::TagMismatch => write!(f, "authentication tag mismatch"),
            VaultError::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<io::Error> for VaultError {
    fn from(e: io::Error) -> Self {
        VaultError::Io(e)
    }
}

impl From<KeysError> for VaultError {
    fn from(e: KeysError) -> Self {
        VaultError::Keys(e)
    }
}

impl From<CipherError> for VaultError {
    fn from(e: CipherError) -> Self {
        VaultError::Cipher(e)
    }
}

impl From<MacError> for VaultError {
    fn from(e: MacError) -> Self {
        VaultError::Mac(e)
    }
}

impl From<RsError> for VaultError {
    fn from(e: RsError) -> Self {
        VaultError::Rs(e)
    }
}

impl From<HeaderError> for VaultError {
    fn from(e: HeaderError) -> Self {
        VaultError::Header(e)
    }
}
