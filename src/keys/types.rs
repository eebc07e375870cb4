use std::fmt;

use crate::constants::{HKDF_SALT_LEN, KEY_LEN, MAC_TAG_LEN, NONCE_LEN, SALT_LEN, SERPENT_IV_LEN};
use crate::keys::HkdfReader;

#[derive(Debug)]
pub enum KeysError {
    /// Two keyfiles hashed to the same digest. Recoverable: the caller may
    /// choose to proceed anyway (legacy containers predate this check).
    DuplicateKeyfile,
    Io(std::io::Error),
    /// The HKDF reader's underlying expand function ran out of output
    /// (RFC 5869 caps expansion at 255 times the hash length).
    HkdfExhausted,
}

impl fmt::Display for KeysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeysError::DuplicateKeyfile => write!(f, "duplicate keyfiles detected"),
            KeysError::Io(e) => write!(f, "I/O error reading keyfile: {}", e),
            KeysError::HkdfExhausted => write!(f, "HKDF reader exhausted its output capacity"),
        }
    }
}

impl std::error::Error for KeysError {}

impl From<std::io::Error> for KeysError {
    fn from(e: std::io::Error) -> Self {
        KeysError::Io(e)
    }
}

/// The full key schedule for one container. `key` is the single value the
/// cipher layer actually encrypts with; every other field either feeds its
/// derivation or is carried along for the header.
pub struct Keys {
    pub key: [u8; KEY_LEN],
    pub keyfile_key: [u8; KEY_LEN],
    pub key_ref: [u8; MAC_TAG_LEN],
    pub keyfile_key_ref: [u8; KEY_LEN],
    pub salt: [u8; SALT_LEN],
    pub hkdf_salt: [u8; HKDF_SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub serpent_key: [u8; KEY_LEN],
    pub serpent_iv: [u8; SERPENT_IV_LEN],
    pub mac_key: [u8; KEY_LEN],
    pub uses_keyfiles: bool,
    pub ordered_keyfiles: bool,
    pub hkdf: HkdfReader,
}
