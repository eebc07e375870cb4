use std::fmt;

use crate::constants::{HKDF_SALT_LEN, KEY_LEN, MAC_TAG_LEN, NONCE_LEN, SALT_LEN, SERPENT_IV_LEN};

#[derive(Debug)]
pub enum HeaderError {
    /// A header field failed Reed-Solomon correction. Unlike a body chunk,
    /// a corrupted header field is always fatal: there is no plaintext to
    /// fall back to.
    Corrupted,
    /// The version field decoded cleanly (no RS correction needed at all)
    /// to a recognizable `vN.NN` string, but `N` isn't the one version this
    /// crate implements. Distinct from `Corrupted`: the bytes are trusted,
    /// just unsupported.
    UnsupportedVersion(Vec<u8>),
    Io(std::io::Error),
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::Corrupted => write!(f, "header field damaged beyond correction"),
            HeaderError::UnsupportedVersion(bytes) => {
                write!(f, "unsupported container version: {}", hex::encode(bytes))
            }
            HeaderError::Io(e) => write!(f, "I/O error reading header: {}", e),
        }
    }
}

impl std::error::Error for HeaderError {}

impl From<std::io::Error> for HeaderError {
    fn from(e: std::io::Error) -> Self {
        HeaderError::Io(e)
    }
}

/// The five single-byte header flags, each stored as a `0`/`1` byte so the
/// whole set travels as one Reed-Solomon field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub paranoid: bool,
    pub uses_keyfiles: bool,
    pub ordered_keyfiles: bool,
    pub reed_solomon_body: bool,
    /// Records whether `writtenSinceHeader` was a multiple of 1 MiB at
    /// close time. Informational only; this crate's own decode path never
    /// reads it back.
    pub padded: bool,
}

impl Flags {
    pub fn to_bytes(self) -> [u8; 5] {
        [
            self.paranoid as u8,
            self.uses_keyfiles as u8,
            self.ordered_keyfiles as u8,
            self.reed_solomon_body as u8,
            self.padded as u8,
        ]
    }

    pub fn from_bytes(b: [u8; 5]) -> Self {
        Flags {
            paranoid: b[0] == 1,
            uses_keyfiles: b[1] == 1,
            ordered_keyfiles: b[2] == 1,
            reed_solomon_body: b[3] == 1,
            padded: b[4] == 1,
        }
    }
}

/// The fully decoded (or to-be-encoded) container header.
pub struct Header {
    pub version: String,
    pub comments: Vec<u8>,
    pub flags: Flags,
    pub salt: [u8; SALT_LEN],
    pub hkdf_salt: [u8; HKDF_SALT_LEN],
    pub serpent_iv: [u8; SERPENT_IV_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub key_ref: [u8; MAC_TAG_LEN],
    pub keyfile_key_ref: [u8; KEY_LEN],
    pub mac_tag: [u8; MAC_TAG_LEN],
}
