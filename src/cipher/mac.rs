use std::fmt;

use blake2::digest::Mac as Blake2MacTrait;
use blake2::Blake2bMac512;
use hmac::{Hmac, Mac as HmacMacTrait};
use sha3::Sha3_512;

use crate::constants::{KEY_LEN, MAC_TAG_LEN};

type HmacSha3_512 = Hmac<Sha3_512>;

#[derive(Debug)]
pub enum MacError {
    InvalidKeyLength,
}

impl fmt::Display for MacError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacError::InvalidKeyLength => write!(f, "invalid MAC key length"),
        }
    }
}

impl std::error::Error for MacError {}

/// MAC over the ciphertext (before Reed-Solomon expansion). Paranoid mode
/// uses HMAC-SHA3-512; the default mode uses keyed Blake2b-512. Both yield
/// a 64-byte tag.
pub enum Mac {
    Default(Blake2bMac512),
    Paranoid(HmacSha3_512),
}

impl Mac {
    pub fn new(mac_key: &[u8; KEY_LEN], paranoid: bool) -> Result<Self, MacError> {
        if paranoid {
            let mac = HmacSha3_512::new_from_slice(mac_key).map_err(|_| MacError::InvalidKeyLength)?;
            Ok(Mac::Paranoid(mac))
        } else {
            let mac =
                Blake2bMac512::new_from_slice(mac_key).map_err(|_| MacError::InvalidKeyLength)?;
            Ok(Mac::Default(mac))
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Mac::Default(m) => Blake2MacTrait::update(m, data),
            Mac::Paranoid(m) => HmacMacTrait::update(m, data),
        }
    }

    pub fn finalize(self) -> [u8; MAC_TAG_LEN] {
        let mut out = [0u8; MAC_TAG_LEN];
        match self {
            Mac::Default(m) => out.copy_from_slice(&Blake2MacTrait::finalize(m).into_bytes()),
            Mac::Paranoid(m) => out.copy_from_slice(&HmacMacTrait::finalize(m).into_bytes()),
        }
        out
    }
}
