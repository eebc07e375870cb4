use std::fmt;

use chacha20::XChaCha20;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serpent::Serpent;

use crate::constants::RESET_NONCE_AT;
use crate::keys::{Keys, KeysError};

type SerpentCtr = Ctr128BE<Serpent>;

#[derive(Debug)]
pub enum CipherError {
    Keys(KeysError),
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::Keys(e) => write!(f, "cipher rekey failed: {}", e),
        }
    }
}

impl std::error::Error for CipherError {}

impl From<KeysError> for CipherError {
    fn from(e: KeysError) -> Self {
        CipherError::Keys(e)
    }
}

/// The primary ChaCha20 stream cipher, cascaded with Serpent-CTR when
/// `paranoid` is set. Owns the `Keys` it was built from, since its rekey
/// schedule draws fresh material from `keys.hkdf`, and the pipeline reads
/// other `Keys` fields (salt, nonce, ...) straight through this struct when
/// assembling the header.
pub struct EncryptionCipher {
    pub keys: Keys,
    paranoid: bool,
    chacha: XChaCha20,
    serpent: Option<SerpentCtr>,
    counter: u64,
}

impl EncryptionCipher {
    pub fn new(keys: Keys, paranoid: bool) -> Self {
        let chacha = XChaCha20::new_from_slices(&keys.key, &keys.nonce)
            .expect("fixed-size key/nonce are always valid");
        let serpent = if paranoid {
            Some(
                SerpentCtr::new_from_slices(&keys.serpent_key, &keys.serpent_iv)
                    .expect("fixed-size key/iv are always valid"),
            )
        } else {
            None
        };
        Self {
            keys,
            paranoid,
            chacha,
            serpent,
            counter: 0,
        }
    }

    /// XORs the cascade keystream over `buf` in place, rekeying at every
    /// `RESET_NONCE_AT`-byte boundary so no single keystream call spans one.
    pub fn encode(&mut self, buf: &mut [u8]) -> Result<(), CipherError> {
        let mut i = 0usize;
        while i < buf.len() {
            let remaining_until_rekey = (RESET_NONCE_AT - self.counter) as usize;
            let j = std::cmp::min(buf.len() - i, remaining_until_rekey);
            self.chacha.apply_keystream(&mut buf[i..i + j]);
            if let Some(serpent) = self.serpent.as_mut() {
                serpent.apply_keystream(&mut buf[i..i + j]);
            }
            self.update_counter(j as u64)?;
            i += j;
        }
        Ok(())
    }

    fn update_counter(&mut self, length: u64) -> Result<(), CipherError> {
        self.counter += length;
        if self.counter < RESET_NONCE_AT {
            return Ok(());
        }

        // Fresh ChaCha20 nonce bytes are drawn from the HKDF stream (so the
        // Serpent rekey below draws from the correct offset) but then
        // discarded: the cipher is rebuilt with the original nonce. This
        // mirrors the reference implementation exactly; see DESIGN.md.
        let _discarded_nonce = self.keys.hkdf.next(self.keys.nonce.len())?;
        self.chacha = XChaCha20::new_from_slices(&self.keys.key, &self.keys.nonce)
            .expect("fixed-size key/nonce are always valid");

        if self.paranoid {
            let fresh_iv = self.keys.hkdf.next(self.keys.serpent_iv.len())?;
            self.serpent = Some(
                SerpentCtr::new_from_slices(&self.keys.serpent_key, &fresh_iv)
                    .expect("fixed-size key/iv are always valid"),
            );
        }

        self.counter = 0;
        Ok(())
    }
}
