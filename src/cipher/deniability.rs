use argon2::{Algorithm, Argon2, Params, Version};
use chacha20::XChaCha20;
use cipher::{KeyIvInit, StreamCipher};
use sha3::{Digest, Sha3_256};

use crate::constants::{argon2_params, DENY_RESET_AT, KEY_LEN, NONCE_LEN, SALT_LEN};

/// Derives the deniability layer's key from the password and a dedicated
/// salt. Always uses the non-paranoid Argon2id cost, independent of whether
/// the container's main cipher is running in paranoid mode.
pub fn deniability_key(password: &str, salt: &[u8; SALT_LEN]) -> [u8; KEY_LEN] {
    let params = Params::new(
        argon2_params::MEMORY_KIB,
        argon2_params::TIME_NORMAL,
        argon2_params::PARALLELISM_NORMAL,
        Some(KEY_LEN),
    )
    .expect("static Argon2id parameters are always valid");
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut out = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .expect("Argon2id derivation over fixed-size buffers cannot fail");
    out
}

/// An outer mask applied to the entire container (header included) so that
/// an observer without the deniability key cannot distinguish the stream
/// from random noise, let alone recover the inner header. Keyed separately
/// from the main cipher and rekeyed on its own, shorter schedule.
pub struct Deniability {
    key: [u8; KEY_LEN],
    live_nonce: [u8; NONCE_LEN],
    chacha: XChaCha20,
    counter: u64,
}

impl Deniability {
    pub fn new(key: [u8; KEY_LEN], nonce: [u8; NONCE_LEN]) -> Self {
        let chacha = XChaCha20::new_from_slices(&key, &nonce)
            .expect("fixed-size key/nonce are always valid");
        Self {
            key,
            live_nonce: nonce,
            chacha,
            counter: 0,
        }
    }

    /// XORs the mask keystream over `buf` in place, rekeying every
    /// `DENY_RESET_AT` bytes.
    pub fn mask(&mut self, buf: &mut [u8]) {
        let mut i = 0usize;
        while i < buf.len() {
            let remaining_until_rekey = (DENY_RESET_AT - self.counter) as usize;
            let j = std::cmp::min(buf.len() - i, remaining_until_rekey);
            self.chacha.apply_keystream(&mut buf[i..i + j]);
            self.update_counter(j as u64);
            i += j;
        }
    }

    fn update_counter(&mut self, length: u64) {
        self.counter += length;
        if self.counter < DENY_RESET_AT {
            return;
        }

        let digest = Sha3_256::digest(self.live_nonce);
        self.live_nonce.copy_from_slice(&digest[..NONCE_LEN]);
        self.chacha = XChaCha20::new_from_slices(&self.key, &self.live_nonce)
            .expect("fixed-size key/nonce are always valid");
        self.counter = 0;
    }
}
