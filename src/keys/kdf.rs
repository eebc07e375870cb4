use std::io::Read;

use argon2::{Algorithm, Argon2, Params, Version};
use hkdf::Hkdf;
use sha3::{Digest, Sha3_256};

use crate::constants::{argon2_params, HKDF_SALT_LEN, KEY_LEN, MAC_TAG_LEN, NONCE_LEN, SALT_LEN, SERPENT_IV_LEN};
use crate::keys::types::{Keys, KeysError};
use crate::utils::xor;

/// A stateful view over an HKDF-SHA3-256 expand sequence. Each call to
/// `next` hands back the next `n` never-repeated bytes of the underlying
/// deterministic HKDF-expand output; the reader just tracks how many bytes
/// have been handed out so far and re-derives the prefix each time.
pub struct HkdfReader {
    hk: Hkdf<Sha3_256>,
    pos: usize,
}

impl HkdfReader {
    fn new(salt: &[u8], ikm: &[u8]) -> Self {
        Self {
            hk: Hkdf::<Sha3_256>::new(Some(salt), ikm),
            pos: 0,
        }
    }

    pub fn next(&mut self, n: usize) -> Result<Vec<u8>, KeysError> {
        let total = self.pos + n;
        let mut buf = vec![0u8; total];
        self.hk
            .expand(&[], &mut buf)
            .map_err(|_| KeysError::HkdfExhausted)?;
        let out = buf[self.pos..total].to_vec();
        self.pos = total;
        Ok(out)
    }
}

const KEYFILE_CHUNK: usize = 1 << 20;

fn digest_keyfile(reader: &mut dyn Read, digest: &mut Sha3_256) -> Result<(), KeysError> {
    let mut buf = vec![0u8; KEYFILE_CHUNK];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        digest.update(&buf[..n]);
    }
}

fn keyfile_key(
    ordered: bool,
    keyfiles: &mut [&mut dyn Read],
) -> Result<([u8; KEY_LEN], bool), KeysError> {
    if keyfiles.is_empty() {
        return Ok(([0u8; KEY_LEN], false));
    }

    let mut hashes: Vec<[u8; KEY_LEN]> = Vec::with_capacity(keyfiles.len());
    if ordered {
        let mut digest = Sha3_256::new();
        for kf in keyfiles.iter_mut() {
            digest_keyfile(*kf, &mut digest)?;
        }
        let mut out = [0u8; KEY_LEN];
        out.copy_from_slice(&digest.finalize());
        return Ok((out, false));
    }

    for kf in keyfiles.iter_mut() {
        let mut digest = Sha3_256::new();
        digest_keyfile(*kf, &mut digest)?;
        let mut h = [0u8; KEY_LEN];
        h.copy_from_slice(&digest.finalize());
        hashes.push(h);
    }

    let mut key = hashes[0];
    for h in &hashes[1..] {
        xor(&mut key, h);
    }

    let mut duplicate = false;
    for i in 0..hashes.len() {
        for h2 in &hashes[i + 1..] {
            if hashes[i] == *h2 {
                duplicate = true;
            }
        }
    }

    Ok((key, duplicate))
}

fn password_key(password: &str, salt: &[u8], paranoid: bool) -> [u8; KEY_LEN] {
    let (time, parallelism) = if paranoid {
        (argon2_params::TIME_PARANOID, argon2_params::PARALLELISM_PARANOID)
    } else {
        (argon2_params::TIME_NORMAL, argon2_params::PARALLELISM_NORMAL)
    };
    let params = Params::new(argon2_params::MEMORY_KIB, time, parallelism, Some(KEY_LEN))
        .expect("static Argon2id parameters are always valid");
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let mut out = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .expect("Argon2id derivation over fixed-size buffers cannot fail");
    out
}

impl Keys {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        password: &str,
        keyfiles: &mut [&mut dyn Read],
        paranoid: bool,
        ordered_keyfiles: bool,
        salt: [u8; SALT_LEN],
        hkdf_salt: [u8; HKDF_SALT_LEN],
        serpent_iv: [u8; SERPENT_IV_LEN],
        nonce: [u8; NONCE_LEN],
    ) -> Result<(Keys, bool), KeysError> {
        let (keyfile_key, duplicate) = keyfile_key(ordered_keyfiles, keyfiles)?;
        let pw_key = password_key(password, &salt, paranoid);

        let mut key = keyfile_key;
        xor(&mut key, &pw_key);

        let mut key_ref = [0u8; MAC_TAG_LEN];
        key_ref.copy_from_slice(&sha3::Sha3_512::digest(key));

        let mut keyfile_key_ref = [0u8; KEY_LEN];
        keyfile_key_ref.copy_from_slice(&Sha3_256::digest(keyfile_key));

        let mut hkdf = HkdfReader::new(&hkdf_salt, &key);
        let mac_key: [u8; KEY_LEN] = hkdf.next(KEY_LEN)?.try_into().unwrap();
        let serpent_key: [u8; KEY_LEN] = hkdf.next(KEY_LEN)?.try_into().unwrap();

        let keys = Keys {
            key,
            keyfile_key,
            key_ref,
            keyfile_key_ref,
            salt,
            hkdf_salt,
            nonce,
            serpent_key,
            serpent_iv,
            mac_key,
            uses_keyfiles: !keyfiles.is_empty(),
            ordered_keyfiles,
            hkdf,
        };

        Ok((keys, duplicate))
    }
}
