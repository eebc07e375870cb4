#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cascade_vault::keys::Keys;
    use sha3::{Digest, Sha3_256};

    fn fixed_seeds() -> ([u8; 16], [u8; 32], [u8; 16], [u8; 24]) {
        (
            [1u8; 16],
            [2u8; 32],
            [3u8; 16],
            [4u8; 24],
        )
    }

    #[test]
    fn key_sizes_are_fixed_regardless_of_input() {
        let (salt, hkdf_salt, serpent_iv, nonce) = fixed_seeds();
        let mut no_keyfiles: Vec<&mut dyn std::io::Read> = Vec::new();
        let (keys, _dup) = Keys::new(
            "password123",
            &mut no_keyfiles,
            false,
            false,
            salt,
            hkdf_salt,
            serpent_iv,
            nonce,
        )
        .unwrap();

        assert_eq!(keys.key.len(), 32);
        assert_eq!(keys.mac_key.len(), 32);
        assert_eq!(keys.serpent_key.len(), 32);
        assert_eq!(keys.key_ref.len(), 64);
        assert_eq!(keys.keyfile_key_ref.len(), 32);
    }

    #[test]
    fn construction_is_idempotent() {
        let (salt, hkdf_salt, serpent_iv, nonce) = fixed_seeds();
        let mut kf_a: Cursor<&[u8]> = Cursor::new(b"a keyfile");
        let mut kf_b: Cursor<&[u8]> = Cursor::new(b"a keyfile");
        let mut readers_a: Vec<&mut dyn std::io::Read> = vec![&mut kf_a];
        let mut readers_b: Vec<&mut dyn std::io::Read> = vec![&mut kf_b];

        let (k1, _) = Keys::new(
            "hunter2", &mut readers_a, true, true, salt, hkdf_salt, serpent_iv, nonce,
        )
        .unwrap();
        let (k2, _) = Keys::new(
            "hunter2", &mut readers_b, true, true, salt, hkdf_salt, serpent_iv, nonce,
        )
        .unwrap();

        assert_eq!(k1.key, k2.key);
        assert_eq!(k1.mac_key, k2.mac_key);
        assert_eq!(k1.serpent_key, k2.serpent_key);
        assert_eq!(k1.key_ref, k2.key_ref);
        assert_eq!(k1.keyfile_key_ref, k2.keyfile_key_ref);
    }

    #[test]
    fn ordered_keyfiles_concatenate_then_digest() {
        let (salt, hkdf_salt, serpent_iv, nonce) = fixed_seeds();
        let mut kf_a: Cursor<&[u8]> = Cursor::new(b"a");
        let mut kf_b: Cursor<&[u8]> = Cursor::new(b"b");
        let mut readers: Vec<&mut dyn std::io::Read> = vec![&mut kf_a, &mut kf_b];

        let (keys, dup) = Keys::new(
            "pw", &mut readers, false, true, salt, hkdf_salt, serpent_iv, nonce,
        )
        .unwrap();
        assert!(!dup);

        let expected: [u8; 32] = Sha3_256::digest(b"ab").into();
        assert_eq!(keys.keyfile_key, expected);
    }

    #[test]
    fn unordered_keyfiles_xor_per_file_digests() {
        let (salt, hkdf_salt, serpent_iv, nonce) = fixed_seeds();
        let mut kf_a: Cursor<&[u8]> = Cursor::new(b"a");
        let mut kf_b: Cursor<&[u8]> = Cursor::new(b"b");
        let mut readers: Vec<&mut dyn std::io::Read> = vec![&mut kf_a, &mut kf_b];

        let (keys, dup) = Keys::new(
            "pw", &mut readers, false, false, salt, hkdf_salt, serpent_iv, nonce,
        )
        .unwrap();
        assert!(!dup);

        let ha: [u8; 32] = Sha3_256::digest(b"a").into();
        let hb: [u8; 32] = Sha3_256::digest(b"b").into();
        let mut expected = ha;
        for (e, b) in expected.iter_mut().zip(hb.iter()) {
            *e ^= b;
        }
        assert_eq!(keys.keyfile_key, expected);
    }

    #[test]
    fn duplicate_unordered_keyfiles_signal_without_failing() {
        let (salt, hkdf_salt, serpent_iv, nonce) = fixed_seeds();
        let mut kf_a: Cursor<&[u8]> = Cursor::new(b"x");
        let mut kf_b: Cursor<&[u8]> = Cursor::new(b"x");
        let mut readers: Vec<&mut dyn std::io::Read> = vec![&mut kf_a, &mut kf_b];

        let (_keys, dup) = Keys::new(
            "pw", &mut readers, false, false, salt, hkdf_salt, serpent_iv, nonce,
        )
        .unwrap();
        assert!(dup);
    }

    #[test]
    fn no_keyfiles_yields_zero_keyfile_key() {
        let (salt, hkdf_salt, serpent_iv, nonce) = fixed_seeds();
        let mut no_keyfiles: Vec<&mut dyn std::io::Read> = Vec::new();
        let (keys, _dup) = Keys::new(
            "pw", &mut no_keyfiles, false, false, salt, hkdf_salt, serpent_iv, nonce,
        )
        .unwrap();
        assert_eq!(keys.keyfile_key, [0u8; 32]);
        assert!(!keys.uses_keyfiles);
    }
}
