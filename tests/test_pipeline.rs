#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cascade_vault::header::header_length;
    use cascade_vault::pipeline::{DecryptionParams, Decryptor, EncryptionParams, Encryptor};
    use cascade_vault::types::VaultError;

    fn deterministic_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut state = seed ^ 0x9E3779B97F4A7C15;
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            out.extend_from_slice(&state.to_le_bytes());
        }
        out.truncate(len);
        out
    }

    fn encrypt(params: EncryptionParams<'_>, plaintext: &[u8]) -> Vec<u8> {
        let sink = Cursor::new(Vec::new());
        let mut enc = Encryptor::new(params, sink).unwrap();
        enc.write(plaintext).unwrap();
        enc.close().unwrap().into_inner()
    }

    fn decrypt_all(
        password: &str,
        keyfiles: Vec<&mut dyn std::io::Read>,
        container: &[u8],
    ) -> Result<(Vec<u8>, bool, bool), VaultError> {
        let params = DecryptionParams {
            password: password.to_string(),
            keyfiles,
        };
        let result = Decryptor::new(params, Cursor::new(container.to_vec()))?;
        let mut dec = result.decryptor;
        let mut out = Vec::new();
        let mut saw_recoverable = false;
        loop {
            let mut chunk = [0u8; 4096];
            let (n, status) = dec.read(&mut chunk)?;
            if status.is_some() {
                saw_recoverable = true;
            }
            if n == 0 {
                break;
            }
            out.extend_from_slice(&chunk[..n]);
        }
        Ok((out, result.header_recovered, saw_recoverable))
    }

    fn base_params(password: &str) -> EncryptionParams<'static> {
        EncryptionParams {
            comments: Vec::new(),
            password: password.to_string(),
            keyfiles: Vec::new(),
            reed_solomon: false,
            paranoid: false,
            deniability: false,
            ordered_keyfiles: true,
        }
    }

    #[test]
    fn round_trip_preserves_arbitrary_plaintext() {
        for plaintext in [
            b"".to_vec(),
            b"a".to_vec(),
            deterministic_bytes(1, 500),
            deterministic_bytes(2, 4096),
        ] {
            for paranoid in [false, true] {
                for reed_solomon in [false, true] {
                    let params = EncryptionParams {
                        paranoid,
                        reed_solomon,
                        ..base_params("correct horse battery staple")
                    };
                    let container = encrypt(params, &plaintext);
                    let (out, recovered, rs_flagged) =
                        decrypt_all("correct horse battery staple", Vec::new(), &container).unwrap();
                    assert_eq!(out, plaintext);
                    assert!(!recovered);
                    assert!(!rs_flagged);
                }
            }
        }
    }

    #[test]
    fn scenario_empty_plaintext_yields_exactly_the_bare_header_length() {
        let params = base_params("password123");
        let container = encrypt(params, b"");
        assert_eq!(container.len(), header_length(0));
        assert_eq!(container.len(), 789);

        let (out, recovered, rs_flagged) =
            decrypt_all("password123", Vec::new(), &container).unwrap();
        assert!(out.is_empty());
        assert!(!recovered);
        assert!(!rs_flagged);
    }

    #[test]
    fn scenario_paranoid_rs_body_corrects_a_single_flipped_byte() {
        let plaintext = deterministic_bytes(0, 1000);
        let params = EncryptionParams {
            paranoid: true,
            reed_solomon: true,
            ..base_params("password123")
        };
        let mut container = encrypt(params, &plaintext);

        let flip_at = header_length(0) + 5;
        container[flip_at] ^= 0xFF;

        let (out, _recovered, rs_flagged) =
            decrypt_all("password123", Vec::new(), &container).unwrap();
        assert_eq!(out, plaintext);
        assert!(rs_flagged);
    }

    #[test]
    fn scenario_deniability_masks_the_header_and_rejects_the_wrong_password() {
        let params = EncryptionParams {
            deniability: true,
            ..base_params("pw")
        };
        let container = encrypt(params, b"hidden");

        // First 40 bytes are the unmasked salt||nonce prefix; the version
        // field that follows should not read as plaintext "v1.99" under the
        // mask.
        assert_eq!(container.len(), 40 + header_length(0) + "hidden".len());
        assert_ne!(&container[40..45], b"v1.99");

        let err = decrypt_all("", Vec::new(), &container).unwrap_err();
        assert!(matches!(
            err,
            VaultError::Header(cascade_vault::header::HeaderError::Corrupted)
        ));

        let (out, recovered, rs_flagged) = decrypt_all("pw", Vec::new(), &container).unwrap();
        assert_eq!(out, b"hidden");
        assert!(!recovered);
        assert!(!rs_flagged);
    }

    #[test]
    fn scenario_two_keyfiles_round_trip_ordered_and_unordered() {
        for ordered in [true, false] {
            let mut kf_a: Cursor<&[u8]> = Cursor::new(b"a");
            let mut kf_b: Cursor<&[u8]> = Cursor::new(b"b");
            let params = EncryptionParams {
                keyfiles: vec![&mut kf_a, &mut kf_b],
                ordered_keyfiles: ordered,
                ..base_params("pw")
            };
            let container = encrypt(params, b"payload");

            let mut kf_a2: Cursor<&[u8]> = Cursor::new(b"a");
            let mut kf_b2: Cursor<&[u8]> = Cursor::new(b"b");
            let (out, recovered, rs_flagged) =
                decrypt_all("pw", vec![&mut kf_a2, &mut kf_b2], &container).unwrap();
            assert_eq!(out, b"payload");
            assert!(!recovered);
            assert!(!rs_flagged);
        }
    }

    #[test]
    fn scenario_duplicate_keyfiles_still_round_trip() {
        let mut kf_a: Cursor<&[u8]> = Cursor::new(b"x");
        let mut kf_b: Cursor<&[u8]> = Cursor::new(b"x");
        let params = EncryptionParams {
            keyfiles: vec![&mut kf_a, &mut kf_b],
            ordered_keyfiles: false,
            ..base_params("pw")
        };
        let container = encrypt(params, b"payload");

        let mut kf_a2: Cursor<&[u8]> = Cursor::new(b"x");
        let mut kf_b2: Cursor<&[u8]> = Cursor::new(b"x");
        let (out, ..) = decrypt_all("pw", vec![&mut kf_a2, &mut kf_b2], &container).unwrap();
        assert_eq!(out, b"payload");
    }

    #[test]
    fn scenario_128_byte_plaintext_with_rs_on_encodes_to_exactly_272_body_bytes() {
        let params = EncryptionParams {
            reed_solomon: true,
            ..base_params("password123")
        };
        let plaintext = vec![0x11u8; 128];
        let container = encrypt(params, &plaintext);
        assert_eq!(container.len() - header_length(0), 272);

        let (out, ..) = decrypt_all("password123", Vec::new(), &container).unwrap();
        assert_eq!(out, plaintext);
    }

    #[test]
    fn wrong_password_fails_the_mac_check_not_the_header_parse() {
        let params = base_params("password123");
        let container = encrypt(params, b"secret stuff");

        let result = decrypt_all("not the password", Vec::new(), &container);
        assert!(matches!(result, Err(VaultError::TagMismatch)));
    }
}
