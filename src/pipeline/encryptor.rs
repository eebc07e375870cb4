use std::io::{Read, Seek, SeekFrom, Write};

use rand::RngCore;

use crate::cipher::{deniability_key, Deniability, EncryptionCipher, Mac};
use crate::constants::{
    DENIABILITY_PREFIX_LEN, FORMAT_VERSION, HKDF_SALT_LEN, NONCE_LEN, SALT_LEN, SERPENT_IV_LEN,
};
use crate::header::{encode_header, header_length, Flags, Header};
use crate::keys::Keys;
use crate::rs::RsBodyEncoder;
use crate::types::VaultError;

/// Parameters for [`Encryptor::new`]. Keyfiles are borrowed readers rather
/// than owned, so the caller controls how they're opened (files, in-memory
/// buffers, anything implementing [`Read`]).
pub struct EncryptionParams<'a> {
    pub comments: Vec<u8>,
    pub password: String,
    pub keyfiles: Vec<&'a mut dyn Read>,
    pub reed_solomon: bool,
    pub paranoid: bool,
    pub deniability: bool,
    pub ordered_keyfiles: bool,
}

/// Streaming encryption pipeline. Writes a self-describing header followed
/// by the cascade-enciphered, optionally RS-body-encoded, optionally
/// deniability-masked body, then seeks back to fill in the header once the
/// body MAC is known.
pub struct Encryptor<W> {
    sink: W,
    mac: Mac,
    cipher: EncryptionCipher,
    deniability: Option<Deniability>,
    deniability_prefix: Option<[u8; DENIABILITY_PREFIX_LEN]>,
    rs: Option<RsBodyEncoder>,
    reed_solomon: bool,
    paranoid: bool,
    comments: Vec<u8>,
    written_since_header: usize,
    header_mask: Option<Vec<u8>>,
}

impl<W: Write + Seek> Encryptor<W> {
    pub fn new(params: EncryptionParams<'_>, sink: W) -> Result<Self, VaultError> {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_LEN];
        let mut hkdf_salt = [0u8; HKDF_SALT_LEN];
        let mut serpent_iv = [0u8; SERPENT_IV_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        rng.fill_bytes(&mut salt);
        rng.fill_bytes(&mut hkdf_salt);
        rng.fill_bytes(&mut serpent_iv);
        rng.fill_bytes(&mut nonce);

        let mut keyfiles = params.keyfiles;
        let (keys, _duplicate_keyfiles) = Keys::new(
            &params.password,
            &mut keyfiles,
            params.paranoid,
            params.ordered_keyfiles,
            salt,
            hkdf_salt,
            serpent_iv,
            nonce,
        )?;

        let mac = Mac::new(&keys.mac_key, params.paranoid)?;
        let cipher = EncryptionCipher::new(keys, params.paranoid);

        let (deniability, deniability_prefix) = if params.deniability {
            let mut deny_salt = [0u8; SALT_LEN];
            let mut deny_nonce = [0u8; NONCE_LEN];
            rng.fill_bytes(&mut deny_salt);
            rng.fill_bytes(&mut deny_nonce);
            let deny_key = deniability_key(&params.password, &deny_salt);
            let deny = Deniability::new(deny_key, deny_nonce);

            let mut prefix = [0u8; DENIABILITY_PREFIX_LEN];
            prefix[..SALT_LEN].copy_from_slice(&deny_salt);
            prefix[SALT_LEN..].copy_from_slice(&deny_nonce);
            (Some(deny), Some(prefix))
        } else {
            (None, None)
        };

        let rs = if params.reed_solomon {
            Some(RsBodyEncoder::new())
        } else {
            None
        };

        Ok(Self {
            sink,
            mac,
            cipher,
            deniability,
            deniability_prefix,
            rs,
            reed_solomon: params.reed_solomon,
            paranoid: params.paranoid,
            comments: params.comments,
            written_since_header: 0,
            header_mask: None,
        })
    }

    fn header_len(&self) -> usize {
        header_length(self.comments.len())
    }

    /// Writes `headerLength` (plus the deniability prefix, if enabled)
    /// zero bytes to reserve space for the header, then captures the mask
    /// the header will later be XORed with. Must run before the first real
    /// byte of the body flows through the deniability layer, since the
    /// layer's counter must stay in lockstep with what a decryptor will see.
    fn reserve_header(&mut self) -> Result<(), VaultError> {
        let header_len = self.header_len();
        let mut size = header_len;
        if self.deniability_prefix.is_some() {
            size += DENIABILITY_PREFIX_LEN;
        }
        self.sink.write_all(&vec![0u8; size])?;

        let mut mask = vec![0u8; header_len];
        if let Some(deny) = self.deniability.as_mut() {
            deny.mask(&mut mask);
        }
        self.header_mask = Some(mask);
        Ok(())
    }

    /// Encrypts `p` and writes it to the sink. Returns `p.len()` on
    /// success, matching the reference implementation's `Write` contract
    /// (the pipeline never performs a short write).
    pub fn write(&mut self, p: &[u8]) -> Result<usize, VaultError> {
        if self.header_mask.is_none() {
            self.reserve_header()?;
        }

        let mut data = p.to_vec();
        self.cipher.encode(&mut data)?;
        self.mac.update(&data);
        if let Some(rs) = self.rs.as_mut() {
            data = rs.encode(&data);
        }
        if let Some(deny) = self.deniability.as_mut() {
            deny.mask(&mut data);
        }
        self.sink.write_all(&data)?;
        self.written_since_header += data.len();
        Ok(p.len())
    }

    /// Flushes any buffered Reed-Solomon chunk, seeks back to the reserved
    /// header region, and writes the finished header (and, if enabled, the
    /// unmasked deniability prefix). Consumes `self` and returns the
    /// underlying sink.
    pub fn close(mut self) -> Result<W, VaultError> {
        if self.header_mask.is_none() {
            self.reserve_header()?;
        }

        if let Some(rs) = self.rs.take() {
            let mut flush_data = rs.flush();
            if let Some(deny) = self.deniability.as_mut() {
                deny.mask(&mut flush_data);
            }
            self.sink.write_all(&flush_data)?;
            self.written_since_header += flush_data.len();
        }

        let mut offset = self.written_since_header + self.header_len();
        if self.deniability_prefix.is_some() {
            offset += DENIABILITY_PREFIX_LEN;
        }
        self.sink.seek(SeekFrom::Current(-(offset as i64)))?;

        if let Some(prefix) = self.deniability_prefix {
            self.sink.write_all(&prefix)?;
        }

        let flags = Flags {
            paranoid: self.paranoid,
            uses_keyfiles: self.cipher.keys.uses_keyfiles,
            ordered_keyfiles: self.cipher.keys.ordered_keyfiles,
            reed_solomon_body: self.reed_solomon,
            padded: self.written_since_header % (1 << 20) == 0,
        };
        let mac_tag = self.mac.finalize();

        let header = Header {
            version: FORMAT_VERSION.to_string(),
            comments: self.comments,
            flags,
            salt: self.cipher.keys.salt,
            hkdf_salt: self.cipher.keys.hkdf_salt,
            serpent_iv: self.cipher.keys.serpent_iv,
            nonce: self.cipher.keys.nonce,
            key_ref: self.cipher.keys.key_ref,
            keyfile_key_ref: self.cipher.keys.keyfile_key_ref,
            mac_tag,
        };

        let mut encoded = encode_header(&header);
        let mask = self.header_mask.expect("header always reserved before close");
        for (b, m) in encoded.iter_mut().zip(mask.iter()) {
            *b ^= m;
        }
        self.sink.write_all(&encoded)?;

        Ok(self.sink)
    }
}
