use std::io::Read;

use crate::cipher::{Deniability, EncryptionCipher, Mac};
use crate::constants::MAC_TAG_LEN;
use crate::header::read_header;
use crate::keys::Keys;
use crate::rs::{worse, RsBodyDecoder, RsError};
use crate::types::VaultError;
use crate::utils::ct_eq;

/// Parameters for [`Decryptor::new`].
pub struct DecryptionParams<'a> {
    pub password: String,
    pub keyfiles: Vec<&'a mut dyn Read>,
}

/// Streaming decryption pipeline, built by parsing the header off `source`.
pub struct Decryptor<R> {
    source: R,
    mac: Option<Mac>,
    cipher: EncryptionCipher,
    deniability: Option<Deniability>,
    rs: Option<RsBodyDecoder>,
    mac_tag: [u8; MAC_TAG_LEN],
    eof: bool,
    flushed: bool,
    buffer: Vec<u8>,
    /// Counts `read()` calls that observed RS-corrected body data, purely
    /// for the diagnostic printed below — not a precise chunk index, since
    /// a single call can fold several chunks' statuses together.
    diag_block: usize,
}

/// Construction outcome: the decryptor itself, plus whether any header
/// field required Reed-Solomon correction to parse (a warning, not a
/// failure — the container is still usable).
pub struct NewDecryptorResult<R> {
    pub decryptor: Decryptor<R>,
    pub header_recovered: bool,
}

impl<R: Read> Decryptor<R> {
    pub fn new(params: DecryptionParams<'_>, mut source: R) -> Result<NewDecryptorResult<R>, VaultError> {
        let decoded = read_header(&mut source, &params.password)?;
        let header = decoded.header;

        let mut keyfiles = params.keyfiles;
        // A duplicate-keyfile signal is tolerated here: legacy containers
        // may predate the duplicate check, and the header's own key
        // references are what ultimately gate whether the password and
        // keyfiles were right, not this soft signal.
        let (keys, _duplicate_keyfiles) = Keys::new(
            &params.password,
            &mut keyfiles,
            header.flags.paranoid,
            header.flags.ordered_keyfiles,
            header.salt,
            header.hkdf_salt,
            header.serpent_iv,
            header.nonce,
        )?;

        let mac = Mac::new(&keys.mac_key, header.flags.paranoid)?;
        let cipher = EncryptionCipher::new(keys, header.flags.paranoid);
        let rs = header.flags.reed_solomon_body.then(RsBodyDecoder::new);

        if decoded.header_damaged {
            eprintln!("cascade-vault: header field recovered via Reed-Solomon correction");
        }

        let decryptor = Decryptor {
            source,
            mac: Some(mac),
            cipher,
            deniability: decoded.deniability,
            rs,
            mac_tag: header.mac_tag,
            eof: false,
            flushed: false,
            buffer: Vec::new(),
            diag_block: 0,
        };

        Ok(NewDecryptorResult {
            decryptor,
            header_recovered: decoded.header_damaged,
        })
    }

    /// Reads decrypted plaintext into `buf`, returning the number of bytes
    /// written plus the worst Reed-Solomon status observed while producing
    /// them (`None` means every chunk involved was clean). Returns `Ok((0,
    /// _))` once the stream is exhausted and the MAC has checked out;
    /// returns `Err(VaultError::TagMismatch)` if it hasn't.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(usize, Option<RsError>), VaultError> {
        if buf.is_empty() || self.mac.is_none() {
            return Ok((0, None));
        }

        let mut data = if self.eof {
            Vec::new()
        } else {
            let mut tmp = vec![0u8; buf.len()];
            let n = self.source.read(&mut tmp)?;
            if n == 0 {
                self.eof = true;
                Vec::new()
            } else {
                tmp.truncate(n);
                tmp
            }
        };

        if let Some(deny) = self.deniability.as_mut() {
            deny.mask(&mut data);
        }

        let mut status: Option<RsError> = None;
        if let Some(rs) = self.rs.as_mut() {
            if !data.is_empty() {
                let (out, err) = rs.decode(&data);
                data = out;
                status = err;
            } else {
                data = Vec::new();
            }
        }

        if self.eof && !self.flushed {
            self.flushed = true;
            if let Some(rs) = self.rs.take() {
                let (flush_data, flush_err) = rs.flush();
                status = worse(status, flush_err);
                data.extend(flush_data);
            }
        }

        if matches!(status, Some(RsError::Recoverable)) {
            self.diag_block += 1;
            eprintln!(
                "cascade-vault: body data recovered via Reed-Solomon correction (block {})",
                self.diag_block
            );
        }

        self.mac
            .as_mut()
            .expect("checked above")
            .update(&data);
        self.cipher.encode(&mut data)?;
        self.buffer.extend(data);

        let n = self.buffer.len().min(buf.len());
        buf[..n].copy_from_slice(&self.buffer[..n]);
        self.buffer.drain(..n);

        if self.buffer.is_empty() && self.eof {
            let tag = self.mac.take().unwrap().finalize();
            if !ct_eq(&tag, &self.mac_tag) {
                return Err(VaultError::TagMismatch);
            }
        }

        Ok((n, status))
    }
}
