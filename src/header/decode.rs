use std::io::Read;

use crate::cipher::{deniability_key, Deniability};
use crate::constants::{
    DENIABILITY_PREFIX_LEN, HKDF_SALT_LEN, KEY_LEN, MAC_TAG_LEN, NONCE_LEN, SALT_LEN,
    SERPENT_IV_LEN,
};
use crate::header::types::{Flags, Header, HeaderError};
use crate::rs::{decode_field, RsError};

/// The result of reading a header off a stream: the decoded fields, whether
/// any field required (and got) Reed-Solomon correction, and the
/// deniability layer if the container turned out to be deniability-masked
/// (already advanced past the prefix and the header region).
pub struct DecodedHeader {
    pub header: Header,
    pub header_damaged: bool,
    pub deniability: Option<Deniability>,
}

/// Reads one Reed-Solomon field of `field_len` raw bytes (`3 * field_len`
/// encoded bytes) off `source`, unmasking with `deny` first if present.
/// Mirrors the reference decoder's fallback: on `Corrupted`, the raw
/// (still RS-encoded) bytes are handed back rather than a best guess, since
/// the caller treats `Corrupted` as fatal and never looks at the payload.
fn read_field(
    source: &mut dyn Read,
    field_len: usize,
    mut deny: Option<&mut Deniability>,
) -> Result<(Vec<u8>, Option<RsError>), HeaderError> {
    if field_len == 0 {
        return Ok((Vec::new(), None));
    }
    let mut buf = vec![0u8; field_len * 3];
    source.read_exact(&mut buf)?;
    if let Some(deny) = deny.as_deref_mut() {
        deny.mask(&mut buf);
    }
    let (data, err) = decode_field(&buf, field_len);
    match err {
        Some(RsError::Corrupted) => Ok((buf, err)),
        _ => Ok((data, err)),
    }
}

/// Folds a field's decode outcome into the running `header_damaged` flag.
/// `Corrupted` is always fatal for a header field, per the format's
/// contract (unlike a body chunk, there is no plaintext fallback).
fn fold(err: Option<RsError>, damaged: &mut bool) -> Result<(), HeaderError> {
    match err {
        Some(RsError::Corrupted) => Err(HeaderError::Corrupted),
        Some(RsError::Recoverable) => {
            *damaged = true;
            Ok(())
        }
        None => Ok(()),
    }
}

/// `^v1\.\d\d` without pulling in a regex dependency: five ASCII bytes,
/// `v1.` followed by two digits.
fn is_valid_version(bytes: &[u8]) -> bool {
    bytes.len() == 5
        && &bytes[0..3] == b"v1."
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}

/// `^v\d\.\d\d`: recognizably version-shaped but not necessarily `v1.*`.
/// Used to tell a clean-but-wrong version apart from noise (either RS
/// corruption or, on the first read, a deniability-masked stream).
fn looks_like_a_version(bytes: &[u8]) -> bool {
    bytes.len() == 5
        && bytes[0] == b'v'
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'.'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}

/// Reads and decodes the container header from `source`, bootstrapping the
/// deniability layer first if the leading bytes don't look like a plain
/// version field. `password` is only used if deniability bootstrapping is
/// needed, to derive the deniability key from the salt recovered from the
/// stream's first 16 bytes.
pub fn read_header(source: &mut dyn Read, password: &str) -> Result<DecodedHeader, HeaderError> {
    let mut header_damaged = false;

    let (version_field, err) = read_field(source, 5, None)?;

    let (version_bytes, mut deniability) = if is_valid_version(&version_field) {
        if matches!(err, Some(RsError::Recoverable)) {
            header_damaged = true;
        }
        (version_field, None)
    } else if !matches!(err, Some(RsError::Corrupted)) && looks_like_a_version(&version_field) {
        // A recognizably version-shaped field that decoded cleanly (or was
        // itself RS-corrected) but still isn't `v1.*`: this is a genuine
        // unsupported-version container, not noise, so there's no reason to
        // go looking for a deniability prefix.
        return Err(HeaderError::UnsupportedVersion(version_field));
    } else {
        // Not a plausible version field: the stream is either corrupted or
        // deniability-masked. Reassemble the 40-byte prefix from the 15
        // raw (encoded) bytes already consumed plus 25 fresh ones, and try
        // again through a freshly bootstrapped deniability layer.
        let mut prefix = [0u8; DENIABILITY_PREFIX_LEN];
        let take = version_field.len().min(15);
        prefix[..take].copy_from_slice(&version_field[..take]);
        source.read_exact(&mut prefix[15..DENIABILITY_PREFIX_LEN])?;

        let deny_salt: [u8; SALT_LEN] = prefix[..16].try_into().unwrap();
        let deny_nonce: [u8; NONCE_LEN] = prefix[16..40].try_into().unwrap();
        let deny_key = deniability_key(password, &deny_salt);
        let mut deny = Deniability::new(deny_key, deny_nonce);

        let (version_bytes, err2) = read_field(source, 5, Some(&mut deny))?;
        if !is_valid_version(&version_bytes) {
            if !matches!(err2, Some(RsError::Corrupted)) && looks_like_a_version(&version_bytes) {
                return Err(HeaderError::UnsupportedVersion(version_bytes));
            }
            return Err(HeaderError::Corrupted);
        }
        if matches!(err2, Some(RsError::Recoverable)) {
            header_damaged = true;
        }
        (version_bytes, Some(deny))
    };
    let version = String::from_utf8(version_bytes)
        .expect("is_valid_version only accepts ASCII")
        .to_string();

    macro_rules! field {
        ($len:expr) => {{
            let (data, err) = read_field(source, $len, deniability.as_mut())?;
            fold(err, &mut header_damaged)?;
            data
        }};
    }

    let comment_len_bytes = field!(5);
    let comment_len: usize = std::str::from_utf8(&comment_len_bytes)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(HeaderError::Corrupted)?;

    let mut comments = Vec::with_capacity(comment_len);
    for _ in 0..comment_len {
        comments.extend(field!(1));
    }

    let flags = Flags::from_bytes(field!(5).try_into().unwrap());
    let salt: [u8; SALT_LEN] = field!(SALT_LEN).try_into().unwrap();
    let hkdf_salt: [u8; HKDF_SALT_LEN] = field!(HKDF_SALT_LEN).try_into().unwrap();
    let serpent_iv: [u8; SERPENT_IV_LEN] = field!(SERPENT_IV_LEN).try_into().unwrap();
    let nonce: [u8; NONCE_LEN] = field!(NONCE_LEN).try_into().unwrap();
    let key_ref: [u8; MAC_TAG_LEN] = field!(MAC_TAG_LEN).try_into().unwrap();
    let keyfile_key_ref: [u8; KEY_LEN] = field!(KEY_LEN).try_into().unwrap();
    let mac_tag: [u8; MAC_TAG_LEN] = field!(MAC_TAG_LEN).try_into().unwrap();

    let header = Header {
        version,
        comments,
        flags,
        salt,
        hkdf_salt,
        serpent_iv,
        nonce,
        key_ref,
        keyfile_key_ref,
        mac_tag,
    };

    Ok(DecodedHeader {
        header,
        header_damaged,
        deniability,
    })
}
