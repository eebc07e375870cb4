use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use reed_solomon::{Decoder, Encoder};

use crate::rs::types::RsError;

/// Process-wide cache of FEC objects keyed by `ecc_len`, since an `Encoder`
/// or `Decoder` is stateless once built (it only encodes the GF(256)
/// generator polynomial for its parity length) and every distinct field
/// size and the body chunk shape each resolve to one fixed `ecc_len`. The
/// mutex only ever guards a lookup-or-insert; the returned `Arc` is used
/// for the actual encode/decode call without holding the lock.
fn encoder_cache() -> &'static Mutex<HashMap<usize, Arc<Encoder>>> {
    static CACHE: OnceLock<Mutex<HashMap<usize, Arc<Encoder>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn decoder_cache() -> &'static Mutex<HashMap<usize, Arc<Decoder>>> {
    static CACHE: OnceLock<Mutex<HashMap<usize, Arc<Decoder>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn cached_encoder(ecc_len: usize) -> Arc<Encoder> {
    let mut cache = encoder_cache().lock().expect("encoder cache poisoned");
    cache
        .entry(ecc_len)
        .or_insert_with(|| Arc::new(Encoder::new(ecc_len)))
        .clone()
}

fn cached_decoder(ecc_len: usize) -> Arc<Decoder> {
    let mut cache = decoder_cache().lock().expect("decoder cache poisoned");
    cache
        .entry(ecc_len)
        .or_insert_with(|| Arc::new(Decoder::new(ecc_len)))
        .clone()
}

/// Encodes `data` with `ecc_len` parity bytes, producing a systematic
/// codeword (`data` followed by parity) of length `data.len() + ecc_len`.
pub fn rs_encode(ecc_len: usize, data: &[u8]) -> Vec<u8> {
    cached_encoder(ecc_len).encode(data).to_vec()
}

/// Decodes a codeword with `ecc_len` parity bytes back to its data portion.
/// Re-encodes and compares first, which is cheap and detects the common
/// case of zero corruption without running the correction algorithm; only
/// on a mismatch does it fall back to true error-correcting decode.
pub fn rs_decode(ecc_len: usize, encoded: &[u8]) -> (Vec<u8>, Option<RsError>) {
    let data_len = encoded.len() - ecc_len;
    let reencoded = rs_encode(ecc_len, &encoded[..data_len]);
    if reencoded == encoded {
        return (encoded[..data_len].to_vec(), None);
    }

    let decoder = cached_decoder(ecc_len);
    match decoder.correct(encoded, None) {
        Ok(buf) => (buf.data().to_vec(), Some(RsError::Recoverable)),
        Err(_) => (encoded[..data_len].to_vec(), Some(RsError::Corrupted)),
    }
}
