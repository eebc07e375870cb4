use crate::constants::{RS_BODY_DATA_LEN, RS_BODY_ENCODED_LEN};
use crate::rs::codec::{rs_decode, rs_encode};
use crate::rs::types::{worse, RsError};

const BODY_ECC_LEN: usize = RS_BODY_ENCODED_LEN - RS_BODY_DATA_LEN;

/// Streaming Reed-Solomon encoder over 128-byte body chunks, producing
/// 136-byte codewords. Buffers a partial chunk between calls; `flush` pads
/// whatever remains (always at least one full pad chunk, even over an
/// already chunk-aligned or empty input) before encoding it.
pub struct RsBodyEncoder {
    buffer: Vec<u8>,
}

impl RsBodyEncoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn encode(&mut self, input: &[u8]) -> Vec<u8> {
        self.buffer.extend_from_slice(input);
        let mut out = Vec::new();
        while self.buffer.len() >= RS_BODY_DATA_LEN {
            let chunk: Vec<u8> = self.buffer.drain(..RS_BODY_DATA_LEN).collect();
            out.extend(rs_encode(BODY_ECC_LEN, &chunk));
        }
        out
    }

    pub fn flush(mut self) -> Vec<u8> {
        let r = self.buffer.len();
        let pad = RS_BODY_DATA_LEN - r;
        self.buffer.resize(RS_BODY_DATA_LEN, pad as u8);
        rs_encode(BODY_ECC_LEN, &self.buffer)
    }
}

impl Default for RsBodyEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming Reed-Solomon decoder counterpart. Always holds back one full
/// 136-byte codeword in its internal buffer so that `flush` has the final
/// chunk available intact to strip padding from.
pub struct RsBodyDecoder {
    buffer: Vec<u8>,
}

impl RsBodyDecoder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn decode(&mut self, input: &[u8]) -> (Vec<u8>, Option<RsError>) {
        self.buffer.extend_from_slice(input);

        let mut n_chunks = self.buffer.len() / RS_BODY_ENCODED_LEN;
        if self.buffer.len() % RS_BODY_ENCODED_LEN == 0 && n_chunks > 0 {
            n_chunks -= 1;
        }

        let mut out = Vec::new();
        let mut status = None;
        for _ in 0..n_chunks {
            let chunk: Vec<u8> = self.buffer.drain(..RS_BODY_ENCODED_LEN).collect();
            let (data, err) = rs_decode(BODY_ECC_LEN, &chunk);
            out.extend(data);
            status = worse(status, err);
        }
        (out, status)
    }

    /// Decodes the final held-back chunk and strips its padding. Pad length
    /// is read from the corrected plaintext, not the raw buffer, so a
    /// damaged final chunk that was successfully corrected still strips
    /// the right number of bytes.
    pub fn flush(self) -> (Vec<u8>, Option<RsError>) {
        let (res, err) = rs_decode(BODY_ECC_LEN, &self.buffer);
        if matches!(err, Some(RsError::Corrupted)) {
            return (res, err);
        }
        let pad = (res[RS_BODY_DATA_LEN - 1] as usize).min(RS_BODY_DATA_LEN);
        (res[..RS_BODY_DATA_LEN - pad].to_vec(), err)
    }
}

impl Default for RsBodyDecoder {
    fn default() -> Self {
        Self::new()
    }
}
