use crate::rs::codec::{rs_decode, rs_encode};
use crate::rs::types::RsError;

/// Header fields use `(k, 3k)`: a `k`-byte field expands to `3k` bytes (`2k`
/// parity bytes), correcting up to `k` damaged bytes. A lone comment byte
/// is just the `k = 1` case of this same encoding.
pub fn encode_field(data: &[u8]) -> Vec<u8> {
    rs_encode(2 * data.len(), data)
}

pub fn decode_field(encoded: &[u8], field_len: usize) -> (Vec<u8>, Option<RsError>) {
    rs_decode(2 * field_len, encoded)
}
