use crate::header::types::Header;
use crate::rs::encode_field;

/// Total encoded header length for a given comment length, per the format's
/// fixed field layout: 789 bytes of fixed fields plus 3 bytes per comment
/// byte (each comment byte is its own Reed-Solomon field).
pub fn header_length(comment_len: usize) -> usize {
    789 + 3 * comment_len
}

/// Marshals `h` into its Reed-Solomon-expanded, unmasked byte form. The
/// caller is responsible for XOR-masking the result with the deniability
/// layer, if enabled, before writing it to the sink.
pub fn encode_header(h: &Header) -> Vec<u8> {
    let mut out = Vec::with_capacity(header_length(h.comments.len()));
    out.extend(encode_field(h.version.as_bytes()));
    out.extend(encode_field(format!("{:05}", h.comments.len()).as_bytes()));
    for b in &h.comments {
        out.extend(encode_field(std::slice::from_ref(b)));
    }
    out.extend(encode_field(&h.flags.to_bytes()));
    out.extend(encode_field(&h.salt));
    out.extend(encode_field(&h.hkdf_salt));
    out.extend(encode_field(&h.serpent_iv));
    out.extend(encode_field(&h.nonce));
    out.extend(encode_field(&h.key_ref));
    out.extend(encode_field(&h.keyfile_key_ref));
    out.extend(encode_field(&h.mac_tag));
    out
}
