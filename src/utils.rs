use subtle::ConstantTimeEq;

/// XORs `src` into `dst` in place. Panics if the slices differ in length,
/// matching the reference implementation's behavior of only ever calling
/// this over equal-length buffers.
pub fn xor(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "xor: mismatched buffer lengths");
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Constant-time equality check for tag-sized buffers (MAC tags, RS field
/// comparisons that touch secret-dependent data). Returns `false` on a
/// length mismatch rather than panicking, since callers compare buffers
/// whose lengths aren't always known to match ahead of time.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
