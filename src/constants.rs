/// Container format version string. This crate implements exactly one
/// version and does not attempt migration between versions.
pub const FORMAT_VERSION: &str = "v1.99";

/// Number of plaintext bytes processed by the stream cipher layer before
/// it rekeys. 60 GiB, matching the reference implementation.
pub const RESET_NONCE_AT: u64 = 60 * (1 << 30);

/// Number of bytes processed by the deniability mask before it rekeys.
/// 60 MiB, matching the reference implementation.
pub const DENY_RESET_AT: u64 = 60 * (1 << 20);

/// Fixed sizes of the key-schedule outputs (see `keys` module).
pub const KEY_LEN: usize = 32;
pub const SALT_LEN: usize = 16;
pub const HKDF_SALT_LEN: usize = 32;
pub const NONCE_LEN: usize = 24;
pub const SERPENT_IV_LEN: usize = 16;
pub const MAC_TAG_LEN: usize = 64;

/// Length of the plaintext deniability prefix written ahead of the header
/// when deniability is enabled: a 16-byte salt followed by a 24-byte nonce.
pub const DENIABILITY_PREFIX_LEN: usize = SALT_LEN + NONCE_LEN;

/// Reed-Solomon body codec parameters: 128 data bytes expanded to 136,
/// i.e. 8 parity bytes per chunk, correcting up to 4 damaged bytes.
pub const RS_BODY_DATA_LEN: usize = 128;
pub const RS_BODY_ENCODED_LEN: usize = 136;

/// Reed-Solomon header-field expansion factor: a `k`-byte field is
/// expanded to `3k` bytes, correcting up to `k` damaged bytes.
pub const RS_HEADER_EXPANSION: usize = 3;

/// Argon2id cost parameters, matching the reference implementation. Memory
/// is 1 GiB for both normal and paranoid derivations (including the
/// deniability key); only time cost and parallelism scale with paranoid mode.
pub mod argon2_params {
    pub const MEMORY_KIB: u32 = 1 << 20;

    pub const TIME_NORMAL: u32 = 4;
    pub const PARALLELISM_NORMAL: u32 = 4;

    pub const TIME_PARANOID: u32 = 8;
    pub const PARALLELISM_PARANOID: u32 = 8;
}
