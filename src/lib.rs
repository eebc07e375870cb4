//! cascade-vault
//!
//! Synchronous, single-threaded encryption engine implementing a
//! Picocrypt-family container format: Argon2id password/keyfile key
//! derivation, a ChaCha20 + Serpent-CTR cascade cipher with periodic
//! rekeying, an optional deniability mask, a Reed-Solomon codec over
//! both header fields and body chunks, and a keyed MAC over the
//! ciphertext.

#![forbid(unsafe_code)]

pub mod constants;
pub mod types;
pub mod utils;

pub mod keys;
pub mod cipher;
pub mod rs;
pub mod header;
pub mod passgen;
pub mod pipeline;

pub mod prelude {
    pub use crate::cipher::{Deniability, EncryptionCipher, Mac};
    pub use crate::header::{DecodedHeader, Header};
    pub use crate::keys::Keys;
    pub use crate::passgen::{generate_keyfile, generate_password};
    pub use crate::pipeline::{DecryptionParams, Decryptor, EncryptionParams, Encryptor};
    pub use crate::types::VaultError;
}
