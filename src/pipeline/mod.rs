mod decryptor;
mod encryptor;

pub use decryptor::{DecryptionParams, Decryptor, NewDecryptorResult};
pub use encryptor::{EncryptionParams, Encryptor};
