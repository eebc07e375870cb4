mod deniability;
mod mac;
mod stream;

pub use deniability::{deniability_key, Deniability};
pub use mac::{Mac, MacError};
pub use stream::{CipherError, EncryptionCipher};
