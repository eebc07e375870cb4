mod kdf;
mod types;

pub use kdf::HkdfReader;
pub use types::{Keys, KeysError};
