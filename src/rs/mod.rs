mod body;
mod codec;
mod field;
mod types;

pub use body::{RsBodyDecoder, RsBodyEncoder};
pub use codec::{rs_decode, rs_encode};
pub use field::{decode_field, encode_field};
pub use types::RsError;
pub(crate) use types::worse;
