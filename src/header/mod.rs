mod decode;
mod encode;
mod types;

pub use decode::{read_header, DecodedHeader};
pub use encode::{encode_header, header_length};
pub use types::{Flags, Header, HeaderError};
