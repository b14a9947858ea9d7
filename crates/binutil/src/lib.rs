//! Compact self-delimiting binary encodings for integers.
//!
//! Two formats are provided:
//!
//! - [`put_int31`] / [`get_int31`] / [`read_int31`] for unsigned values up to
//!   31 bits, 1 to 5 bytes.
//! - [`put_int64`] / [`get_int64`] / [`read_int64`] for any `i64`, 1 to 11
//!   bytes, stored as sign and magnitude.
//!
//! A decoder only needs the start of an encoding to know how many bytes it
//! spans, so values can be concatenated without length prefixes and read back
//! with [`VarintReader`].

#[cfg(feature = "arbitrary")]
mod arbitrary;
mod errors;
mod int31;
mod int64;
mod reader;
#[cfg(feature = "serde")]
mod serde;
mod source;
mod types;
mod util;

pub use errors::{ErrorClass, VarintError, VarintResult};
pub use int31::{
    INT31_MAX, INT31_MAX_LEN, Int31, get_int31, int31_len, put_int31, read_int31, write_int31,
};
pub use int64::{
    INT64_MAX_LEN, SignMagnitude, get_int64, int64_len, put_int64, read_int64, write_int64,
};
pub use reader::VarintReader;
pub use source::{ByteSource, ReadSource, SliceSource};
pub use types::Varint;
pub use util::{decode_buf_exact, encode_to_vec, write_all_varints};

#[cfg(test)]
mod tests;
