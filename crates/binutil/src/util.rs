//! High-level util functions.

use std::io::Write;

use crate::{SliceSource, Varint, VarintError, VarintResult};

/// Decodes a value from a buffer, throwing an error if there's leftover bytes.
pub fn decode_buf_exact<T: Varint>(buf: &[u8]) -> VarintResult<T> {
    let mut src = SliceSource::new(buf);
    let (v, _) = T::decode_from(&mut src)?;
    if src.remaining() > 0 {
        return Err(VarintError::ExtraInput(src.remaining()));
    }
    Ok(v)
}

/// Encodes the value into a newly allocated vec.
pub fn encode_to_vec<T: Varint>(v: &T) -> VarintResult<Vec<u8>> {
    let mut buf = vec![0; T::MAX_LEN];
    let n = v.put(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Encodes a sequence of values back to back onto a writer, returning the
/// total number of bytes written.
pub fn write_all_varints<'a, T: Varint + 'a>(
    w: &mut impl Write,
    vals: impl IntoIterator<Item = &'a T>,
) -> VarintResult<usize> {
    let mut total = 0;
    for v in vals {
        total += v.write_to(w)?;
    }
    Ok(total)
}
