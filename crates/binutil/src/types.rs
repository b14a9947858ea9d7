use std::io::Write;

use crate::errors::VarintResult;
use crate::int31::{self, INT31_MAX_LEN, Int31};
use crate::int64::{self, INT64_MAX_LEN};
use crate::source::ByteSource;

/// Integer types with a varint encoding.
pub trait Varint: Copy + Sized {
    /// Max number of bytes a value encodes to.
    const MAX_LEN: usize;

    /// Returns the number of bytes this value encodes to.
    fn encoded_len(&self) -> usize;

    /// Encodes into the front of `buf`, returning the number of bytes
    /// written.
    fn put(&self, buf: &mut [u8]) -> VarintResult<usize>;

    /// Decodes one value from a source, returning it with the number of
    /// bytes consumed.
    fn decode_from(src: &mut impl ByteSource) -> VarintResult<(Self, usize)>;

    /// Encodes onto a writer, returning the number of bytes written.
    fn write_to(&self, w: &mut impl Write) -> VarintResult<usize> {
        // Big enough for every impl here.
        let mut buf = [0u8; 16];
        let n = self.put(&mut buf[..Self::MAX_LEN])?;
        w.write_all(&buf[..n])?;
        Ok(n)
    }
}

impl Varint for Int31 {
    const MAX_LEN: usize = INT31_MAX_LEN;

    fn encoded_len(&self) -> usize {
        Int31::encoded_len(self)
    }

    fn put(&self, buf: &mut [u8]) -> VarintResult<usize> {
        int31::put_int31(buf, self.inner())
    }

    fn decode_from(src: &mut impl ByteSource) -> VarintResult<(Self, usize)> {
        let (v, n) = int31::decode_int31(src)?;
        // At most 31 bits come out of the decoder.
        Ok((Int31::new_unchecked(v), n))
    }
}

impl Varint for i64 {
    const MAX_LEN: usize = INT64_MAX_LEN;

    fn encoded_len(&self) -> usize {
        int64::int64_len(*self)
    }

    fn put(&self, buf: &mut [u8]) -> VarintResult<usize> {
        int64::put_int64(buf, *self)
    }

    fn decode_from(src: &mut impl ByteSource) -> VarintResult<(Self, usize)> {
        int64::decode_int64(src)
    }
}
