//! Unsigned varint for values up to 31 bits.
//!
//! The first byte carries 7 bits, every byte after it carries 6.  Bytes
//! after the first always have their top bit set, which is what lets a
//! decoder tell them apart from the start of the next value.
//!
//! ```txt
//! 0bbbbbbb
//! 1bbbbbbb 10bbbbbb
//! 1bbbbbbb 11bbbbbb 10bbbbbb
//! 1bbbbbbb 11bbbbbb 11bbbbbb 10bbbbbb
//! 1bbbbbbb 11bbbbbb 11bbbbbb 11bbbbbb 10bbbbbb
//! ```
//!
//! Groups are little-endian, so the first byte holds the lowest bits.

use std::io::{Read, Write};

use crate::errors::{VarintError, VarintResult};
use crate::source::{ByteSource, ReadSource, SliceSource};

/// The max value an int31 can have.
pub const INT31_MAX: u32 = 0x7fff_ffff;

/// Max number of bytes an int31 encodes to.
pub const INT31_MAX_LEN: usize = 5;

/// "More bytes follow" flag on the first byte, "continuation byte" marker on
/// the rest.
const MARK: u8 = 0x80;

/// "More groups follow" flag on continuation bytes.
const MORE: u8 = 0x40;

/// Unsigned integer known to be in range for the int31 codec.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Int31(u32);

impl Int31 {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// The largest encodable value.
    pub const MAX: Self = Self(INT31_MAX);

    pub(crate) fn new_unchecked(v: u32) -> Self {
        Self(v)
    }

    /// Construct a new instance.
    pub fn new(v: u32) -> Option<Self> {
        if v > INT31_MAX {
            return None;
        }
        Some(Self::new_unchecked(v))
    }

    /// Converts to inner value.
    pub fn inner(self) -> u32 {
        self.0
    }

    /// Returns the number of bytes this encodes to.
    pub fn encoded_len(&self) -> usize {
        len_unchecked(self.0)
    }
}

impl From<Int31> for u32 {
    fn from(value: Int31) -> Self {
        value.inner()
    }
}

impl TryFrom<u32> for Int31 {
    type Error = VarintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(VarintError::OutOfRange(value as u64))
    }
}

impl TryFrom<i32> for Int31 {
    type Error = VarintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(VarintError::Negative(value as i64));
        }
        Ok(Self::new_unchecked(value as u32))
    }
}

impl TryFrom<i64> for Int31 {
    type Error = VarintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(VarintError::Negative(value));
        }
        if value > INT31_MAX as i64 {
            return Err(VarintError::OutOfRange(value as u64));
        }
        Ok(Self::new_unchecked(value as u32))
    }
}

fn check_range(v: u32) -> VarintResult<()> {
    if v > INT31_MAX {
        return Err(VarintError::OutOfRange(v as u64));
    }
    Ok(())
}

fn len_unchecked(v: u32) -> usize {
    let mut rest = v >> 7;
    let mut n = 1;
    while rest != 0 {
        rest >>= 6;
        n += 1;
    }
    n
}

/// Returns the number of bytes `v` encodes to.
pub fn int31_len(v: u32) -> VarintResult<usize> {
    check_range(v)?;
    Ok(len_unchecked(v))
}

/// Writes an in-range value, assuming the buffer was already checked to be
/// long enough.
fn put_unchecked(buf: &mut [u8], v: u32) -> usize {
    buf[0] = (v & 0x7f) as u8;
    let mut rest = v >> 7;
    if rest == 0 {
        return 1;
    }

    buf[0] |= MARK;
    let mut n = 1;
    loop {
        buf[n] = (rest & 0x3f) as u8 | MARK;
        rest >>= 6;
        if rest == 0 {
            return n + 1;
        }

        buf[n] |= MORE;
        n += 1;
    }
}

/// Encodes `v` into the front of `buf`, returning the number of bytes
/// written.
///
/// Fails without writing anything if `v` is over [`INT31_MAX`] or if `buf`
/// is shorter than the encoding.  A buffer of [`INT31_MAX_LEN`] bytes always
/// fits.
pub fn put_int31(buf: &mut [u8], v: u32) -> VarintResult<usize> {
    let need = int31_len(v)?;
    if buf.len() < need {
        return Err(VarintError::BufferTooSmall {
            need,
            have: buf.len(),
        });
    }

    Ok(put_unchecked(buf, v))
}

/// Encodes `v` onto a writer, returning the number of bytes written.
pub fn write_int31(w: &mut impl Write, v: u32) -> VarintResult<usize> {
    let mut buf = [0u8; INT31_MAX_LEN];
    let n = put_int31(&mut buf, v)?;
    w.write_all(&buf[..n])?;
    Ok(n)
}

/// Decodes one value from a source, returning it with the number of bytes
/// consumed.
pub(crate) fn decode_int31(src: &mut impl ByteSource) -> VarintResult<(u32, usize)> {
    let first = src.read_u8(0)?;
    let mut v = (first & 0x7f) as u32;
    if first & MARK == 0 {
        return Ok((v, 1));
    }

    let mut shift = 7;
    for n in 1..INT31_MAX_LEN {
        let b = src.read_u8(n)?;
        if b & MARK == 0 {
            return Err(VarintError::DataMark(n));
        }

        v |= ((b & 0x3f) as u32) << shift;
        if b & MORE == 0 {
            return Ok((v, n + 1));
        }

        shift += 6;
    }

    Err(VarintError::EndMarkNotFound)
}

/// Decodes a value from the front of `buf`, returning it with the number of
/// bytes consumed.  Bytes after the value are ignored.
pub fn get_int31(buf: &[u8]) -> VarintResult<(u32, usize)> {
    decode_int31(&mut SliceSource::new(buf))
}

/// Reads one value from a reader a byte at a time, returning it with the
/// number of bytes consumed.
///
/// Returns [`VarintError::Eof`] if the reader was already at its end, and
/// [`VarintError::Truncated`] if it ended partway through the value.
pub fn read_int31(r: impl Read) -> VarintResult<(u32, usize)> {
    decode_int31(&mut ReadSource::new(r))
}
