//! Signed varint for the full `i64` range.
//!
//! Values are stored as a sign flag plus magnitude rather than two's
//! complement.  The first byte carries the sign and 6 magnitude bits, each
//! continuation byte carries 6 more, and the 11th byte (if reached) carries
//! the last 3.
//!
//! ```txt
//! byte 0       csbbbbbb   c = more bytes, s = negative
//! bytes 1..=9  1mbbbbbb   m = more bytes
//! byte 10      10000abb   a = adjust
//! ```
//!
//! `i64::MIN` has no positive counterpart, so it's stored as the magnitude of
//! `i64::MIN + 1` with the adjust bit set, telling the decoder to subtract one
//! after applying the sign.  That value always needs all 11 bytes.

use std::io::{Read, Write};

use crate::errors::{VarintError, VarintResult};
use crate::source::{ByteSource, ReadSource, SliceSource};

/// Max number of bytes an int64 encodes to.
pub const INT64_MAX_LEN: usize = 11;

/// Index of the last byte, which has a different layout from the others.
const LAST: usize = INT64_MAX_LEN - 1;

/// Continuation flag on the first byte, continuation marker on the rest.
const MARK: u8 = 0x80;

/// Sign flag on the first byte, "more bytes" flag on the rest.
const SIGN_OR_MORE: u8 = 0x40;

/// Adjust flag on the last byte.
const ADJUST: u8 = 0x08;

/// Decoded form of an int64 before the sign is applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SignMagnitude {
    negative: bool,
    adjust: bool,
    magnitude: u64,
}

impl SignMagnitude {
    /// Splits a value into sign and magnitude.
    pub fn from_i64(v: i64) -> Self {
        if v == i64::MIN {
            return Self {
                negative: true,
                adjust: true,
                magnitude: i64::MAX as u64,
            };
        }

        Self {
            negative: v < 0,
            adjust: false,
            magnitude: v.unsigned_abs(),
        }
    }

    /// Rebuilds the value.
    ///
    /// The adjust flag only has an effect on negative values.
    pub fn to_i64(self) -> i64 {
        // Decoding can produce at most 63 bits of magnitude.
        let m = (self.magnitude & i64::MAX as u64) as i64;
        if !self.negative {
            return m;
        }

        if self.adjust { -m - 1 } else { -m }
    }

    /// Returns if the sign flag is set.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns if the adjust flag is set.
    pub fn is_adjusted(&self) -> bool {
        self.adjust
    }

    /// Returns the magnitude.
    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }
}

/// Returns the number of bytes `v` encodes to.
pub fn int64_len(v: i64) -> usize {
    let mut rest = SignMagnitude::from_i64(v).magnitude >> 6;
    let mut n = 1;
    while rest != 0 {
        rest >>= 6;
        n += 1;
    }
    n
}

fn put_unchecked(buf: &mut [u8], sm: SignMagnitude) -> usize {
    buf[0] = (sm.magnitude & 0x3f) as u8;
    if sm.negative {
        buf[0] |= SIGN_OR_MORE;
    }

    let mut rest = sm.magnitude >> 6;
    if rest == 0 {
        return 1;
    }

    buf[0] |= MARK;
    let mut n = 1;
    loop {
        buf[n] = (rest & 0x3f) as u8 | MARK;
        rest >>= 6;
        if rest == 0 {
            if sm.adjust {
                buf[n] |= ADJUST;
            }
            return n + 1;
        }

        buf[n] |= SIGN_OR_MORE;
        n += 1;
    }
}

/// Encodes `v` into the front of `buf`, returning the number of bytes
/// written.
///
/// Fails without writing anything if `buf` is shorter than the encoding.  A
/// buffer of [`INT64_MAX_LEN`] bytes always fits.
pub fn put_int64(buf: &mut [u8], v: i64) -> VarintResult<usize> {
    let need = int64_len(v);
    if buf.len() < need {
        return Err(VarintError::BufferTooSmall {
            need,
            have: buf.len(),
        });
    }

    Ok(put_unchecked(buf, SignMagnitude::from_i64(v)))
}

/// Encodes `v` onto a writer, returning the number of bytes written.
pub fn write_int64(w: &mut impl Write, v: i64) -> VarintResult<usize> {
    let mut buf = [0u8; INT64_MAX_LEN];
    let n = put_int64(&mut buf, v)?;
    w.write_all(&buf[..n])?;
    Ok(n)
}

/// Decodes the sign and magnitude of one value from a source, returning them
/// with the number of bytes consumed.
pub(crate) fn decode_sign_magnitude(
    src: &mut impl ByteSource,
) -> VarintResult<(SignMagnitude, usize)> {
    let first = src.read_u8(0)?;
    let mut sm = SignMagnitude {
        negative: first & SIGN_OR_MORE != 0,
        adjust: false,
        magnitude: (first & 0x3f) as u64,
    };

    if first & MARK == 0 {
        return Ok((sm, 1));
    }

    let mut shift = 6;
    for n in 1..INT64_MAX_LEN {
        let b = src.read_u8(n)?;
        if b & MARK == 0 {
            return Err(VarintError::DataMark(n));
        }

        if b & SIGN_OR_MORE == 0 {
            let bits = if n == LAST {
                sm.adjust = b & ADJUST != 0;
                b & 0x07
            } else {
                b & 0x3f
            };
            sm.magnitude |= (bits as u64) << shift;
            return Ok((sm, n + 1));
        }

        sm.magnitude |= ((b & 0x3f) as u64) << shift;
        shift += 6;
    }

    Err(VarintError::EndMarkNotFound)
}

pub(crate) fn decode_int64(src: &mut impl ByteSource) -> VarintResult<(i64, usize)> {
    let (sm, n) = decode_sign_magnitude(src)?;
    Ok((sm.to_i64(), n))
}

/// Decodes a value from the front of `buf`, returning it with the number of
/// bytes consumed.  Bytes after the value are ignored.
pub fn get_int64(buf: &[u8]) -> VarintResult<(i64, usize)> {
    decode_int64(&mut SliceSource::new(buf))
}

/// Reads one value from a reader a byte at a time, returning it with the
/// number of bytes consumed.
///
/// Returns [`VarintError::Eof`] if the reader was already at its end, and
/// [`VarintError::Truncated`] if it ended partway through the value.
pub fn read_int64(r: impl Read) -> VarintResult<(i64, usize)> {
    decode_int64(&mut ReadSource::new(r))
}
