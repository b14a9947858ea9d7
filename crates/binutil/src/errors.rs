use std::io;

use thiserror::Error;

/// Errors from encoding or decoding varints.
#[derive(Debug, Error)]
pub enum VarintError {
    /// Decoding was attempted on an empty buffer.
    #[error("decode error (no data)")]
    NoData,

    /// The buffer ended before the terminal byte, after this many bytes.
    #[error("decode error (not enough bytes, ran out after {0})")]
    NotEnoughBytes(usize),

    /// A byte after the first was missing its continuation marker.
    #[error("decode error (data mark error at byte {0})")]
    DataMark(usize),

    /// No terminal byte within the maximum encoded length.
    #[error("decode error (end mark not found)")]
    EndMarkNotFound,

    /// The stream ended cleanly before the first byte of a value.
    #[error("end of stream")]
    Eof,

    /// The stream ended partway through a value, after this many bytes.
    #[error("stream truncated after {0} bytes of a value")]
    Truncated(usize),

    /// Underlying reader or writer failed.
    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// Tried to encode a negative number with the unsigned codec.
    #[error("negative value {0} has no int31 encoding")]
    Negative(i64),

    /// Value is larger than the codec can represent.
    #[error("value {0} exceeds int31 range")]
    OutOfRange(u64),

    /// Destination buffer can't hold the encoding.
    #[error("buffer too small (need {need}, have {have})")]
    BufferTooSmall {
        /// Bytes the encoding needs.
        need: usize,

        /// Bytes the buffer has.
        have: usize,
    },

    /// There were bytes left over after decoding a value that should have
    /// filled the buffer.
    #[error("extra unnecessary input leftover ({0} bytes)")]
    ExtraInput(usize),
}

/// Coarse classification of a [`VarintError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorClass {
    /// Input ended before a terminal byte was seen.
    TruncatedInput,

    /// A continuation marker was missing where one was required.
    MalformedContinuation,

    /// No terminal byte within the maximum encoded length.
    FormatOverrun,

    /// The underlying stream failed or ended cleanly.
    Io,

    /// The caller passed something the codec can't accept.
    InvalidInput,
}

impl VarintError {
    /// Returns which class of failure this is.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NoData | Self::NotEnoughBytes(_) | Self::Truncated(_) => {
                ErrorClass::TruncatedInput
            }
            Self::DataMark(_) => ErrorClass::MalformedContinuation,
            Self::EndMarkNotFound => ErrorClass::FormatOverrun,
            Self::Eof | Self::Io(_) => ErrorClass::Io,
            Self::Negative(_)
            | Self::OutOfRange(_)
            | Self::BufferTooSmall { .. }
            | Self::ExtraInput(_) => ErrorClass::InvalidInput,
        }
    }

    /// Returns if this is a stream that ended before any byte of the next
    /// value, which is how a sequence of concatenated values ends.
    pub fn is_clean_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

/// Wrapper result type.
pub type VarintResult<T> = Result<T, VarintError>;
