//! Reading a stream of concatenated varints.

use std::io::Read;
use std::marker::PhantomData;

use tracing::*;

use crate::errors::{VarintError, VarintResult};
use crate::source::ReadSource;
use crate::types::Varint;

/// Iterator over varints written back to back on a reader.
///
/// Yields each value with the number of bytes it took.  Ends when the reader
/// runs out exactly between two values.  Running out partway through a value
/// or any other failure is yielded once as an error, after which the iterator
/// is done.
#[derive(Debug)]
pub struct VarintReader<R, T> {
    src: ReadSource<R>,
    count: usize,
    done: bool,
    _pd: PhantomData<fn() -> T>,
}

impl<R: Read, T: Varint> VarintReader<R, T> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self {
            src: ReadSource::new(inner),
            count: 0,
            done: false,
            _pd: PhantomData,
        }
    }

    /// Returns how many values have been read successfully.
    pub fn count_read(&self) -> usize {
        self.count
    }

    /// Takes out the wrapped reader.
    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }
}

impl<R: Read, T: Varint> Iterator for VarintReader<R, T> {
    type Item = VarintResult<(T, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match T::decode_from(&mut self.src) {
            Ok(v) => {
                self.count += 1;
                Some(Ok(v))
            }
            Err(VarintError::Eof) => {
                trace!(count = self.count, "varint stream ended");
                self.done = true;
                None
            }
            Err(e) => {
                debug!(count = self.count, %e, "failed to decode varint from stream");
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read, T: Varint> std::iter::FusedIterator for VarintReader<R, T> {}
