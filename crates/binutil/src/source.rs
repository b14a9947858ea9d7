//! Byte sources the decoders pull from.
//!
//! Both decoders read one byte at a time and stop as soon as they see a
//! terminal byte, so a source only needs to hand out single bytes.  The
//! position within the value being decoded is passed along so the source can
//! report running out of input with the right error.

use std::io::{ErrorKind, Read};

use crate::errors::{VarintError, VarintResult};

/// Generic source of bytes for the varint decoders.
pub trait ByteSource {
    /// Reads the next byte.  `at` is the index of that byte within the value
    /// currently being decoded, so `0` means no byte of it has been read yet.
    fn read_u8(&mut self, at: usize) -> VarintResult<u8>;
}

/// Source over a flat byte slice, tracking how far into it we've read.
///
/// Decoding several values from the same source reads them back to back.
#[derive(Debug)]
pub struct SliceSource<B> {
    buf: B,
    at: usize,
}

impl<B: AsRef<[u8]>> SliceSource<B> {
    /// Constructs a new instance by wrapping a buffer and starting at the
    /// beginning.
    pub fn new(buf: B) -> Self {
        Self { buf, at: 0 }
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.as_ref().is_empty()
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.at
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.len() - self.at
    }
}

impl<B: AsRef<[u8]>> ByteSource for SliceSource<B> {
    fn read_u8(&mut self, at: usize) -> VarintResult<u8> {
        let Some(&b) = self.buf.as_ref().get(self.at) else {
            return Err(if at == 0 {
                VarintError::NoData
            } else {
                VarintError::NotEnoughBytes(at)
            });
        };

        self.at += 1;
        Ok(b)
    }
}

/// Source over an [`io::Read`](std::io::Read), one `read` call per byte.
///
/// Nothing is buffered, so the reader is left positioned right after the last
/// byte of the decoded value.  Wrap slow readers in a `BufReader` first.
///
/// Reads that fail with [`ErrorKind::Interrupted`] are retried, so a value is
/// never abandoned halfway through on a signal.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns a ref to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Takes out the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read_u8(&mut self, at: usize) -> VarintResult<u8> {
        let mut b = [0u8; 1];
        loop {
            match self.inner.read(&mut b) {
                Ok(0) if at == 0 => return Err(VarintError::Eof),
                Ok(0) => return Err(VarintError::Truncated(at)),
                Ok(_) => return Ok(b[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    #[test]
    fn test_slice_source_positions() {
        let mut src = SliceSource::new([1u8, 2, 3]);
        assert_eq!(src.len(), 3);
        assert!(!src.is_empty());
        assert_eq!(src.read_u8(0).unwrap(), 1);
        assert_eq!(src.read_u8(1).unwrap(), 2);
        assert_eq!(src.position(), 2);
        assert_eq!(src.remaining(), 1);
        assert_eq!(src.read_u8(0).unwrap(), 3);
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn test_slice_source_exhausted() {
        let empty: &[u8] = &[];
        let mut src = SliceSource::new(empty);
        assert!(src.is_empty());
        assert!(matches!(src.read_u8(0), Err(VarintError::NoData)));
        assert!(matches!(
            src.read_u8(3),
            Err(VarintError::NotEnoughBytes(3))
        ));
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn test_read_source_eof() {
        let mut src = ReadSource::new(Cursor::new(vec![0x42u8]));
        assert_eq!(src.read_u8(0).unwrap(), 0x42);
        assert!(matches!(src.read_u8(0), Err(VarintError::Eof)));
        assert!(matches!(src.read_u8(2), Err(VarintError::Truncated(2))));
        assert_eq!(src.into_inner().position(), 1);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    /// Hands out bytes one at a time, failing with `Interrupted` once before
    /// the byte at index `interrupt_at`.
    struct InterruptingReader {
        data: Vec<u8>,
        at: usize,
        interrupt_at: usize,
        interrupted: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.at == self.interrupt_at && !self.interrupted {
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }

            let Some(&b) = self.data.get(self.at) else {
                return Ok(0);
            };
            buf[0] = b;
            self.at += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_read_source_retries_interrupted() {
        let mut data = vec![0u8; 11];
        let n = crate::put_int64(&mut data, 1 << 40).unwrap();
        data.truncate(n);
        data.push(0x05);

        let mut rd = InterruptingReader {
            data,
            at: 0,
            interrupt_at: 1,
            interrupted: false,
        };

        assert_eq!(crate::read_int64(&mut rd).unwrap(), (1 << 40, n));
        assert!(rd.interrupted);
        assert_eq!(crate::read_int64(&mut rd).unwrap(), (5, 1));
        assert!(matches!(crate::read_int64(&mut rd), Err(VarintError::Eof)));
    }

    #[test]
    fn test_read_source_retries_interrupted_first_byte() {
        let mut rd = InterruptingReader {
            data: vec![0x80, 0x81],
            at: 0,
            interrupt_at: 0,
            interrupted: false,
        };

        assert_eq!(crate::read_int31(&mut rd).unwrap(), (128, 2));
    }

    #[test]
    fn test_read_source_propagates_failure() {
        let mut src = ReadSource::new(FailingReader);
        match src.read_u8(0) {
            Err(VarintError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("test: unexpected result {other:?}"),
        }
    }
}
