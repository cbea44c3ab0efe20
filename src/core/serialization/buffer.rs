/*!
 * Buffer Writer / Reader
 * Sequential primitives consumed by the record codec
 *
 * # Wire primitives
 * - long: 8-byte little-endian i64
 * - buffer: u64 length prefix followed by the raw bytes
 * - string: buffer whose payload carries a trailing NUL
 */

use crate::core::errors::{RecordError, RecordResult};
use crate::core::limits::LONG_WIDTH;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Ordered sink of wire primitives
pub trait BufferWriter {
    fn write_long(&mut self, value: i64);

    fn write_buffer(&mut self, data: &[u8]);

    fn write_string(&mut self, value: &str);
}

/// Ordered source of wire primitives
///
/// Must be consumed in exactly the order the writer produced.
pub trait BufferReader {
    fn read_long(&mut self) -> RecordResult<i64>;

    fn read_buffer(&mut self) -> RecordResult<Bytes>;

    fn read_string(&mut self) -> RecordResult<String>;

    /// Bytes left to consume
    fn remaining(&self) -> usize;
}

/// `BufferWriter` backed by a growable `BytesMut`
#[derive(Debug, Default)]
pub struct BytesWriter {
    buf: BytesMut,
}

impl BytesWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freeze the written bytes for zero-copy sharing
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

impl BufferWriter for BytesWriter {
    #[inline]
    fn write_long(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    fn write_buffer(&mut self, data: &[u8]) {
        self.buf.reserve(LONG_WIDTH + data.len());
        self.buf.put_u64_le(data.len() as u64);
        self.buf.put_slice(data);
    }

    fn write_string(&mut self, value: &str) {
        let len = value.len() + 1;
        self.buf.reserve(LONG_WIDTH + len);
        self.buf.put_u64_le(len as u64);
        self.buf.put_slice(value.as_bytes());
        self.buf.put_u8(0);
    }
}

/// `BufferReader` over an immutable `Bytes` view
#[derive(Debug, Clone)]
pub struct BytesReader {
    buf: Bytes,
}

impl BytesReader {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self { buf: buf.into() }
    }

    fn ensure(&self, needed: usize) -> RecordResult<()> {
        if self.buf.remaining() < needed {
            return Err(RecordError::Truncated {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    fn read_len(&mut self) -> RecordResult<usize> {
        self.ensure(LONG_WIDTH)?;
        let raw = self.buf.get_u64_le();
        usize::try_from(raw).map_err(|_| RecordError::InvalidLength(raw as i64))
    }
}

impl BufferReader for BytesReader {
    #[inline]
    fn read_long(&mut self) -> RecordResult<i64> {
        self.ensure(LONG_WIDTH)?;
        Ok(self.buf.get_i64_le())
    }

    fn read_buffer(&mut self) -> RecordResult<Bytes> {
        let len = self.read_len()?;
        self.ensure(len)?;
        Ok(self.buf.split_to(len))
    }

    fn read_string(&mut self) -> RecordResult<String> {
        let raw = self.read_buffer()?;
        let body = match raw.split_last() {
            Some((0, body)) => body,
            _ => {
                return Err(RecordError::MalformedString(
                    "missing NUL terminator".to_string(),
                ))
            }
        };
        if body.contains(&0) {
            return Err(RecordError::MalformedString("interior NUL byte".to_string()));
        }
        String::from_utf8(body.to_vec()).map_err(|e| RecordError::MalformedString(e.to_string()))
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.buf.remaining()
    }
}
