//! Read-only cursor over an input buffer.
//!
//! Every read is bounds-checked up front and fails with `BufferUnderflow`
//! instead of panicking. The cursor borrows its input and never mutates it.

use super::wire_format::validate_length;
use crate::error::{GraphBinaryError, Result};

/// Cursor over borrowed bytes with a moving offset.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor starting at `offset`.
    pub fn new(buf: &'a [u8], offset: usize) -> Result<Self> {
        if offset > buf.len() {
            return Err(GraphBinaryError::BufferUnderflow {
                needed: offset,
                remaining: buf.len(),
            });
        }
        Ok(Self { buf, pos: offset })
    }

    /// Current offset into the input.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(GraphBinaryError::BufferUnderflow {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Peek at the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(GraphBinaryError::BufferUnderflow {
                needed: 1,
                remaining: 0,
            })
    }

    /// Read one unsigned byte (type codes, value flags, booleans).
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `i64`.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian IEEE-754 single.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian IEEE-754 double.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.take_array()?))
    }

    /// Read the 16 raw bytes of a UUID (most significant half first).
    pub fn read_uuid_bytes(&mut self) -> Result<[u8; 16]> {
        self.take_array()
    }

    /// Read a byte-length prefix, validated against the remaining input.
    pub fn read_length(&mut self) -> Result<usize> {
        let length = self.read_i32()?;
        validate_length(length, self.remaining())
    }

    /// Read an item-count prefix.
    ///
    /// Only negative counts are malformed. A count the input cannot satisfy
    /// fails with `BufferUnderflow` at the first missing item; callers size
    /// allocations with [`capacity_hint`](Self::capacity_hint), never the raw
    /// count.
    pub fn read_count(&mut self) -> Result<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| GraphBinaryError::MalformedLength {
            length: count as i64,
            remaining: self.remaining(),
        })
    }

    /// Read a length-prefixed byte run.
    pub fn read_sized_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_length()?;
        self.take(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let raw = self.read_sized_bytes()?;
        Ok(String::from_utf8(raw.to_vec())?)
    }

    /// Pre-allocation size for `count` items, capped by the remaining input.
    #[inline]
    pub fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.remaining())
    }
}
