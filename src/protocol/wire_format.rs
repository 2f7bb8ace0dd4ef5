//! Wire format constants and the fully-qualified value envelope.
//!
//! A fully-qualified value starts with a 2-byte envelope:
//! ```text
//! ┌───────────┬────────────┬─────────────────────┐
//! │ Type code │ Value flag │ Payload             │
//! │ 1 byte    │ 1 byte     │ absent when null    │
//! └───────────┴────────────┴─────────────────────┘
//! ```
//!
//! All multi-byte integers are Big Endian. Lengths and counts are signed
//! 32-bit integers.

use crate::error::{GraphBinaryError, Result};

/// Envelope size in bytes (type code + value flag).
pub const ENVELOPE_SIZE: usize = 2;

/// Size of a length or count prefix.
pub const LENGTH_SIZE: usize = 4;

/// MIME type announced by transports carrying this format.
pub const MIME_TYPE: &str = "application/vnd.graphbinary-v1.0";

/// Largest magnitude a generic number represents exactly (2^53).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Value flag constants.
pub mod value_flag {
    /// Value is present, payload follows.
    pub const PRESENT: u8 = 0x00;
    /// Value is null, no payload.
    pub const NULL: u8 = 0x01;
}

/// Decoded envelope of a fully-qualified value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    /// Type code byte.
    pub type_code: u8,
    /// Value flag byte (see `value_flag`).
    pub value_flag: u8,
}

impl Envelope {
    /// Envelope for a present value.
    pub fn present(type_code: u8) -> Self {
        Self {
            type_code,
            value_flag: value_flag::PRESENT,
        }
    }

    /// Envelope for a null value.
    pub fn null(type_code: u8) -> Self {
        Self {
            type_code,
            value_flag: value_flag::NULL,
        }
    }

    /// Encode envelope to bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use graphbinary_client::protocol::Envelope;
    ///
    /// assert_eq!(Envelope::null(0xfe).encode(), [0xfe, 0x01]);
    /// ```
    pub fn encode(&self) -> [u8; ENVELOPE_SIZE] {
        [self.type_code, self.value_flag]
    }

    /// Decode envelope from bytes.
    ///
    /// Returns `None` if buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < ENVELOPE_SIZE {
            return None;
        }
        Some(Self {
            type_code: buf[0],
            value_flag: buf[1],
        })
    }

    /// Validate the value flag.
    pub fn validate(&self) -> Result<()> {
        match self.value_flag {
            value_flag::PRESENT | value_flag::NULL => Ok(()),
            other => Err(GraphBinaryError::InvalidValueFlag(other)),
        }
    }

    /// Check if the value is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.value_flag == value_flag::NULL
    }
}

/// Convert an in-memory length to its wire form.
///
/// Fails for collections too large for a signed 32-bit prefix.
pub fn encode_length(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| GraphBinaryError::MalformedLength {
        length: len as i64,
        remaining: 0,
    })
}

/// Validate a wire length against the bytes remaining in the input.
pub fn validate_length(length: i32, remaining: usize) -> Result<usize> {
    if length < 0 || length as usize > remaining {
        return Err(GraphBinaryError::MalformedLength {
            length: length as i64,
            remaining,
        });
    }
    Ok(length as usize)
}
