//! Protocol module - type codes, envelope, and byte-level reading.
//!
//! This module implements the GraphBinary 1.0 wire primitives:
//! - Type code table ([`DataType`])
//! - 2-byte value envelope ([`Envelope`])
//! - Bounds-checked input cursor ([`ByteCursor`])

mod cursor;
mod data_type;
mod wire_format;

pub use cursor::ByteCursor;
pub use data_type::DataType;
pub use wire_format::{
    encode_length, validate_length, value_flag, Envelope, ENVELOPE_SIZE, LENGTH_SIZE,
    MAX_SAFE_INTEGER, MIME_TYPE,
};
