//! Error types for graphbinary-client.

use thiserror::Error;

/// Main error type for all GraphBinary operations.
///
/// Every variant is terminal for the call that produced it. The codec never
/// substitutes a default or approximated value.
#[derive(Debug, Error)]
pub enum GraphBinaryError {
    /// No serializer accepts the value (write side), or the type code names a
    /// GraphBinary type this crate does not implement (read side).
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Type code byte has no registered serializer.
    #[error("Unknown type code: 0x{0:02x}")]
    UnknownTypeCode(u8),

    /// Declared count is negative, or a byte length is negative or larger
    /// than the remaining input.
    #[error("Malformed length {length} ({remaining} bytes remaining)")]
    MalformedLength {
        /// Length as read from the wire.
        length: i64,
        /// Bytes left in the input when the length was read.
        remaining: usize,
    },

    /// Fewer bytes available than the value requires.
    #[error("Buffer underflow: need {needed} bytes, {remaining} remaining")]
    BufferUnderflow {
        /// Bytes required by the read.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// Generic number cannot be written without risking precision loss.
    #[error("Precision loss risk: {0} exceeds the exact integer range; use an explicit Long or BigInteger")]
    PrecisionLossRisk(f64),

    /// String payload is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Null-flag byte is neither 0x00 nor 0x01, or contradicts its type.
    #[error("Invalid value flag 0x{0:02x}")]
    InvalidValueFlag(u8),

    /// Payload decoded but does not form a valid value of its type.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Value nesting exceeds the configured depth limit.
    #[error("Nesting too deep (limit {0})")]
    NestingTooDeep(usize),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using GraphBinaryError.
pub type Result<T> = std::result::Result<T, GraphBinaryError>;
