//! Codec configuration.
//!
//! # Example
//!
//! ```
//! use graphbinary_client::config::{CodecConfig, PrecisionPolicy};
//!
//! let config = CodecConfig::from_json(r#"{ "precision": "lenient", "max_depth": 64 }"#).unwrap();
//! assert_eq!(config.precision, PrecisionPolicy::Lenient);
//! assert_eq!(config.max_depth, 64);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default nesting limit for composite values.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default initial capacity of the output buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// What the writer does with a generic number above the exact-integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionPolicy {
    /// Fail with `PrecisionLossRisk`.
    #[default]
    Strict,
    /// Log a warning and write the number as a Long.
    Lenient,
}

/// Configuration for a [`GraphBinaryCodec`](crate::codec::GraphBinaryCodec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Handling of generic numbers beyond 2^53.
    pub precision: PrecisionPolicy,
    /// Maximum nesting of composite values, on both read and write.
    pub max_depth: usize,
    /// Initial capacity of the output buffer.
    pub initial_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            precision: PrecisionPolicy::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
