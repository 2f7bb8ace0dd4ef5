//! # graphbinary-client
//!
//! GraphBinary 1.0 serialization for graph-traversal clients.
//!
//! This crate turns client-side values (traversal bytecode, predicates,
//! strategies, bindings, lambdas, graph elements, collections and scalars)
//! into GraphBinary bytes and back. Transport and request framing are left
//! to the caller; the wire MIME type is [`MIME_TYPE`].
//!
//! ## Architecture
//!
//! - **Registry** ([`DataTypeRegistry`]): type code → payload serializer
//! - **Dispatch** ([`AnySerializer`]): ordered recognizer chain picking the
//!   wire type of a value on write
//! - **Numbers** ([`NumberSerializationStrategy`]): wire type for the generic
//!   [`Value::Number`]
//! - **Reader / Writer**: envelope handling and recursion
//!
//! ## Example
//!
//! ```
//! use graphbinary_client::value::{Bytecode, Predicate, Value};
//!
//! let mut bytecode = Bytecode::new();
//! bytecode
//!     .add_step("V", vec![])
//!     .add_step("has", vec!["age".into(), Value::P(Predicate::unary("gt", Value::number(30)))]);
//!
//! let bytes = graphbinary_client::encode(&Value::Bytecode(bytecode)).unwrap();
//! let (decoded, _) = graphbinary_client::decode(&bytes).unwrap();
//! assert!(matches!(decoded, Value::Bytecode(b) if b.steps.len() == 2));
//! ```

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod number;
pub mod protocol;
pub mod reader;
pub mod registry;
pub mod serializer;
pub mod value;
pub mod writer;

use bytes::Bytes;

pub use codec::{GraphBinaryCodec, GraphBinaryCodecBuilder};
pub use config::{CodecConfig, PrecisionPolicy};
pub use dispatch::AnySerializer;
pub use error::{GraphBinaryError, Result};
pub use number::NumberSerializationStrategy;
pub use protocol::{DataType, MIME_TYPE};
pub use reader::GraphBinaryReader;
pub use registry::DataTypeRegistry;
pub use value::Value;
pub use writer::GraphBinaryWriter;

/// Encode a value with the shared default codec.
pub fn encode(value: &Value) -> Result<Bytes> {
    GraphBinaryCodec::shared().encode(value)
}

/// Decode one value with the shared default codec.
pub fn decode(buf: &[u8]) -> Result<(Value, usize)> {
    GraphBinaryCodec::shared().decode(buf)
}
