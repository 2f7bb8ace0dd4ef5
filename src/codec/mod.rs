//! Codec facade: a configured writer and reader pair.
//!
//! [`GraphBinaryCodec`] is what the transport layer holds. It is cheap to
//! clone and safe to share across threads; the registry and dispatch chain
//! are immutable once built.
//!
//! # Example
//!
//! ```
//! use graphbinary_client::codec::GraphBinaryCodec;
//! use graphbinary_client::value::Value;
//!
//! let codec = GraphBinaryCodec::new();
//! let bytes = codec.encode(&Value::from("hello")).unwrap();
//! let (value, consumed) = codec.decode(&bytes).unwrap();
//! assert_eq!(value, Value::from("hello"));
//! assert_eq!(consumed, bytes.len());
//! ```

use std::sync::{Arc, OnceLock};

use bytes::Bytes;

use crate::config::CodecConfig;
use crate::dispatch::{AnySerializer, Route};
use crate::error::Result;
use crate::protocol::DataType;
use crate::reader::GraphBinaryReader;
use crate::registry::DataTypeRegistry;
use crate::serializer::CustomTypeSerializer;
use crate::value::Value;
use crate::writer::GraphBinaryWriter;

/// Builder for a [`GraphBinaryCodec`].
///
/// Custom types are registered here; once built, the codec is immutable.
pub struct GraphBinaryCodecBuilder {
    config: CodecConfig,
    registry: DataTypeRegistry,
    dispatch: AnySerializer,
}

impl GraphBinaryCodecBuilder {
    pub fn new() -> Self {
        Self {
            config: CodecConfig::default(),
            registry: DataTypeRegistry::new(),
            dispatch: AnySerializer::new(),
        }
    }

    /// Replace the codec configuration.
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a custom type.
    ///
    /// `recognizer` decides which values the serializer writes. Custom
    /// recognizers are tried before every built-in one, in registration
    /// order. On read the serializer is found by its type name.
    pub fn custom_type<F>(mut self, recognizer: F, serializer: Arc<dyn CustomTypeSerializer>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.registry.register_custom(Arc::clone(&serializer));
        self.dispatch.prepend(Route::custom(recognizer, serializer));
        self
    }

    pub fn build(self) -> GraphBinaryCodec {
        tracing::debug!(
            "Built codec: {} serializers, {} routes, max depth {}",
            self.registry.len(),
            self.dispatch.routes().len(),
            self.config.max_depth
        );
        let registry = Arc::new(self.registry);
        GraphBinaryCodec {
            writer: Arc::new(GraphBinaryWriter::new(
                self.dispatch,
                Arc::clone(&registry),
                self.config.clone(),
            )),
            reader: Arc::new(GraphBinaryReader::new(registry, self.config)),
        }
    }
}

impl Default for GraphBinaryCodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// GraphBinary 1.0 encoder/decoder.
#[derive(Clone)]
pub struct GraphBinaryCodec {
    writer: Arc<GraphBinaryWriter>,
    reader: Arc<GraphBinaryReader>,
}

impl GraphBinaryCodec {
    /// Codec with built-in types and default configuration.
    pub fn new() -> Self {
        GraphBinaryCodecBuilder::new().build()
    }

    pub fn builder() -> GraphBinaryCodecBuilder {
        GraphBinaryCodecBuilder::new()
    }

    /// Process-wide default codec, built on first use.
    pub fn shared() -> &'static GraphBinaryCodec {
        static SHARED: OnceLock<GraphBinaryCodec> = OnceLock::new();
        SHARED.get_or_init(GraphBinaryCodec::new)
    }

    /// Encode a value in fully-qualified form.
    pub fn encode(&self, value: &Value) -> Result<Bytes> {
        self.writer.write(value, true)
    }

    /// Decode one fully-qualified value from the start of `buf`.
    ///
    /// Returns the value and the number of bytes it occupied. Trailing
    /// bytes are left alone.
    pub fn decode(&self, buf: &[u8]) -> Result<(Value, usize)> {
        self.reader.read(buf, 0)
    }

    /// Encode a value as a fixed data type, bypassing dispatch.
    pub fn encode_as(&self, data_type: DataType, value: &Value, fully_qualified: bool) -> Result<Bytes> {
        self.writer.write_as(data_type, value, fully_qualified)
    }

    /// Decode a value of a known data type starting at `offset`.
    pub fn decode_as(
        &self,
        data_type: DataType,
        buf: &[u8],
        offset: usize,
        fully_qualified: bool,
    ) -> Result<(Value, usize)> {
        self.reader.read_as(data_type, buf, offset, fully_qualified)
    }

    pub fn writer(&self) -> &GraphBinaryWriter {
        &self.writer
    }

    pub fn reader(&self) -> &GraphBinaryReader {
        &self.reader
    }
}

impl Default for GraphBinaryCodec {
    fn default() -> Self {
        Self::new()
    }
}
