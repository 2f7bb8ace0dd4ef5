//! GraphBinary writer.
//!
//! The writer resolves the wire type of a value through the
//! [`AnySerializer`] chain, emits the envelope and delegates the payload to
//! the registered serializer. Composite serializers recurse through the
//! [`WriteContext`], which carries the output buffer and nesting depth.
//!
//! # Example
//!
//! ```
//! use graphbinary_client::codec::GraphBinaryCodec;
//! use graphbinary_client::value::Value;
//!
//! let codec = GraphBinaryCodec::new();
//! let bytes = codec.writer().write(&Value::Null, true).unwrap();
//! assert_eq!(&bytes[..], &[0xfe, 0x01]);
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::CodecConfig;
use crate::dispatch::{AnySerializer, Resolved};
use crate::error::{GraphBinaryError, Result};
use crate::number::NumberSerializationStrategy;
use crate::protocol::{encode_length, value_flag, DataType, Envelope};
use crate::registry::DataTypeRegistry;
use crate::value::Value;

/// Top-level writer.
pub struct GraphBinaryWriter {
    dispatch: AnySerializer,
    registry: Arc<DataTypeRegistry>,
    numbers: NumberSerializationStrategy,
    config: CodecConfig,
}

impl GraphBinaryWriter {
    /// Create a writer over a dispatch chain and registry.
    pub fn new(dispatch: AnySerializer, registry: Arc<DataTypeRegistry>, config: CodecConfig) -> Self {
        Self {
            dispatch,
            registry,
            numbers: NumberSerializationStrategy,
            config,
        }
    }

    /// Write a value.
    ///
    /// With `fully_qualified` the output starts with the envelope; otherwise
    /// only the payload is written and the reader must know the type.
    pub fn write(&self, value: &Value, fully_qualified: bool) -> Result<Bytes> {
        let mut ctx = WriteContext::new(self);
        ctx.write(value, fully_qualified)?;
        Ok(ctx.finish())
    }

    /// Write a value as a fixed data type, bypassing dispatch.
    pub fn write_as(&self, data_type: DataType, value: &Value, fully_qualified: bool) -> Result<Bytes> {
        let mut ctx = WriteContext::new(self);
        if fully_qualified {
            ctx.write_typed(data_type, value)?;
        } else {
            ctx.write_as(data_type, value)?;
        }
        Ok(ctx.finish())
    }

    /// The dispatch chain used to resolve wire types.
    pub fn dispatch(&self) -> &AnySerializer {
        &self.dispatch
    }

    /// Configuration this writer was built with.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

/// Output buffer plus recursion state for one write call.
///
/// Dereferences to the underlying `BytesMut`, so `bytes::BufMut` methods
/// (`put_i32`, `put_slice`, ...) write straight into the output.
pub struct WriteContext<'a> {
    writer: &'a GraphBinaryWriter,
    buf: BytesMut,
    depth: usize,
}

impl<'a> WriteContext<'a> {
    fn new(writer: &'a GraphBinaryWriter) -> Self {
        Self {
            writer,
            buf: BytesMut::with_capacity(writer.config.initial_capacity),
            depth: 0,
        }
    }

    /// Finish the write and take the output.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    /// Write a nested value, resolving its type through dispatch.
    pub fn write(&mut self, value: &Value, fully_qualified: bool) -> Result<()> {
        self.enter()?;
        let result = self.write_resolved(value, fully_qualified);
        self.depth -= 1;
        result
    }

    /// Write a fully-qualified value of a fixed type.
    ///
    /// `Value::Null` is written as a null of `data_type`.
    pub fn write_typed(&mut self, data_type: DataType, value: &Value) -> Result<()> {
        if value.is_null() {
            self.put_envelope(Envelope::null(data_type.code));
            return Ok(());
        }
        self.put_envelope(Envelope::present(data_type.code));
        self.write_as(data_type, value)
    }

    /// Write the payload of a value of a fixed type (value-only form).
    pub fn write_as(&mut self, data_type: DataType, value: &Value) -> Result<()> {
        self.enter()?;
        let writer = self.writer;
        let result = writer
            .registry
            .lookup(data_type.code)
            .and_then(|serializer| serializer.write_payload(value, self));
        self.depth -= 1;
        result
    }

    fn write_resolved(&mut self, value: &Value, fully_qualified: bool) -> Result<()> {
        let writer = self.writer;
        match writer.dispatch.resolve(value)? {
            Resolved::Type(data_type) => {
                if value.is_null() {
                    if !fully_qualified {
                        return Err(GraphBinaryError::UnsupportedType(
                            "null has no value-only form".to_string(),
                        ));
                    }
                    self.put_envelope(Envelope::null(data_type.code));
                    return Ok(());
                }
                let serializer = writer.registry.lookup(data_type.code)?;
                if fully_qualified {
                    self.put_envelope(Envelope::present(data_type.code));
                }
                serializer.write_payload(value, self)
            }
            Resolved::Custom(custom) => {
                if fully_qualified {
                    // 0x00 | name | type info | flag | payload
                    self.buf.put_u8(DataType::CUSTOM.code);
                    self.put_string(custom.type_name())?;
                    let info = custom.type_info();
                    self.put_length(info.len())?;
                    self.buf.put_slice(info);
                    self.buf.put_u8(value_flag::PRESENT);
                }
                custom.write_payload(value, self)
            }
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.writer.config.max_depth {
            return Err(GraphBinaryError::NestingTooDeep(self.writer.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Write an envelope.
    #[inline]
    pub fn put_envelope(&mut self, envelope: Envelope) {
        self.buf.put_slice(&envelope.encode());
    }

    /// Write a length or count prefix.
    pub fn put_length(&mut self, len: usize) -> Result<()> {
        let len = encode_length(len)?;
        self.buf.put_i32(len);
        Ok(())
    }

    /// Write a value-only String.
    pub fn put_string(&mut self, s: &str) -> Result<()> {
        self.put_length(s.len())?;
        self.buf.put_slice(s.as_bytes());
        Ok(())
    }

    /// Write a fully-qualified String.
    pub fn put_string_fq(&mut self, s: &str) -> Result<()> {
        self.put_envelope(Envelope::present(DataType::STRING.code));
        self.put_string(s)
    }

    /// Write a fully-qualified List of values.
    pub fn put_list_fq(&mut self, items: &[Value]) -> Result<()> {
        self.put_envelope(Envelope::present(DataType::LIST.code));
        self.put_length(items.len())?;
        for item in items {
            self.write(item, true)?;
        }
        Ok(())
    }

    /// Number resolution strategy.
    pub fn numbers(&self) -> &NumberSerializationStrategy {
        &self.writer.numbers
    }

    pub fn config(&self) -> &CodecConfig {
        &self.writer.config
    }
}

impl Deref for WriteContext<'_> {
    type Target = BytesMut;

    fn deref(&self) -> &BytesMut {
        &self.buf
    }
}

impl DerefMut for WriteContext<'_> {
    fn deref_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }
}
