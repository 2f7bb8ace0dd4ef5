//! GraphBinary reader.
//!
//! Reads the type code, resolves the serializer through the
//! [`DataTypeRegistry`], checks the value flag and delegates the payload.
//! The input is borrowed read-only; the reader reports how many bytes the
//! value occupied so the caller can continue with the next one.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::config::CodecConfig;
use crate::error::{GraphBinaryError, Result};
use crate::protocol::{value_flag, ByteCursor, DataType, Envelope};
use crate::registry::DataTypeRegistry;
use crate::value::Value;

/// Top-level reader.
pub struct GraphBinaryReader {
    registry: Arc<DataTypeRegistry>,
    config: CodecConfig,
}

impl GraphBinaryReader {
    /// Create a reader resolving type codes through `registry`.
    pub fn new(registry: Arc<DataTypeRegistry>, config: CodecConfig) -> Self {
        Self { registry, config }
    }

    /// Read one fully-qualified value starting at `offset`.
    ///
    /// Returns the value and the offset just past it.
    pub fn read(&self, buf: &[u8], offset: usize) -> Result<(Value, usize)> {
        let mut ctx = ReadContext::new(self, buf, offset)?;
        let value = ctx.read()?;
        Ok((value, ctx.position()))
    }

    /// Read one value of a known data type starting at `offset`.
    ///
    /// With `fully_qualified` the envelope is read and its type code must
    /// match `data_type`; otherwise only the payload is read.
    pub fn read_as(
        &self,
        data_type: DataType,
        buf: &[u8],
        offset: usize,
        fully_qualified: bool,
    ) -> Result<(Value, usize)> {
        let mut ctx = ReadContext::new(self, buf, offset)?;
        let value = ctx.read_as(data_type, fully_qualified)?;
        Ok((value, ctx.position()))
    }

    /// Registry used to resolve type codes and custom type names.
    pub fn registry(&self) -> &DataTypeRegistry {
        &self.registry
    }
}

/// Input cursor plus recursion state for one read call.
///
/// Dereferences to [`ByteCursor`] for primitive reads.
pub struct ReadContext<'a> {
    reader: &'a GraphBinaryReader,
    cursor: ByteCursor<'a>,
    depth: usize,
}

impl<'a> ReadContext<'a> {
    fn new(reader: &'a GraphBinaryReader, buf: &'a [u8], offset: usize) -> Result<Self> {
        Ok(Self {
            reader,
            cursor: ByteCursor::new(buf, offset)?,
            depth: 0,
        })
    }

    /// Read a nested fully-qualified value of any type.
    pub fn read(&mut self) -> Result<Value> {
        self.enter()?;
        let result = self.read_fully_qualified();
        self.depth -= 1;
        result
    }

    /// Read a nested value of a known data type.
    pub fn read_as(&mut self, data_type: DataType, fully_qualified: bool) -> Result<Value> {
        self.enter()?;
        let result = self.read_known(data_type, fully_qualified);
        self.depth -= 1;
        result
    }

    fn read_fully_qualified(&mut self) -> Result<Value> {
        let reader = self.reader;
        let type_code = self.cursor.read_u8()?;

        if type_code == DataType::CUSTOM.code {
            let type_name = self.cursor.read_string()?;
            let _type_info = self.cursor.read_sized_bytes()?;
            if self.read_value_flag()? {
                return Ok(Value::Null);
            }
            let custom = reader.registry.custom(&type_name)?;
            return custom.read_payload(self);
        }

        let serializer = reader.registry.lookup(type_code)?;
        if self.read_value_flag()? {
            return Ok(Value::Null);
        }
        serializer.read_payload(self)
    }

    fn read_known(&mut self, data_type: DataType, fully_qualified: bool) -> Result<Value> {
        let reader = self.reader;
        let serializer = reader.registry.lookup(data_type.code)?;
        if fully_qualified {
            let type_code = self.cursor.read_u8()?;
            if type_code != data_type.code && type_code != DataType::UNSPECIFIED_NULL.code {
                return Err(GraphBinaryError::InvalidValue(format!(
                    "expected {}, found type code 0x{:02x}",
                    data_type, type_code
                )));
            }
            if self.read_value_flag()? {
                return Ok(Value::Null);
            }
            if type_code == DataType::UNSPECIFIED_NULL.code {
                return Err(GraphBinaryError::InvalidValueFlag(value_flag::PRESENT));
            }
        }
        serializer.read_payload(self)
    }

    /// Read the value flag. Returns `true` for null.
    fn read_value_flag(&mut self) -> Result<bool> {
        let envelope = Envelope {
            type_code: 0,
            value_flag: self.cursor.read_u8()?,
        };
        envelope.validate()?;
        Ok(envelope.is_null())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.reader.config.max_depth {
            return Err(GraphBinaryError::NestingTooDeep(self.reader.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Configuration of the reader driving this context.
    pub fn config(&self) -> &CodecConfig {
        &self.reader.config
    }
}

impl<'a> Deref for ReadContext<'a> {
    type Target = ByteCursor<'a>;

    fn deref(&self) -> &ByteCursor<'a> {
        &self.cursor
    }
}

impl<'a> DerefMut for ReadContext<'a> {
    fn deref_mut(&mut self) -> &mut ByteCursor<'a> {
        &mut self.cursor
    }
}
