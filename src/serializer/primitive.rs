//! Fixed-width serializers: numerics, Boolean and UnspecifiedNull.
//!
//! ```text
//! Int    4 bytes  i32 BE
//! Long   8 bytes  i64 BE
//! Double 8 bytes  IEEE 754 BE
//! Float  4 bytes  IEEE 754 BE
//! Byte   1 byte   i8
//! Short  2 bytes  i16 BE
//! Bool   1 byte   0x00 | 0x01
//! ```

use bytes::BufMut;

use super::{mismatch, Serializer};
use crate::error::{GraphBinaryError, Result};
use crate::protocol::{value_flag, DataType};
use crate::reader::ReadContext;
use crate::value::Value;
use crate::writer::WriteContext;

pub struct IntSerializer;

impl Serializer for IntSerializer {
    fn data_type(&self) -> DataType {
        DataType::INT
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let v = match value {
            Value::Int(v) => *v,
            Value::Number(n)
                if n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64 =>
            {
                *n as i32
            }
            other => return Err(mismatch(DataType::INT, other)),
        };
        ctx.put_i32(v);
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Int(ctx.read_i32()?))
    }
}

pub struct LongSerializer;

impl Serializer for LongSerializer {
    fn data_type(&self) -> DataType {
        DataType::LONG
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let v = match value {
            Value::Long(v) => *v,
            Value::Number(n) => {
                let policy = ctx.config().precision;
                ctx.numbers().to_long(*n, policy)?
            }
            other => return Err(mismatch(DataType::LONG, other)),
        };
        ctx.put_i64(v);
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Long(ctx.read_i64()?))
    }
}

pub struct DoubleSerializer;

impl Serializer for DoubleSerializer {
    fn data_type(&self) -> DataType {
        DataType::DOUBLE
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let v = match value {
            Value::Double(v) | Value::Number(v) => *v,
            other => return Err(mismatch(DataType::DOUBLE, other)),
        };
        ctx.put_f64(v);
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Double(ctx.read_f64()?))
    }
}

pub struct FloatSerializer;

impl Serializer for FloatSerializer {
    fn data_type(&self) -> DataType {
        DataType::FLOAT
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Float(v) => {
                ctx.put_f32(*v);
                Ok(())
            }
            other => Err(mismatch(DataType::FLOAT, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Float(ctx.read_f32()?))
    }
}

pub struct ByteSerializer;

impl Serializer for ByteSerializer {
    fn data_type(&self) -> DataType {
        DataType::BYTE
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Byte(v) => {
                ctx.put_i8(*v);
                Ok(())
            }
            other => Err(mismatch(DataType::BYTE, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Byte(ctx.read_i8()?))
    }
}

pub struct ShortSerializer;

impl Serializer for ShortSerializer {
    fn data_type(&self) -> DataType {
        DataType::SHORT
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Short(v) => {
                ctx.put_i16(*v);
                Ok(())
            }
            other => Err(mismatch(DataType::SHORT, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Short(ctx.read_i16()?))
    }
}

pub struct BooleanSerializer;

impl Serializer for BooleanSerializer {
    fn data_type(&self) -> DataType {
        DataType::BOOLEAN
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Bool(v) => {
                ctx.put_u8(u8::from(*v));
                Ok(())
            }
            other => Err(mismatch(DataType::BOOLEAN, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        match ctx.read_u8()? {
            0x00 => Ok(Value::Bool(false)),
            0x01 => Ok(Value::Bool(true)),
            other => Err(GraphBinaryError::InvalidValue(format!(
                "boolean byte 0x{other:02x}"
            ))),
        }
    }
}

/// Null of unspecified type. Only ever appears with the null flag set.
pub struct UnspecifiedNullSerializer;

impl Serializer for UnspecifiedNullSerializer {
    fn data_type(&self) -> DataType {
        DataType::UNSPECIFIED_NULL
    }

    fn write_payload(&self, value: &Value, _ctx: &mut WriteContext<'_>) -> Result<()> {
        Err(mismatch(DataType::UNSPECIFIED_NULL, value))
    }

    fn read_payload(&self, _ctx: &mut ReadContext<'_>) -> Result<Value> {
        // Reached only when the value flag said "present".
        Err(GraphBinaryError::InvalidValueFlag(value_flag::PRESENT))
    }
}
