//! Variable-length and temporal scalar serializers.
//!
//! ```text
//! String / Class  {len: i32}{UTF-8 bytes}
//! ByteBuffer      {len: i32}{bytes}
//! BigInteger      {len: i32}{two's complement, big-endian}
//! UUID            {16 bytes, most significant first}
//! Date/Timestamp  {ms since epoch: i64}
//! ```

use bytes::{BufMut, Bytes};
use num_bigint::BigInt;
use uuid::Uuid;

use super::{mismatch, Serializer};
use crate::error::Result;
use crate::protocol::DataType;
use crate::reader::ReadContext;
use crate::value::Value;
use crate::writer::WriteContext;

/// String payload, shared by String and Class.
pub struct StringSerializer {
    data_type: DataType,
}

impl StringSerializer {
    pub fn new(data_type: DataType) -> Self {
        Self { data_type }
    }
}

impl Serializer for StringSerializer {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let is_class = self.data_type == DataType::CLASS;
        match value {
            Value::String(s) if !is_class => ctx.put_string(s),
            Value::Class(s) if is_class => ctx.put_string(s),
            other => Err(mismatch(self.data_type, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let s = ctx.read_string()?;
        Ok(if self.data_type == DataType::CLASS {
            Value::Class(s)
        } else {
            Value::String(s)
        })
    }
}

pub struct ByteBufferSerializer;

impl Serializer for ByteBufferSerializer {
    fn data_type(&self) -> DataType {
        DataType::BYTE_BUFFER
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Bytes(b) => {
                ctx.put_length(b.len())?;
                ctx.put_slice(b);
                Ok(())
            }
            other => Err(mismatch(DataType::BYTE_BUFFER, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let raw = ctx.read_sized_bytes()?;
        Ok(Value::Bytes(Bytes::copy_from_slice(raw)))
    }
}

pub struct UuidSerializer;

impl Serializer for UuidSerializer {
    fn data_type(&self) -> DataType {
        DataType::UUID
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Uuid(u) => {
                ctx.put_slice(u.as_bytes());
                Ok(())
            }
            other => Err(mismatch(DataType::UUID, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Uuid(Uuid::from_bytes(ctx.read_uuid_bytes()?)))
    }
}

/// Milliseconds since epoch, shared by Date and Timestamp.
pub struct DateSerializer {
    data_type: DataType,
}

impl DateSerializer {
    pub fn new(data_type: DataType) -> Self {
        Self { data_type }
    }
}

impl Serializer for DateSerializer {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let is_timestamp = self.data_type == DataType::TIMESTAMP;
        match value {
            Value::Date(ms) if !is_timestamp => ctx.put_i64(*ms),
            Value::Timestamp(ms) if is_timestamp => ctx.put_i64(*ms),
            other => return Err(mismatch(self.data_type, other)),
        }
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let ms = ctx.read_i64()?;
        Ok(if self.data_type == DataType::TIMESTAMP {
            Value::Timestamp(ms)
        } else {
            Value::Date(ms)
        })
    }
}

pub struct BigIntegerSerializer;

impl Serializer for BigIntegerSerializer {
    fn data_type(&self) -> DataType {
        DataType::BIG_INTEGER
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::BigInteger(v) => {
                let raw = v.to_signed_bytes_be();
                ctx.put_length(raw.len())?;
                ctx.put_slice(&raw);
                Ok(())
            }
            other => Err(mismatch(DataType::BIG_INTEGER, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let raw = ctx.read_sized_bytes()?;
        Ok(Value::BigInteger(BigInt::from_signed_bytes_be(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::GraphBinaryCodec;
    use crate::error::GraphBinaryError;

    fn roundtrip(value: &Value) -> Value {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(value).unwrap();
        let (decoded, consumed) = codec.decode(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        decoded
    }

    #[test]
    fn test_string_layout() {
        let bytes = GraphBinaryCodec::new().encode(&Value::from("abc")).unwrap();
        assert_eq!(&bytes[..], &hex::decode("030000000003616263").unwrap()[..]);
    }

    #[test]
    fn test_string_multibyte() {
        let value = Value::from("héllo ✓");
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn test_empty_string_is_not_null() {
        let bytes = GraphBinaryCodec::new().encode(&Value::from("")).unwrap();
        assert_eq!(&bytes[..], &[0x03, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(roundtrip(&Value::from("")), Value::from(""));
    }

    #[test]
    fn test_class_keeps_its_type() {
        let value = Value::Class("org.example.Strategy".into());
        let bytes = GraphBinaryCodec::new().encode(&value).unwrap();
        assert_eq!(bytes[0], 0x06);
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn test_uuid_layout() {
        let uuid = Uuid::parse_str("41d2e28a-20a4-4ab0-b379-d810dede3786").unwrap();
        let bytes = GraphBinaryCodec::new().encode(&Value::Uuid(uuid)).unwrap();
        assert_eq!(
            &bytes[..],
            &hex::decode("0c0041d2e28a20a44ab0b379d810dede3786").unwrap()[..]
        );
        assert_eq!(roundtrip(&Value::Uuid(uuid)), Value::Uuid(uuid));
    }

    #[test]
    fn test_date_and_timestamp_stay_distinct() {
        let date = Value::Date(1_481_750_076_295);
        let ts = Value::Timestamp(1_481_750_076_295);
        assert_eq!(roundtrip(&date), date);
        assert_eq!(roundtrip(&ts), ts);
        let bytes = GraphBinaryCodec::new().encode(&ts).unwrap();
        assert_eq!(bytes[0], 0x05);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let value = Value::Bytes(Bytes::from_static(&[0, 1, 2, 255]));
        let bytes = GraphBinaryCodec::new().encode(&value).unwrap();
        assert_eq!(&bytes[..], &hex::decode("250000000004000102ff").unwrap()[..]);
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn test_big_integer_layout() {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(&Value::BigInteger(BigInt::from(-1))).unwrap();
        assert_eq!(&bytes[..], &hex::decode("230000000001ff").unwrap()[..]);

        let bytes = codec.encode(&Value::BigInteger(BigInt::from(128))).unwrap();
        assert_eq!(&bytes[..], &hex::decode("2300000000020080").unwrap()[..]);
    }

    #[test]
    fn test_big_integer_beyond_long() {
        let value = Value::BigInteger(BigInt::from(u64::MAX) * BigInt::from(1_000_000));
        assert_eq!(roundtrip(&value), value);
        let negative = Value::BigInteger(-(BigInt::from(u64::MAX) * 7u32));
        assert_eq!(roundtrip(&negative), negative);
    }

    #[test]
    fn test_string_length_beyond_input() {
        let bytes = hex::decode("0300000000ff6162").unwrap();
        assert!(matches!(
            GraphBinaryCodec::new().decode(&bytes),
            Err(GraphBinaryError::MalformedLength { length: 255, remaining: 2 })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = hex::decode("030000000002c328").unwrap();
        assert!(matches!(
            GraphBinaryCodec::new().decode(&bytes),
            Err(GraphBinaryError::InvalidUtf8(_))
        ));
    }
}
