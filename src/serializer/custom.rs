//! Custom type support.
//!
//! Custom values share the Custom type code (0x00). In fully-qualified form
//! the type name and an opaque type-info blob come before the value flag,
//! so a reader can tell which serializer owns the value even when it is
//! null:
//!
//! ```text
//! ┌──────┬──────────────────┬──────────────────────┬──────┬────────────────┐
//! │ 0x00 │ type name (i32+) │ type info (i32+raw)  │ flag │ custom payload │
//! └──────┴──────────────────┴──────────────────────┴──────┴────────────────┘
//! ```
//!
//! The value-only form is the custom payload alone.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use bytes::BufMut;
//! use graphbinary_client::codec::GraphBinaryCodec;
//! use graphbinary_client::error::{GraphBinaryError, Result};
//! use graphbinary_client::reader::ReadContext;
//! use graphbinary_client::serializer::CustomTypeSerializer;
//! use graphbinary_client::value::{CustomValue, Value};
//! use graphbinary_client::writer::WriteContext;
//!
//! struct Celsius;
//!
//! impl CustomTypeSerializer for Celsius {
//!     fn type_name(&self) -> &str {
//!         "demo.Celsius"
//!     }
//!
//!     fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
//!         match value {
//!             Value::Custom(c) => match *c.value {
//!                 Value::Double(d) => {
//!                     ctx.put_f64(d);
//!                     Ok(())
//!                 }
//!                 _ => Err(GraphBinaryError::InvalidValue("expected Double".into())),
//!             },
//!             _ => Err(GraphBinaryError::InvalidValue("expected Custom".into())),
//!         }
//!     }
//!
//!     fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
//!         let d = ctx.read_f64()?;
//!         Ok(Value::Custom(CustomValue::new("demo.Celsius", Value::Double(d))))
//!     }
//! }
//!
//! let codec = GraphBinaryCodec::builder()
//!     .custom_type(
//!         |v| matches!(v, Value::Custom(c) if c.type_name == "demo.Celsius"),
//!         Arc::new(Celsius),
//!     )
//!     .build();
//!
//! let value = Value::Custom(CustomValue::new("demo.Celsius", Value::Double(21.5)));
//! let bytes = codec.encode(&value).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap().0, value);
//! ```

use crate::error::Result;
use crate::reader::ReadContext;
use crate::value::Value;
use crate::writer::WriteContext;

/// Serializer for a caller-defined type under the Custom type code.
pub trait CustomTypeSerializer: Send + Sync + 'static {
    /// Type name written inline after the type code.
    fn type_name(&self) -> &str;

    /// Opaque type information written after the type name. Empty by default.
    ///
    /// Readers skip it; the serializer registered under the name interprets
    /// the payload.
    fn type_info(&self) -> &[u8] {
        &[]
    }

    /// Write the payload that follows the value flag.
    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()>;

    /// Read the payload that follows the value flag.
    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value>;
}
