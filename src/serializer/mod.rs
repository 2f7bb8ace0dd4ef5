//! Serializer module - one codec per GraphBinary value category.
//!
//! Each serializer only handles its payload. The envelope (type code and
//! value flag) and recursion into nested values belong to
//! [`WriteContext`] and [`ReadContext`].
//!
//! - [`primitive`] - fixed-width numerics, Boolean, UnspecifiedNull
//! - [`scalar`] - String, Class, ByteBuffer, UUID, Date, Timestamp, BigInteger
//! - [`collection`] - List, Set, Map, BulkSet
//! - [`structure`] - Vertex, Edge, VertexProperty, Property, Path
//! - [`process`] - Bytecode, P, TextP, Traverser, enums, Lambda, Binding,
//!   TraversalStrategy
//! - [`custom`] - caller-provided serializers for the Custom type code

pub mod collection;
pub mod custom;
pub mod primitive;
pub mod process;
pub mod scalar;
pub mod structure;

use std::sync::Arc;

use crate::error::{GraphBinaryError, Result};
use crate::protocol::DataType;
use crate::reader::ReadContext;
use crate::value::Value;
use crate::writer::WriteContext;

pub use custom::CustomTypeSerializer;

/// Codec for the payload of one data type.
pub trait Serializer: Send + Sync + 'static {
    /// Data type this serializer handles.
    fn data_type(&self) -> DataType;

    /// Write the payload of `value` (no envelope).
    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()>;

    /// Read a payload (the envelope has already been consumed).
    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value>;
}

/// Error for a value handed to a serializer of another type.
pub(crate) fn mismatch(data_type: DataType, value: &Value) -> GraphBinaryError {
    GraphBinaryError::UnsupportedType(format!(
        "{} serializer cannot write {}",
        data_type.name,
        value.kind()
    ))
}

/// All built-in serializers.
pub fn builtin() -> Vec<Arc<dyn Serializer>> {
    let mut serializers: Vec<Arc<dyn Serializer>> = vec![
        Arc::new(primitive::IntSerializer),
        Arc::new(primitive::LongSerializer),
        Arc::new(primitive::DoubleSerializer),
        Arc::new(primitive::FloatSerializer),
        Arc::new(primitive::ByteSerializer),
        Arc::new(primitive::ShortSerializer),
        Arc::new(primitive::BooleanSerializer),
        Arc::new(primitive::UnspecifiedNullSerializer),
        Arc::new(scalar::StringSerializer::new(DataType::STRING)),
        Arc::new(scalar::StringSerializer::new(DataType::CLASS)),
        Arc::new(scalar::ByteBufferSerializer),
        Arc::new(scalar::UuidSerializer),
        Arc::new(scalar::DateSerializer::new(DataType::DATE)),
        Arc::new(scalar::DateSerializer::new(DataType::TIMESTAMP)),
        Arc::new(scalar::BigIntegerSerializer),
        Arc::new(collection::ListSerializer),
        Arc::new(collection::SetSerializer),
        Arc::new(collection::MapSerializer),
        Arc::new(collection::BulkSetSerializer),
        Arc::new(structure::VertexSerializer),
        Arc::new(structure::EdgeSerializer),
        Arc::new(structure::VertexPropertySerializer),
        Arc::new(structure::PropertySerializer),
        Arc::new(structure::PathSerializer),
        Arc::new(process::BytecodeSerializer),
        Arc::new(process::PredicateSerializer::new(DataType::P)),
        Arc::new(process::PredicateSerializer::new(DataType::TEXT_P)),
        Arc::new(process::TraverserSerializer),
        Arc::new(process::LambdaSerializer),
        Arc::new(process::BindingSerializer),
        Arc::new(process::TraversalStrategySerializer),
    ];
    for data_type in DataType::ENUMS {
        serializers.push(Arc::new(process::EnumSerializer::new(*data_type)));
    }
    serializers
}
