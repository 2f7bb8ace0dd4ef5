//! Data type registry mapping type codes to serializers.
//!
//! The registry is built once and then shared immutably (`Arc`) by the
//! reader and writer. Custom types live under the single Custom type code
//! and are told apart by an inline type name.
//!
//! # Example
//!
//! ```
//! use graphbinary_client::protocol::DataType;
//! use graphbinary_client::registry::DataTypeRegistry;
//!
//! let registry = DataTypeRegistry::new();
//! assert_eq!(registry.lookup(0x03).unwrap().data_type(), DataType::STRING);
//! assert_eq!(registry.code_for("Direction").unwrap(), 0x18);
//! assert!(registry.lookup(0x22).is_err()); // BigDecimal is not implemented
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GraphBinaryError, Result};
use crate::protocol::DataType;
use crate::serializer::{self, CustomTypeSerializer, Serializer};

/// Registry of serializers by type code and custom serializers by name.
pub struct DataTypeRegistry {
    /// Built-in serializers by type code.
    serializers: HashMap<u8, Arc<dyn Serializer>>,
    /// Custom serializers by type name.
    custom: HashMap<String, Arc<dyn CustomTypeSerializer>>,
}

impl DataTypeRegistry {
    /// Create a registry with all built-in serializers.
    pub fn new() -> Self {
        let serializers = serializer::builtin()
            .into_iter()
            .map(|s| (s.data_type().code, s))
            .collect();
        Self {
            serializers,
            custom: HashMap::new(),
        }
    }

    /// Register a custom serializer under its type name.
    ///
    /// A later registration with the same name replaces the earlier one.
    pub fn register_custom(&mut self, serializer: Arc<dyn CustomTypeSerializer>) {
        let name = serializer.type_name().to_string();
        tracing::debug!("Registered custom type '{}'", name);
        self.custom.insert(name, serializer);
    }

    /// Look up the serializer for a type code.
    ///
    /// Codes defined by GraphBinary but not implemented here fail with
    /// `UnsupportedType`; codes GraphBinary does not define fail with
    /// `UnknownTypeCode`.
    pub fn lookup(&self, code: u8) -> Result<&dyn Serializer> {
        if let Some(serializer) = self.serializers.get(&code) {
            return Ok(serializer.as_ref());
        }
        match DataType::from_code(code) {
            Some(data_type) => Err(GraphBinaryError::UnsupportedType(data_type.to_string())),
            None => Err(GraphBinaryError::UnknownTypeCode(code)),
        }
    }

    /// Look up the type code registered for a type name.
    pub fn code_for(&self, name: &str) -> Result<u8> {
        DataType::from_name(name)
            .filter(|data_type| self.serializers.contains_key(&data_type.code))
            .map(|data_type| data_type.code)
            .ok_or_else(|| GraphBinaryError::UnsupportedType(name.to_string()))
    }

    /// Look up a custom serializer by type name.
    pub fn custom(&self, type_name: &str) -> Result<&dyn CustomTypeSerializer> {
        self.custom
            .get(type_name)
            .map(|s| s.as_ref())
            .ok_or_else(|| GraphBinaryError::UnsupportedType(format!("custom type '{type_name}'")))
    }

    /// Check if a type code has a serializer.
    pub fn contains(&self, code: u8) -> bool {
        self.serializers.contains_key(&code)
    }

    /// Number of built-in serializers.
    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    /// True when no built-in serializer is registered.
    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }
}

impl Default for DataTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
