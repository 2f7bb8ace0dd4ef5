//! Write-side dispatch from a value to its wire type.
//!
//! [`AnySerializer`] holds an ordered table of named routes. Each route pairs
//! a recognizer with a target; the first route whose recognizer accepts the
//! value decides how it is written. Order is part of the contract: explicit
//! typed wrappers come before generic number inference, so a `Byte` is never
//! widened to an `Int`.
//!
//! Built-in order:
//! 1. explicit typed wrappers
//! 2. graph structure and traversal constructs
//! 3. containers
//! 4. primitives
//! 5. generic number and boolean fallback
//! 6. null
//!
//! Custom routes registered by the caller go ahead of all built-in routes.
//!
//! # Example
//!
//! ```
//! use graphbinary_client::dispatch::{AnySerializer, Resolved};
//! use graphbinary_client::protocol::DataType;
//! use graphbinary_client::value::Value;
//!
//! let dispatch = AnySerializer::new();
//! assert_eq!(dispatch.route_names()[0], "Byte");
//! assert!(matches!(
//!     dispatch.resolve(&Value::Number(1.5)).unwrap(),
//!     Resolved::Type(DataType::DOUBLE)
//! ));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{GraphBinaryError, Result};
use crate::number::NumberSerializationStrategy;
use crate::protocol::DataType;
use crate::serializer::CustomTypeSerializer;
use crate::value::Value;

/// Predicate deciding whether a route handles a value.
pub type Recognizer = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Where a route sends a recognized value.
#[derive(Clone)]
pub enum RouteTarget {
    /// Always this data type.
    Type(DataType),
    /// The enum category named by the value.
    Enum,
    /// Inferred by the number strategy.
    Number,
    /// A caller-registered custom serializer.
    Custom(Arc<dyn CustomTypeSerializer>),
}

/// Resolved wire representation of a value.
#[derive(Clone)]
pub enum Resolved {
    Type(DataType),
    Custom(Arc<dyn CustomTypeSerializer>),
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Type(data_type) => write!(f, "Type({data_type})"),
            Resolved::Custom(custom) => write!(f, "Custom({})", custom.type_name()),
        }
    }
}

/// One `(recognizer, target)` entry of the dispatch table.
#[derive(Clone)]
pub struct Route {
    name: String,
    recognizer: Recognizer,
    target: RouteTarget,
}

impl Route {
    pub fn new<F>(name: impl Into<String>, recognizer: F, target: RouteTarget) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            recognizer: Arc::new(recognizer),
            target,
        }
    }

    /// Route for a custom type, named after it.
    pub fn custom<F>(recognizer: F, serializer: Arc<dyn CustomTypeSerializer>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(
            format!("Custom({})", serializer.type_name()),
            recognizer,
            RouteTarget::Custom(serializer),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    #[inline]
    pub fn matches(&self, value: &Value) -> bool {
        (self.recognizer)(value)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route").field("name", &self.name).finish()
    }
}

macro_rules! route {
    ($name:literal, $pattern:pat, $target:expr) => {
        Route::new($name, |value: &Value| matches!(value, $pattern), $target)
    };
}

fn builtin_routes() -> Vec<Route> {
    use RouteTarget::{Enum, Number, Type};

    vec![
        // Explicit typed wrappers
        route!("Byte", Value::Byte(_), Type(DataType::BYTE)),
        route!("Short", Value::Short(_), Type(DataType::SHORT)),
        route!("Int", Value::Int(_), Type(DataType::INT)),
        route!("Long", Value::Long(_), Type(DataType::LONG)),
        route!("Float", Value::Float(_), Type(DataType::FLOAT)),
        route!("Double", Value::Double(_), Type(DataType::DOUBLE)),
        route!("BigInteger", Value::BigInteger(_), Type(DataType::BIG_INTEGER)),
        // Graph structure and traversal constructs
        route!("Vertex", Value::Vertex(_), Type(DataType::VERTEX)),
        route!("Edge", Value::Edge(_), Type(DataType::EDGE)),
        route!("VertexProperty", Value::VertexProperty(_), Type(DataType::VERTEX_PROPERTY)),
        route!("Property", Value::Property(_), Type(DataType::PROPERTY)),
        route!("Path", Value::Path(_), Type(DataType::PATH)),
        route!("Traverser", Value::Traverser(_), Type(DataType::TRAVERSER)),
        route!("BulkSet", Value::BulkSet(_), Type(DataType::BULK_SET)),
        route!("Bytecode", Value::Bytecode(_), Type(DataType::BYTECODE)),
        route!("P", Value::P(_), Type(DataType::P)),
        route!("TextP", Value::TextP(_), Type(DataType::TEXT_P)),
        route!("Binding", Value::Binding(_), Type(DataType::BINDING)),
        route!("TraversalStrategy", Value::Strategy(_), Type(DataType::TRAVERSAL_STRATEGY)),
        route!("Lambda", Value::Lambda(_), Type(DataType::LAMBDA)),
        route!("Enum", Value::Enum(_), Enum),
        // Containers
        route!("List", Value::List(_), Type(DataType::LIST)),
        route!("Set", Value::Set(_), Type(DataType::SET)),
        route!("Map", Value::Map(_), Type(DataType::MAP)),
        // Primitives
        route!("String", Value::String(_), Type(DataType::STRING)),
        route!("Class", Value::Class(_), Type(DataType::CLASS)),
        route!("ByteBuffer", Value::Bytes(_), Type(DataType::BYTE_BUFFER)),
        route!("UUID", Value::Uuid(_), Type(DataType::UUID)),
        route!("Date", Value::Date(_), Type(DataType::DATE)),
        route!("Timestamp", Value::Timestamp(_), Type(DataType::TIMESTAMP)),
        // Fallback
        route!("Number", Value::Number(_), Number),
        route!("Boolean", Value::Bool(_), Type(DataType::BOOLEAN)),
        route!("UnspecifiedNull", Value::Null, Type(DataType::UNSPECIFIED_NULL)),
    ]
}

/// Ordered dispatch table.
#[derive(Debug, Clone)]
pub struct AnySerializer {
    routes: Vec<Route>,
    /// Number of caller-registered routes at the front of `routes`.
    custom_routes: usize,
    numbers: NumberSerializationStrategy,
}

impl AnySerializer {
    /// Create a dispatch table with the built-in routes.
    pub fn new() -> Self {
        Self {
            routes: builtin_routes(),
            custom_routes: 0,
            numbers: NumberSerializationStrategy,
        }
    }

    /// Add a caller route ahead of every built-in route.
    ///
    /// Caller routes keep their registration order among themselves.
    pub fn prepend(&mut self, route: Route) {
        tracing::debug!("Prepending dispatch route '{}'", route.name());
        self.routes.insert(self.custom_routes, route);
        self.custom_routes += 1;
    }

    /// Resolve how a value is written. The first matching route wins.
    pub fn resolve(&self, value: &Value) -> Result<Resolved> {
        let route = self
            .routes
            .iter()
            .find(|route| route.matches(value))
            .ok_or_else(|| GraphBinaryError::UnsupportedType(value.kind().to_string()))?;

        let resolved = match &route.target {
            RouteTarget::Type(data_type) => Resolved::Type(*data_type),
            RouteTarget::Custom(serializer) => Resolved::Custom(Arc::clone(serializer)),
            RouteTarget::Number => {
                let resolution = self
                    .numbers
                    .resolve(value)
                    .ok_or_else(|| GraphBinaryError::UnsupportedType(value.kind().to_string()))?;
                Resolved::Type(resolution.data_type)
            }
            RouteTarget::Enum => match value {
                Value::Enum(e) => Resolved::Type(
                    DataType::from_name(&e.type_name)
                        .filter(DataType::is_enum)
                        .ok_or_else(|| {
                            GraphBinaryError::InvalidValue(format!(
                                "unknown enum type '{}'",
                                e.type_name
                            ))
                        })?,
                ),
                other => return Err(GraphBinaryError::UnsupportedType(other.kind().to_string())),
            },
        };
        tracing::trace!("Resolved {} via route '{}' to {:?}", value.kind(), route.name(), resolved);
        Ok(resolved)
    }

    /// Route names in match order.
    pub fn route_names(&self) -> Vec<&str> {
        self.routes.iter().map(Route::name).collect()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for AnySerializer {
    fn default() -> Self {
        Self::new()
    }
}
