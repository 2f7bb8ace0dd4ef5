//! Graph structure serializers.
//!
//! Elements that point at other elements (edge endpoints, the vertex owning a
//! vertex property, the element owning a property) carry reduced references:
//! identity fields only, never properties or parents.

use super::{mismatch, Serializer};
use crate::error::{GraphBinaryError, Result};
use crate::protocol::{DataType, Envelope};
use crate::reader::ReadContext;
use crate::value::{ElementRef, Edge, Path, Property, Value, Vertex, VertexProperty};
use crate::writer::WriteContext;

/// Properties are written as null when empty, List otherwise.
fn write_properties(ctx: &mut WriteContext<'_>, properties: &[Value]) -> Result<()> {
    if properties.is_empty() {
        ctx.put_envelope(Envelope::null(DataType::LIST.code));
        Ok(())
    } else {
        ctx.put_list_fq(properties)
    }
}

fn read_properties(ctx: &mut ReadContext<'_>) -> Result<Vec<Value>> {
    match ctx.read()? {
        Value::Null => Ok(Vec::new()),
        Value::List(items) => Ok(items),
        other => Err(GraphBinaryError::InvalidValue(format!(
            "element properties must be a List, found {}",
            other.kind()
        ))),
    }
}

/// Write a reduced vertex: id, label and no properties.
fn write_vertex_ref(ctx: &mut WriteContext<'_>, vertex: &ElementRef) -> Result<()> {
    ctx.put_envelope(Envelope::present(DataType::VERTEX.code));
    ctx.write(&vertex.id, true)?;
    ctx.put_string(&vertex.label)?;
    write_properties(ctx, &[])
}

/// Write the element owning a property in reduced form.
fn write_element_ref(ctx: &mut WriteContext<'_>, element: &Value) -> Result<()> {
    let null = Envelope::null(DataType::UNSPECIFIED_NULL.code);
    match element {
        Value::Null => ctx.put_envelope(null),
        Value::Vertex(vertex) => write_vertex_ref(ctx, &vertex.to_ref())?,
        Value::Edge(edge) => {
            ctx.put_envelope(Envelope::present(DataType::EDGE.code));
            ctx.write(&edge.id, true)?;
            ctx.put_string(&edge.label)?;
            ctx.write(&edge.in_v.id, true)?;
            ctx.put_string(&edge.in_v.label)?;
            ctx.write(&edge.out_v.id, true)?;
            ctx.put_string(&edge.out_v.label)?;
            ctx.put_envelope(null);
            write_properties(ctx, &[])?;
        }
        Value::VertexProperty(vp) => {
            ctx.put_envelope(Envelope::present(DataType::VERTEX_PROPERTY.code));
            ctx.write(&vp.id, true)?;
            ctx.put_string(&vp.label)?;
            ctx.write(&vp.value, true)?;
            ctx.put_envelope(null);
            write_properties(ctx, &[])?;
        }
        other => {
            return Err(GraphBinaryError::InvalidValue(format!(
                "property element must be a graph element, found {}",
                other.kind()
            )))
        }
    }
    Ok(())
}

fn read_ref(ctx: &mut ReadContext<'_>) -> Result<ElementRef> {
    let id = ctx.read()?;
    let label = ctx.read_string()?;
    Ok(ElementRef::new(id, label))
}

pub struct VertexSerializer;

impl Serializer for VertexSerializer {
    fn data_type(&self) -> DataType {
        DataType::VERTEX
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Vertex(vertex) = value else {
            return Err(mismatch(DataType::VERTEX, value));
        };
        ctx.write(&vertex.id, true)?;
        ctx.put_string(&vertex.label)?;
        write_properties(ctx, &vertex.properties)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let id = ctx.read()?;
        let label = ctx.read_string()?;
        let mut vertex = Vertex::new(id, label);
        vertex.properties = read_properties(ctx)?;
        Ok(Value::Vertex(vertex))
    }
}

pub struct EdgeSerializer;

impl Serializer for EdgeSerializer {
    fn data_type(&self) -> DataType {
        DataType::EDGE
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Edge(edge) = value else {
            return Err(mismatch(DataType::EDGE, value));
        };
        ctx.write(&edge.id, true)?;
        ctx.put_string(&edge.label)?;
        ctx.write(&edge.in_v.id, true)?;
        ctx.put_string(&edge.in_v.label)?;
        ctx.write(&edge.out_v.id, true)?;
        ctx.put_string(&edge.out_v.label)?;
        // parent
        ctx.put_envelope(Envelope::null(DataType::UNSPECIFIED_NULL.code));
        write_properties(ctx, &edge.properties)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let id = ctx.read()?;
        let label = ctx.read_string()?;
        let in_v = read_ref(ctx)?;
        let out_v = read_ref(ctx)?;
        let _parent = ctx.read()?;
        let mut edge = Edge::new(id, out_v, label, in_v);
        edge.properties = read_properties(ctx)?;
        Ok(Value::Edge(edge))
    }
}

pub struct VertexPropertySerializer;

impl Serializer for VertexPropertySerializer {
    fn data_type(&self) -> DataType {
        DataType::VERTEX_PROPERTY
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::VertexProperty(vp) = value else {
            return Err(mismatch(DataType::VERTEX_PROPERTY, value));
        };
        ctx.write(&vp.id, true)?;
        ctx.put_string(&vp.label)?;
        ctx.write(&vp.value, true)?;
        match &vp.vertex {
            Some(vertex) => write_vertex_ref(ctx, vertex)?,
            None => ctx.put_envelope(Envelope::null(DataType::UNSPECIFIED_NULL.code)),
        }
        write_properties(ctx, &vp.properties)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let id = ctx.read()?;
        let label = ctx.read_string()?;
        let value = ctx.read()?;
        let vertex = match ctx.read()? {
            Value::Null => None,
            Value::Vertex(v) => Some(v.to_ref()),
            other => {
                return Err(GraphBinaryError::InvalidValue(format!(
                    "vertex property parent must be a Vertex, found {}",
                    other.kind()
                )))
            }
        };
        let mut vp = VertexProperty::new(id, label, value);
        vp.vertex = vertex;
        vp.properties = read_properties(ctx)?;
        Ok(Value::VertexProperty(vp))
    }
}

pub struct PropertySerializer;

impl Serializer for PropertySerializer {
    fn data_type(&self) -> DataType {
        DataType::PROPERTY
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Property(property) = value else {
            return Err(mismatch(DataType::PROPERTY, value));
        };
        ctx.put_string(&property.key)?;
        ctx.write(&property.value, true)?;
        match &property.element {
            Some(element) => write_element_ref(ctx, element),
            None => {
                ctx.put_envelope(Envelope::null(DataType::UNSPECIFIED_NULL.code));
                Ok(())
            }
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let key = ctx.read_string()?;
        let value = ctx.read()?;
        let mut property = Property::new(key, value);
        property.element = match ctx.read()? {
            Value::Null => None,
            element => Some(Box::new(element)),
        };
        Ok(Value::Property(property))
    }
}

/// ```text
/// {labels: List<Set<String>> fq}{objects: List fq}
/// ```
pub struct PathSerializer;

impl PathSerializer {
    fn write_labels(ctx: &mut WriteContext<'_>, labels: &[Vec<String>]) -> Result<()> {
        ctx.put_envelope(Envelope::present(DataType::LIST.code));
        ctx.put_length(labels.len())?;
        for set in labels {
            ctx.put_envelope(Envelope::present(DataType::SET.code));
            ctx.put_length(set.len())?;
            for label in set {
                ctx.put_string_fq(label)?;
            }
        }
        Ok(())
    }

    fn read_labels(ctx: &mut ReadContext<'_>) -> Result<Vec<Vec<String>>> {
        let Value::List(sets) = ctx.read_as(DataType::LIST, true)? else {
            return Err(GraphBinaryError::InvalidValue("path labels are null".to_string()));
        };
        sets.into_iter()
            .map(|set| match set {
                Value::Set(set) => set
                    .into_vec()
                    .into_iter()
                    .map(|label| match label {
                        Value::String(s) => Ok(s),
                        other => Err(GraphBinaryError::InvalidValue(format!(
                            "path label must be a String, found {}",
                            other.kind()
                        ))),
                    })
                    .collect::<Result<Vec<String>>>(),
                other => Err(GraphBinaryError::InvalidValue(format!(
                    "path label set must be a Set, found {}",
                    other.kind()
                ))),
            })
            .collect()
    }
}

impl Serializer for PathSerializer {
    fn data_type(&self) -> DataType {
        DataType::PATH
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Path(path) = value else {
            return Err(mismatch(DataType::PATH, value));
        };
        if path.labels.len() != path.objects.len() {
            return Err(GraphBinaryError::InvalidValue(format!(
                "path has {} label sets for {} objects",
                path.labels.len(),
                path.objects.len()
            )));
        }
        Self::write_labels(ctx, &path.labels)?;
        ctx.put_list_fq(&path.objects)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let labels = Self::read_labels(ctx)?;
        let objects = match ctx.read_as(DataType::LIST, true)? {
            Value::List(objects) => objects,
            _ => return Err(GraphBinaryError::InvalidValue("path objects are null".to_string())),
        };
        if labels.len() != objects.len() {
            return Err(GraphBinaryError::InvalidValue(format!(
                "path has {} label sets for {} objects",
                labels.len(),
                objects.len()
            )));
        }
        Ok(Value::Path(Path { labels, objects }))
    }
}
