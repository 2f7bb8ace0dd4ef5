//! Graph structure values: elements, properties and paths.

use super::Value;

/// Reduced reference to a graph element: id and label only.
///
/// Used wherever one element points at another (edge endpoints, the vertex
/// owning a vertex property) so that payloads never expand recursively.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRef {
    pub id: Box<Value>,
    pub label: String,
}

impl ElementRef {
    pub fn new(id: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            id: Box::new(id.into()),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: Box<Value>,
    pub label: String,
    /// Vertex properties, when the server materializes them.
    pub properties: Vec<Value>,
}

impl Vertex {
    pub fn new(id: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            id: Box::new(id.into()),
            label: label.into(),
            properties: Vec::new(),
        }
    }

    /// Reference to this vertex (id and label).
    pub fn to_ref(&self) -> ElementRef {
        ElementRef {
            id: self.id.clone(),
            label: self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: Box<Value>,
    pub label: String,
    /// Incoming (head) vertex.
    pub in_v: ElementRef,
    /// Outgoing (tail) vertex.
    pub out_v: ElementRef,
    /// Edge properties, when the server materializes them.
    pub properties: Vec<Value>,
}

impl Edge {
    pub fn new(
        id: impl Into<Value>,
        out_v: ElementRef,
        label: impl Into<String>,
        in_v: ElementRef,
    ) -> Self {
        Self {
            id: Box::new(id.into()),
            label: label.into(),
            in_v,
            out_v,
            properties: Vec::new(),
        }
    }
}

/// Key/value property of an edge or vertex property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Box<Value>,
    /// Owning element, if known.
    pub element: Option<Box<Value>>,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: Box::new(value.into()),
            element: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexProperty {
    pub id: Box<Value>,
    /// Property key.
    pub label: String,
    pub value: Box<Value>,
    /// Owning vertex, if known.
    pub vertex: Option<ElementRef>,
    /// Meta-properties.
    pub properties: Vec<Value>,
}

impl VertexProperty {
    pub fn new(id: impl Into<Value>, label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: Box::new(id.into()),
            label: label.into(),
            value: Box::new(value.into()),
            vertex: None,
            properties: Vec::new(),
        }
    }
}

/// Traversal path: the objects visited and the step labels attached to each.
///
/// `labels[i]` is the label set of `objects[i]`; each inner list has unique
/// members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub labels: Vec<Vec<String>>,
    pub objects: Vec<Value>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object with its labels. Duplicate labels are dropped.
    pub fn push<I, S>(&mut self, object: impl Into<Value>, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !set.contains(&label) {
                set.push(label);
            }
        }
        self.labels.push(set);
        self.objects.push(object.into());
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
