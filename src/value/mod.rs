//! Value module - the tagged value algebra the codec round-trips.
//!
//! [`Value`] covers every category GraphBinary 1.0 carries between client and
//! server. Numbers come in two flavours:
//!
//! - explicit typed wrappers (`Byte`, `Short`, `Int`, `Long`, `Float`,
//!   `Double`, `BigInteger`) that are always written as exactly that type
//! - [`Value::Number`], a generic number whose wire type is inferred on write
//!   by [`NumberSerializationStrategy`](crate::number::NumberSerializationStrategy)
//!
//! Decoding always produces typed wrappers, never `Number`.
//!
//! # Example
//!
//! ```
//! use graphbinary_client::value::{Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("name", "marko");
//! map.insert("age", Value::Int(29));
//!
//! let value = Value::List(vec![Value::Map(map), Value::Null]);
//! assert_eq!(value.kind(), "List");
//! ```

mod process;
mod structure;

use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use rustc_hash::{FxHashMap, FxHasher};
use num_bigint::BigInt;
use uuid::Uuid;

use crate::protocol::MAX_SAFE_INTEGER;

pub use process::{
    Binding, Bytecode, CustomValue, EnumValue, Instruction, Lambda, Predicate,
    TraversalStrategy, Traverser,
};
pub use structure::{Edge, ElementRef, Path, Property, Vertex, VertexProperty};

/// A value that can be written to or read from GraphBinary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null of unspecified type.
    Null,
    Bool(bool),
    /// Explicit 8-bit integer.
    Byte(i8),
    /// Explicit 16-bit integer.
    Short(i16),
    Int(i32),
    /// Explicit 64-bit integer.
    Long(i64),
    /// Explicit single-precision float.
    Float(f32),
    /// Explicit double-precision float.
    Double(f64),
    /// Explicit arbitrary-precision integer.
    BigInteger(BigInt),
    /// Generic number; the wire type is inferred on write.
    Number(f64),
    String(String),
    /// Fully-qualified class name.
    Class(String),
    Bytes(Bytes),
    /// Milliseconds since the Unix epoch.
    Date(i64),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    Uuid(Uuid),
    List(Vec<Value>),
    Set(ValueSet),
    Map(ValueMap),
    Enum(EnumValue),
    Vertex(Vertex),
    Edge(Edge),
    Property(Property),
    VertexProperty(VertexProperty),
    Path(Path),
    Traverser(Traverser),
    /// Distinct values with their repetition counts.
    BulkSet(Vec<(Value, i64)>),
    Bytecode(Bytecode),
    P(Predicate),
    TextP(Predicate),
    Binding(Binding),
    Strategy(TraversalStrategy),
    Lambda(Lambda),
    Custom(CustomValue),
}

impl Value {
    /// Generic number, inferred on write.
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::BigInteger(_) => "BigInteger",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Class(_) => "Class",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::Timestamp(_) => "Timestamp",
            Value::Uuid(_) => "Uuid",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Enum(_) => "Enum",
            Value::Vertex(_) => "Vertex",
            Value::Edge(_) => "Edge",
            Value::Property(_) => "Property",
            Value::VertexProperty(_) => "VertexProperty",
            Value::Path(_) => "Path",
            Value::Traverser(_) => "Traverser",
            Value::BulkSet(_) => "BulkSet",
            Value::Bytecode(_) => "Bytecode",
            Value::P(_) => "P",
            Value::TextP(_) => "TextP",
            Value::Binding(_) => "Binding",
            Value::Strategy(_) => "Strategy",
            Value::Lambda(_) => "Lambda",
            Value::Custom(_) => "Custom",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string content of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of any integral numeric variant that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            Value::Int(v) => Some(*v as i64),
            Value::Long(v) => Some(*v),
            Value::BigInteger(v) => i64::try_from(v).ok(),
            Value::Number(v) if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
                Some(*v as i64)
            }
            _ => None,
        }
    }

    /// True when a numeric value cannot be held exactly by a generic number
    /// (magnitude above 2^53).
    pub fn exceeds_exact_integer_range(&self) -> bool {
        match self {
            Value::Long(v) => v.unsigned_abs() > MAX_SAFE_INTEGER as u64,
            Value::Number(v) => v.fract() == 0.0 && v.abs() > MAX_SAFE_INTEGER,
            Value::BigInteger(v) => {
                v.magnitude() > &num_bigint::BigUint::from(MAX_SAFE_INTEGER as u64)
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInteger(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Bytes(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Hash consistent with `Value`'s equality.
///
/// `0.0` and `-0.0` hash alike. Sets and maps hash independently of order;
/// maps hash their keys only. Graph and process structures hash a subset of
/// their fields.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Long(v) | Value::Date(v) | Value::Timestamp(v) => v.hash(state),
            Value::Float(v) => state.write_u32(if *v == 0.0 { 0 } else { v.to_bits() }),
            Value::Double(v) | Value::Number(v) => {
                state.write_u64(if *v == 0.0 { 0 } else { v.to_bits() })
            }
            Value::BigInteger(v) => v.hash(state),
            Value::String(v) | Value::Class(v) => v.hash(state),
            Value::Bytes(v) => v.hash(state),
            Value::Uuid(v) => v.hash(state),
            Value::List(items) => items.hash(state),
            Value::Set(set) => hash_unordered(set.iter(), state),
            Value::Map(map) => hash_unordered(map.iter().map(|(k, _)| k), state),
            Value::Enum(e) => {
                e.type_name.hash(state);
                e.element.hash(state);
            }
            Value::Vertex(v) => {
                v.id.hash(state);
                v.label.hash(state);
            }
            Value::Edge(e) => {
                e.id.hash(state);
                e.label.hash(state);
            }
            Value::Property(p) => {
                p.key.hash(state);
                p.value.hash(state);
            }
            Value::VertexProperty(vp) => {
                vp.id.hash(state);
                vp.label.hash(state);
            }
            Value::Path(p) => p.objects.hash(state),
            Value::Traverser(t) => {
                t.bulk.hash(state);
                t.value.hash(state);
            }
            Value::BulkSet(items) => items.len().hash(state),
            Value::Bytecode(b) => {
                b.sources.len().hash(state);
                b.steps.len().hash(state);
            }
            Value::P(p) | Value::TextP(p) => {
                p.name.hash(state);
                p.values.hash(state);
            }
            Value::Binding(b) => {
                b.key.hash(state);
                b.value.hash(state);
            }
            Value::Strategy(s) => s.class_name.hash(state),
            Value::Lambda(l) => {
                l.script.hash(state);
                l.language.hash(state);
            }
            Value::Custom(c) => {
                c.type_name.hash(state);
                c.value.hash(state);
            }
        }
    }
}

fn hash_of(value: &Value) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

fn hash_unordered<'a, H: Hasher>(items: impl ExactSizeIterator<Item = &'a Value>, state: &mut H) {
    state.write_usize(items.len());
    state.write_u64(items.fold(0u64, |acc, v| acc.wrapping_add(hash_of(v))));
}

/// Positions of entries by value hash. Collisions share a bucket and are
/// resolved by equality.
type HashIndex = FxHashMap<u64, Vec<usize>>;

/// Set with unique membership that keeps insertion order.
///
/// Equality ignores order.
#[derive(Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
    index: HashIndex,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashIndex::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a value. Returns `false` if an equal value was already present.
    pub fn insert(&mut self, value: impl Into<Value>) -> bool {
        let value = value.into();
        let hash = hash_of(&value);
        if self.position(hash, &value).is_some() {
            return false;
        }
        self.index.entry(hash).or_default().push(self.items.len());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.position(hash_of(value), value).is_some()
    }

    fn position(&self, hash: u64, value: &Value) -> Option<usize> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&i| self.items[i] == *value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.items).finish()
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|v| other.contains(v))
    }
}

impl<V: Into<Value>> FromIterator<V> for ValueSet {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Map with heterogeneous keys and values.
///
/// Keys may be any value, including lists and maps. Entries keep insertion
/// order; equality ignores it.
#[derive(Clone, Default)]
pub struct ValueMap {
    entries: Vec<(Value, Value)>,
    index: HashIndex,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashIndex::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a pair, replacing the value of an equal key.
    ///
    /// Returns the previous value for that key.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let hash = hash_of(&key);
        if let Some(i) = self.position(hash, &key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.entry(hash).or_default().push(self.entries.len());
        self.entries.push((key, value));
        None
    }

    fn position(&self, hash: u64, key: &Value) -> Option<usize> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&i| self.entries[i].0 == *key)
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(hash_of(key), key).map(|i| &self.entries[i].1)
    }

    /// Look up by string key.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.get(&Value::from(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Value, Value)> {
        self.entries.iter()
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = &'a (Value, Value);
    type IntoIter = std::slice::Iter<'a, (Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_insertion_order_and_uniqueness() {
        let mut set = ValueSet::new();
        assert!(set.insert("b"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));
        let items: Vec<_> = set.iter().filter_map(Value::as_str).collect();
        assert_eq!(items, vec!["b", "a"]);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a: ValueMap = vec![("x", Value::Int(1)), ("y", Value::Int(2))]
            .into_iter()
            .collect();
        let b: ValueMap = vec![("y", Value::Int(2)), ("x", Value::Int(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_insert_replaces_existing_key() {
        let mut map = ValueMap::new();
        assert!(map.insert("k", 1).is_none());
        assert_eq!(map.insert("k", 2), Some(Value::Int(1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_str("k"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_map_with_non_string_keys() {
        let mut map = ValueMap::new();
        map.insert(Value::List(vec![Value::Int(1)]), "list-key");
        map.insert(Value::Null, "null-key");
        assert_eq!(
            map.get(&Value::List(vec![Value::Int(1)])),
            Some(&Value::from("list-key"))
        );
        assert_eq!(map.get(&Value::Null), Some(&Value::from("null-key")));
    }

    #[test]
    fn test_map_keys_follow_value_equality() {
        let mut map = ValueMap::new();
        map.insert(Value::Double(0.0), "zero");
        assert_eq!(map.insert(Value::Double(-0.0), "negative zero"), Some(Value::from("zero")));

        let ab: ValueSet = ["a", "b"].into_iter().collect();
        let ba: ValueSet = ["b", "a"].into_iter().collect();
        map.insert(Value::Set(ab), "set");
        assert_eq!(map.get(&Value::Set(ba)), Some(&Value::from("set")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_set_membership_after_many_inserts() {
        let set: ValueSet = (0..10_000).map(Value::Int).collect();
        assert_eq!(set.len(), 10_000);
        assert!(set.contains(&Value::Int(9_999)));
        assert!(!set.contains(&Value::Long(9_999)));
        assert_eq!(set.iter().next(), Some(&Value::Int(0)));
    }

    #[test]
    fn test_exact_integer_range() {
        let limit = 1i64 << 53;
        assert!(!Value::Long(limit).exceeds_exact_integer_range());
        assert!(Value::Long(limit + 1).exceeds_exact_integer_range());
        assert!(Value::Long(i64::MIN).exceeds_exact_integer_range());
        assert!(!Value::Number(limit as f64).exceeds_exact_integer_range());
        assert!(Value::Number(limit as f64 + 2.0).exceeds_exact_integer_range());
        assert!(Value::BigInteger(BigInt::from(limit + 1)).exceeds_exact_integer_range());
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Value::Byte(-3).as_i64(), Some(-3));
        assert_eq!(Value::Number(42.0).as_i64(), Some(42));
        assert_eq!(Value::Number(4.5).as_i64(), None);
        assert_eq!(Value::from("1").as_i64(), None);
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }
}
