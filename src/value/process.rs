//! Traversal-construct values: bytecode, predicates, strategies and results.

use super::{Value, ValueMap};

/// Element of one of the GraphBinary enum categories (`T`, `Order`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Category name, e.g. `"Direction"`.
    pub type_name: String,
    /// Element name, e.g. `"OUT"`.
    pub element: String,
}

impl EnumValue {
    pub fn new(type_name: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            element: element.into(),
        }
    }
}

/// One step or source instruction of a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub name: String,
    pub args: Vec<Value>,
}

impl Instruction {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Serialized form of a traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bytecode {
    pub steps: Vec<Instruction>,
    pub sources: Vec<Instruction>,
}

impl Bytecode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step instruction.
    pub fn add_step(&mut self, name: impl Into<String>, args: Vec<Value>) -> &mut Self {
        self.steps.push(Instruction::new(name, args));
        self
    }

    /// Append a source instruction.
    pub fn add_source(&mut self, name: impl Into<String>, args: Vec<Value>) -> &mut Self {
        self.sources.push(Instruction::new(name, args));
        self
    }
}

/// Predicate for `P` and `TextP` values.
///
/// Conjunctions (`and`, `or`) carry their operands as nested predicate values.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub name: String,
    pub values: Vec<Value>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Single-argument predicate, e.g. `gt(3)`.
    pub fn unary(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, vec![value.into()])
    }

    /// `and` of two `P` predicates.
    pub fn and(self, other: Predicate) -> Self {
        Self::new("and", vec![Value::P(self), Value::P(other)])
    }

    /// `or` of two `P` predicates.
    pub fn or(self, other: Predicate) -> Self {
        Self::new("or", vec![Value::P(self), Value::P(other)])
    }
}

/// Named parameter binding inside bytecode.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub key: String,
    pub value: Box<Value>,
}

impl Binding {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: Box::new(value.into()),
        }
    }
}

/// Traversal strategy with its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalStrategy {
    /// Fully-qualified class name of the strategy.
    pub class_name: String,
    /// Configuration keys are strings.
    pub configuration: ValueMap,
}

impl TraversalStrategy {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            configuration: ValueMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.configuration.insert(Value::String(key.into()), value);
        self
    }
}

/// Script lambda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    pub script: String,
    pub language: String,
    /// Number of arguments; `-1` for unknown.
    pub arguments: i32,
}

impl Lambda {
    pub fn new(script: impl Into<String>, language: impl Into<String>, arguments: i32) -> Self {
        Self {
            script: script.into(),
            language: language.into(),
            arguments,
        }
    }
}

/// Result value paired with its bulk.
#[derive(Debug, Clone, PartialEq)]
pub struct Traverser {
    pub bulk: i64,
    pub value: Box<Value>,
}

impl Traverser {
    pub fn new(value: impl Into<Value>, bulk: i64) -> Self {
        Self {
            bulk,
            value: Box::new(value.into()),
        }
    }
}

/// Value of a caller-registered custom type.
///
/// The registered custom serializer decides how `value` maps to its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomValue {
    pub type_name: String,
    pub value: Box<Value>,
}

impl CustomValue {
    pub fn new(type_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            type_name: type_name.into(),
            value: Box::new(value.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytecode_builder() {
        let mut bytecode = Bytecode::new();
        bytecode
            .add_source("withStrategies", vec![])
            .add_step("V", vec![])
            .add_step("has", vec!["name".into(), "marko".into()]);
        assert_eq!(bytecode.sources.len(), 1);
        assert_eq!(bytecode.steps.len(), 2);
        assert_eq!(bytecode.steps[1].args.len(), 2);
    }

    #[test]
    fn test_predicate_conjunction_nests() {
        let p = Predicate::unary("gt", Value::Int(1)).and(Predicate::unary("lt", Value::Int(9)));
        assert_eq!(p.name, "and");
        assert!(matches!(&p.values[0], Value::P(inner) if inner.name == "gt"));
        assert!(matches!(&p.values[1], Value::P(inner) if inner.name == "lt"));
    }

    #[test]
    fn test_strategy_configuration() {
        let s = TraversalStrategy::new("org.example.SubgraphStrategy").with("checkAdjacentVertices", false);
        assert_eq!(
            s.configuration.get_str("checkAdjacentVertices"),
            Some(&Value::Bool(false))
        );
    }
}
