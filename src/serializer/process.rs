//! Traversal-process serializers: bytecode, predicates, traversers, lambdas,
//! bindings, strategies and enums.

use bytes::BufMut;

use super::collection::write_entries;
use super::{mismatch, Serializer};
use crate::error::{GraphBinaryError, Result};
use crate::protocol::DataType;
use crate::reader::ReadContext;
use crate::value::{
    Binding, Bytecode, EnumValue, Instruction, Lambda, Predicate, TraversalStrategy, Traverser,
    Value,
};
use crate::writer::WriteContext;

/// ```text
/// {steps: i32}{instruction}...{sources: i32}{instruction}...
/// instruction = {name: String}{argc: i32}{arg fq}...
/// ```
pub struct BytecodeSerializer;

impl BytecodeSerializer {
    fn write_instructions(ctx: &mut WriteContext<'_>, instructions: &[Instruction]) -> Result<()> {
        ctx.put_length(instructions.len())?;
        for instruction in instructions {
            ctx.put_string(&instruction.name)?;
            ctx.put_length(instruction.args.len())?;
            for arg in &instruction.args {
                ctx.write(arg, true)?;
            }
        }
        Ok(())
    }

    fn read_instructions(ctx: &mut ReadContext<'_>) -> Result<Vec<Instruction>> {
        let count = ctx.read_count()?;
        let mut instructions = Vec::with_capacity(ctx.capacity_hint(count));
        for _ in 0..count {
            let name = ctx.read_string()?;
            let argc = ctx.read_count()?;
            let mut args = Vec::with_capacity(ctx.capacity_hint(argc));
            for _ in 0..argc {
                args.push(ctx.read()?);
            }
            instructions.push(Instruction::new(name, args));
        }
        Ok(instructions)
    }
}

impl Serializer for BytecodeSerializer {
    fn data_type(&self) -> DataType {
        DataType::BYTECODE
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Bytecode(bytecode) = value else {
            return Err(mismatch(DataType::BYTECODE, value));
        };
        Self::write_instructions(ctx, &bytecode.steps)?;
        Self::write_instructions(ctx, &bytecode.sources)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let steps = Self::read_instructions(ctx)?;
        let sources = Self::read_instructions(ctx)?;
        Ok(Value::Bytecode(Bytecode { steps, sources }))
    }
}

/// Predicate payload, shared by P and TextP.
///
/// `{name: String}{count: i32}{value fq}...`
pub struct PredicateSerializer {
    data_type: DataType,
}

impl PredicateSerializer {
    pub fn new(data_type: DataType) -> Self {
        Self { data_type }
    }
}

impl Serializer for PredicateSerializer {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let is_text = self.data_type == DataType::TEXT_P;
        let predicate = match value {
            Value::P(p) if !is_text => p,
            Value::TextP(p) if is_text => p,
            other => return Err(mismatch(self.data_type, other)),
        };
        ctx.put_string(&predicate.name)?;
        ctx.put_length(predicate.values.len())?;
        for v in &predicate.values {
            ctx.write(v, true)?;
        }
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let name = ctx.read_string()?;
        let count = ctx.read_count()?;
        let mut values = Vec::with_capacity(ctx.capacity_hint(count));
        for _ in 0..count {
            values.push(ctx.read()?);
        }
        let predicate = Predicate::new(name, values);
        Ok(if self.data_type == DataType::TEXT_P {
            Value::TextP(predicate)
        } else {
            Value::P(predicate)
        })
    }
}

/// `{bulk: i64}{value fq}`
pub struct TraverserSerializer;

impl Serializer for TraverserSerializer {
    fn data_type(&self) -> DataType {
        DataType::TRAVERSER
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Traverser(traverser) = value else {
            return Err(mismatch(DataType::TRAVERSER, value));
        };
        ctx.put_i64(traverser.bulk);
        ctx.write(&traverser.value, true)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let bulk = ctx.read_i64()?;
        let value = ctx.read()?;
        Ok(Value::Traverser(Traverser::new(value, bulk)))
    }
}

/// `{language: String}{script: String}{arguments: i32}`
pub struct LambdaSerializer;

impl Serializer for LambdaSerializer {
    fn data_type(&self) -> DataType {
        DataType::LAMBDA
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Lambda(lambda) = value else {
            return Err(mismatch(DataType::LAMBDA, value));
        };
        ctx.put_string(&lambda.language)?;
        ctx.put_string(&lambda.script)?;
        ctx.put_i32(lambda.arguments);
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let language = ctx.read_string()?;
        let script = ctx.read_string()?;
        let arguments = ctx.read_i32()?;
        Ok(Value::Lambda(Lambda::new(script, language, arguments)))
    }
}

pub struct BindingSerializer;

impl Serializer for BindingSerializer {
    fn data_type(&self) -> DataType {
        DataType::BINDING
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Binding(binding) = value else {
            return Err(mismatch(DataType::BINDING, value));
        };
        ctx.put_string(&binding.key)?;
        ctx.write(&binding.value, true)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let key = ctx.read_string()?;
        let value = ctx.read()?;
        Ok(Value::Binding(Binding::new(key, value)))
    }
}

/// `{class: Class}{configuration: Map}`, both value-only.
///
/// Configuration keys must be Strings.
pub struct TraversalStrategySerializer;

impl Serializer for TraversalStrategySerializer {
    fn data_type(&self) -> DataType {
        DataType::TRAVERSAL_STRATEGY
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        let Value::Strategy(strategy) = value else {
            return Err(mismatch(DataType::TRAVERSAL_STRATEGY, value));
        };
        if let Some((key, _)) = strategy
            .configuration
            .iter()
            .find(|(key, _)| !matches!(key, Value::String(_)))
        {
            return Err(GraphBinaryError::InvalidValue(format!(
                "strategy configuration key must be a String, found {}",
                key.kind()
            )));
        }
        ctx.put_string(&strategy.class_name)?;
        write_entries(ctx, &strategy.configuration)
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let class_name = ctx.read_string()?;
        let Value::Map(configuration) = ctx.read_as(DataType::MAP, false)? else {
            return Err(GraphBinaryError::InvalidValue(
                "strategy configuration is not a Map".to_string(),
            ));
        };
        if configuration.iter().any(|(key, _)| !matches!(key, Value::String(_))) {
            return Err(GraphBinaryError::InvalidValue(
                "strategy configuration key must be a String".to_string(),
            ));
        }
        Ok(Value::Strategy(TraversalStrategy {
            class_name,
            configuration,
        }))
    }
}

/// One enum category. The element name is a fully-qualified String.
pub struct EnumSerializer {
    data_type: DataType,
}

impl EnumSerializer {
    pub fn new(data_type: DataType) -> Self {
        Self { data_type }
    }
}

impl Serializer for EnumSerializer {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Enum(e) if e.type_name == self.data_type.name => ctx.put_string_fq(&e.element),
            other => Err(mismatch(self.data_type, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        match ctx.read_as(DataType::STRING, true)? {
            Value::String(element) => Ok(Value::Enum(EnumValue::new(self.data_type.name, element))),
            _ => Err(GraphBinaryError::InvalidValue(format!(
                "{} element name is null",
                self.data_type
            ))),
        }
    }
}
