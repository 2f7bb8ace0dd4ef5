//! Container serializers.
//!
//! ```text
//! List / Set  {count: i32}{item fq}...
//! Map         {count: i32}({key fq}{value fq})...
//! BulkSet     {count: i32}({value fq}{bulk: i64})...
//! ```
//!
//! Items are always fully qualified, so containers may be heterogeneous.

use bytes::BufMut;

use super::{mismatch, Serializer};
use crate::error::Result;
use crate::protocol::DataType;
use crate::reader::ReadContext;
use crate::value::{Value, ValueMap, ValueSet};
use crate::writer::WriteContext;

/// Write a count followed by fully-qualified items.
pub(crate) fn write_items<'v>(
    ctx: &mut WriteContext<'_>,
    len: usize,
    items: impl Iterator<Item = &'v Value>,
) -> Result<()> {
    ctx.put_length(len)?;
    for item in items {
        ctx.write(item, true)?;
    }
    Ok(())
}

/// Read a count followed by fully-qualified items.
pub(crate) fn read_items(ctx: &mut ReadContext<'_>) -> Result<Vec<Value>> {
    let count = ctx.read_count()?;
    let mut items = Vec::with_capacity(ctx.capacity_hint(count));
    for _ in 0..count {
        items.push(ctx.read()?);
    }
    Ok(items)
}

/// Write map entries (count and pairs) without an envelope.
pub(crate) fn write_entries(ctx: &mut WriteContext<'_>, map: &ValueMap) -> Result<()> {
    ctx.put_length(map.len())?;
    for (key, value) in map {
        ctx.write(key, true)?;
        ctx.write(value, true)?;
    }
    Ok(())
}

pub struct ListSerializer;

impl Serializer for ListSerializer {
    fn data_type(&self) -> DataType {
        DataType::LIST
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::List(items) => write_items(ctx, items.len(), items.iter()),
            other => Err(mismatch(DataType::LIST, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::List(read_items(ctx)?))
    }
}

pub struct SetSerializer;

impl Serializer for SetSerializer {
    fn data_type(&self) -> DataType {
        DataType::SET
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Set(set) => write_items(ctx, set.len(), set.iter()),
            other => Err(mismatch(DataType::SET, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        Ok(Value::Set(read_items(ctx)?.into_iter().collect::<ValueSet>()))
    }
}

pub struct MapSerializer;

impl Serializer for MapSerializer {
    fn data_type(&self) -> DataType {
        DataType::MAP
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::Map(map) => write_entries(ctx, map),
            other => Err(mismatch(DataType::MAP, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let count = ctx.read_count()?;
        let mut map = ValueMap::with_capacity(ctx.capacity_hint(count));
        for _ in 0..count {
            let key = ctx.read()?;
            let value = ctx.read()?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

pub struct BulkSetSerializer;

impl Serializer for BulkSetSerializer {
    fn data_type(&self) -> DataType {
        DataType::BULK_SET
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> Result<()> {
        match value {
            Value::BulkSet(entries) => {
                ctx.put_length(entries.len())?;
                for (item, bulk) in entries {
                    ctx.write(item, true)?;
                    ctx.put_i64(*bulk);
                }
                Ok(())
            }
            other => Err(mismatch(DataType::BULK_SET, other)),
        }
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> Result<Value> {
        let count = ctx.read_count()?;
        let mut entries = Vec::with_capacity(ctx.capacity_hint(count));
        for _ in 0..count {
            let item = ctx.read()?;
            let bulk = ctx.read_i64()?;
            entries.push((item, bulk));
        }
        Ok(Value::BulkSet(entries))
    }
}
