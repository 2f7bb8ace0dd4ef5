//! Integration tests for graphbinary-client.
//!
//! These tests drive the public codec surface end to end: dispatch,
//! registry, reader and writer together.

use std::sync::Arc;

use bytes::BufMut;
use graphbinary_client::config::{CodecConfig, PrecisionPolicy};
use graphbinary_client::reader::ReadContext;
use graphbinary_client::serializer::CustomTypeSerializer;
use graphbinary_client::value::{
    Bytecode, CustomValue, Edge, ElementRef, EnumValue, Path, Predicate, TraversalStrategy,
    Traverser, Value, ValueMap, Vertex, VertexProperty,
};
use graphbinary_client::writer::WriteContext;
use graphbinary_client::{DataType, GraphBinaryCodec, GraphBinaryError, MIME_TYPE};

/// Point(x, y) carried as two Ints after the type name.
struct PointSerializer;

impl CustomTypeSerializer for PointSerializer {
    fn type_name(&self) -> &str {
        "test.Point"
    }

    fn write_payload(&self, value: &Value, ctx: &mut WriteContext<'_>) -> graphbinary_client::Result<()> {
        let Value::Custom(custom) = value else {
            return Err(GraphBinaryError::InvalidValue("not a point".into()));
        };
        let Value::List(coords) = custom.value.as_ref() else {
            return Err(GraphBinaryError::InvalidValue("point needs coordinates".into()));
        };
        for coord in coords {
            match coord {
                Value::Int(c) => ctx.put_i32(*c),
                _ => return Err(GraphBinaryError::InvalidValue("coordinate must be Int".into())),
            }
        }
        Ok(())
    }

    fn read_payload(&self, ctx: &mut ReadContext<'_>) -> graphbinary_client::Result<Value> {
        let x = ctx.read_i32()?;
        let y = ctx.read_i32()?;
        Ok(point(x, y))
    }
}

fn point(x: i32, y: i32) -> Value {
    Value::Custom(CustomValue::new(
        "test.Point",
        Value::List(vec![Value::Int(x), Value::Int(y)]),
    ))
}

fn is_point(value: &Value) -> bool {
    matches!(value, Value::Custom(c) if c.type_name == "test.Point")
}

fn roundtrip(codec: &GraphBinaryCodec, value: &Value) -> Value {
    let bytes = codec.encode(value).unwrap();
    let (decoded, consumed) = codec.decode(&bytes).unwrap();
    assert_eq!(consumed, bytes.len());
    decoded
}

/// A typical traversal result: traversers over paths of graph elements.
#[test]
fn test_traversal_result_roundtrip() {
    let marko = Vertex::new(Value::Long(1), "person");
    let lop = Vertex::new(Value::Long(3), "software");
    let created = Edge::new(Value::Long(9), marko.to_ref(), "created", lop.to_ref());

    let mut path = Path::new();
    path.push(Value::Vertex(marko.clone()), ["a"]);
    path.push(Value::Edge(created), Vec::<String>::new());
    path.push(Value::Vertex(lop), ["b"]);

    let mut name = VertexProperty::new(Value::Long(0), "name", "marko");
    name.vertex = Some(marko.to_ref());

    let result = Value::List(vec![
        Value::Traverser(Traverser::new(Value::Path(path), 2)),
        Value::Traverser(Traverser::new(Value::VertexProperty(name), 1)),
        Value::BulkSet(vec![(Value::from("lop"), 4)]),
    ]);

    let codec = GraphBinaryCodec::new();
    assert_eq!(roundtrip(&codec, &result), result);
}

/// A traversal request: bytecode with sources, predicates, strategies and
/// enums, as a client would send it.
#[test]
fn test_bytecode_request_roundtrip() {
    let mut bytecode = Bytecode::new();
    bytecode
        .add_source(
            "withStrategies",
            vec![Value::Strategy(
                TraversalStrategy::new("org.example.PartitionStrategy")
                    .with("partitionKey", "_partition")
                    .with("writePartition", "a"),
            )],
        )
        .add_step("V", vec![])
        .add_step(
            "has",
            vec![
                "age".into(),
                Value::P(Predicate::unary("gt", Value::number(30)).and(Predicate::unary("lt", Value::number(40)))),
            ],
        )
        .add_step("values", vec!["name".into()])
        .add_step("order", vec![])
        .add_step("by", vec![Value::Enum(EnumValue::new("Order", "asc"))]);

    let codec = GraphBinaryCodec::new();
    let decoded = roundtrip(&codec, &Value::Bytecode(bytecode));
    let Value::Bytecode(decoded) = decoded else {
        panic!("expected bytecode");
    };
    assert_eq!(decoded.sources.len(), 1);
    assert_eq!(decoded.steps.len(), 5);
    // Generic numbers come back as the type they were written as.
    let Value::P(p) = &decoded.steps[1].args[1] else {
        panic!("expected predicate");
    };
    assert_eq!(p.name, "and");
    assert!(matches!(&p.values[0], Value::P(gt) if gt.values == vec![Value::Int(30)]));
}

/// Registered custom types round-trip and built-in output is unchanged.
#[test]
fn test_custom_type_registration() {
    let plain = GraphBinaryCodec::new();
    let codec = GraphBinaryCodec::builder()
        .custom_type(is_point, Arc::new(PointSerializer))
        .build();

    // 0x00 | name | empty type info | flag | x | y
    let bytes = codec.encode(&point(1, 2)).unwrap();
    let mut expected = vec![0x00, 0x00, 0x00, 0x00, 0x0a];
    expected.extend_from_slice(b"test.Point");
    expected.extend_from_slice(&[0, 0, 0, 0]);
    expected.push(0x00);
    expected.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 2]);
    assert_eq!(&bytes[..], &expected[..]);

    let nested = Value::List(vec![point(1, 2), Value::from("x"), point(-3, 4)]);
    assert_eq!(roundtrip(&codec, &nested), nested);

    let builtin = Value::List(vec![Value::Int(1), Value::from("x")]);
    assert_eq!(codec.encode(&builtin).unwrap(), plain.encode(&builtin).unwrap());

    assert_eq!(codec.writer().dispatch().route_names()[0], "Custom(test.Point)");
}

/// Type info travels between the name and the value flag; a null custom
/// value still carries its name.
#[test]
fn test_custom_type_info_and_null() {
    struct Tagged;

    impl CustomTypeSerializer for Tagged {
        fn type_name(&self) -> &str {
            "test.Tagged"
        }

        fn type_info(&self) -> &[u8] {
            &[0xca, 0xfe]
        }

        fn write_payload(&self, _value: &Value, ctx: &mut WriteContext<'_>) -> graphbinary_client::Result<()> {
            ctx.put_u8(7);
            Ok(())
        }

        fn read_payload(&self, ctx: &mut ReadContext<'_>) -> graphbinary_client::Result<Value> {
            let tag = ctx.read_u8()?;
            Ok(Value::Custom(CustomValue::new("test.Tagged", Value::Byte(tag as i8))))
        }
    }

    let codec = GraphBinaryCodec::builder()
        .custom_type(
            |v| matches!(v, Value::Custom(c) if c.type_name == "test.Tagged"),
            Arc::new(Tagged),
        )
        .build();
    let value = Value::Custom(CustomValue::new("test.Tagged", Value::Byte(7)));

    let bytes = codec.encode(&value).unwrap();
    let mut expected = vec![0x00, 0x00, 0x00, 0x00, 0x0b];
    expected.extend_from_slice(b"test.Tagged");
    expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x02, 0xca, 0xfe, 0x00, 0x07]);
    assert_eq!(&bytes[..], &expected[..]);
    assert_eq!(codec.decode(&bytes).unwrap(), (value.clone(), bytes.len()));

    // Same header with the null flag and no payload
    let mut null = expected[..expected.len() - 2].to_vec();
    null.push(0x01);
    assert_eq!(codec.decode(&null).unwrap(), (Value::Null, null.len()));

    // Value-only form is the payload alone
    assert_eq!(&codec.writer().write(&value, false).unwrap()[..], &[0x07]);
}

/// A custom type that the codec does not know cannot be written or read.
#[test]
fn test_unregistered_custom_type() {
    let codec = GraphBinaryCodec::builder()
        .custom_type(is_point, Arc::new(PointSerializer))
        .build();
    let bytes = codec.encode(&point(1, 2)).unwrap();

    let plain = GraphBinaryCodec::new();
    assert!(matches!(
        plain.encode(&point(1, 2)),
        Err(GraphBinaryError::UnsupportedType(_))
    ));
    assert!(matches!(
        plain.decode(&bytes),
        Err(GraphBinaryError::UnsupportedType(_))
    ));
}

/// Defined-but-unimplemented codes and undefined codes fail distinctly.
#[test]
fn test_unsupported_and_unknown_type_codes() {
    let codec = GraphBinaryCodec::new();

    // BigDecimal, Graph, Tree, Metrics, Char
    for code in [0x22u8, 0x10, 0x2b, 0x2c, 0x80] {
        assert!(
            matches!(codec.decode(&[code, 0x00, 0x00]), Err(GraphBinaryError::UnsupportedType(_))),
            "code 0x{code:02x}"
        );
    }

    assert!(matches!(
        codec.decode(&[0x99, 0x00]),
        Err(GraphBinaryError::UnknownTypeCode(0x99))
    ));

    // Unsupported item inside a list fails the whole decode
    let bytes = [0x09, 0x00, 0, 0, 0, 2, 0x01, 0x00, 0, 0, 0, 1, 0x22, 0x00, 0x00];
    assert!(matches!(
        codec.decode(&bytes),
        Err(GraphBinaryError::UnsupportedType(_))
    ));
}

#[test]
fn test_invalid_value_flag() {
    assert!(matches!(
        GraphBinaryCodec::new().decode(&[0x01, 0x02, 0, 0, 0, 1]),
        Err(GraphBinaryError::InvalidValueFlag(0x02))
    ));
}

/// Values nested past the configured depth fail on write and on read.
#[test]
fn test_nesting_limit() {
    let codec = GraphBinaryCodec::builder()
        .config(CodecConfig {
            max_depth: 8,
            ..CodecConfig::default()
        })
        .build();

    let mut shallow = Value::Int(1);
    for _ in 0..4 {
        shallow = Value::List(vec![shallow]);
    }
    assert_eq!(roundtrip(&codec, &shallow), shallow);

    let mut deep = Value::Int(1);
    for _ in 0..20 {
        deep = Value::List(vec![deep]);
    }
    assert!(matches!(
        codec.encode(&deep),
        Err(GraphBinaryError::NestingTooDeep(8))
    ));

    let bytes = GraphBinaryCodec::new().encode(&deep).unwrap();
    assert!(matches!(
        codec.decode(&bytes),
        Err(GraphBinaryError::NestingTooDeep(8))
    ));
}

/// Consecutive values in one buffer decode by offset.
#[test]
fn test_decode_consecutive_values() {
    let codec = GraphBinaryCodec::new();
    let values = [
        Value::Int(7),
        Value::Null,
        Value::from("seven"),
        Value::Map([("k", Value::Long(7))].into_iter().collect::<ValueMap>()),
    ];

    let mut buf = Vec::new();
    for value in &values {
        buf.extend_from_slice(&codec.encode(value).unwrap());
    }

    let mut offset = 0;
    for expected in &values {
        let (value, next) = codec.reader().read(&buf, offset).unwrap();
        assert_eq!(&value, expected);
        offset = next;
    }
    assert_eq!(offset, buf.len());

    assert!(matches!(
        codec.reader().read(&buf, buf.len() + 1),
        Err(GraphBinaryError::BufferUnderflow { .. })
    ));
}

/// Every truncation of a valid encoding fails cleanly.
#[test]
fn test_truncated_input_never_decodes() {
    let mut vertex = Vertex::new(Value::from("v1"), "person");
    vertex.properties = vec![Value::VertexProperty(VertexProperty::new(
        Value::Long(2),
        "age",
        Value::Int(29),
    ))];
    let value = Value::List(vec![
        Value::Vertex(vertex),
        Value::Edge(Edge::new(
            Value::Int(1),
            ElementRef::new(Value::from("v1"), "person"),
            "knows",
            ElementRef::new(Value::from("v2"), "person"),
        )),
        Value::Double(0.5),
    ]);
    let codec = GraphBinaryCodec::new();
    let bytes = codec.encode(&value).unwrap();
    for len in 0..bytes.len() {
        assert!(codec.decode(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
    }
}

/// Generic numbers follow the strategy; precision policy comes from config.
#[test]
fn test_precision_policy_from_json_config() {
    let risky = Value::List(vec![Value::Number(1e17)]);

    let strict = GraphBinaryCodec::new();
    assert!(matches!(
        strict.encode(&risky),
        Err(GraphBinaryError::PrecisionLossRisk(_))
    ));

    let config = CodecConfig::from_json(r#"{ "precision": "lenient" }"#).unwrap();
    assert_eq!(config.precision, PrecisionPolicy::Lenient);
    let lenient = GraphBinaryCodec::builder().config(config).build();
    let decoded = roundtrip(&lenient, &risky);
    assert_eq!(decoded, Value::List(vec![Value::Long(100_000_000_000_000_000)]));
}

/// Encoding with the fixed-type entry points bypasses dispatch.
#[test]
fn test_encode_as_and_decode_as() {
    let codec = GraphBinaryCodec::new();
    let bytes = codec
        .encode_as(DataType::DOUBLE, &Value::Number(3.0), true)
        .unwrap();
    assert_eq!(bytes[0], 0x07);
    assert_eq!(
        codec.decode_as(DataType::DOUBLE, &bytes, 0, true).unwrap(),
        (Value::Double(3.0), bytes.len())
    );
}

#[test]
fn test_crate_level_helpers() {
    assert_eq!(MIME_TYPE, "application/vnd.graphbinary-v1.0");
    let bytes = graphbinary_client::encode(&Value::Bool(true)).unwrap();
    assert_eq!(&bytes[..], &[0x27, 0x00, 0x01]);
    assert_eq!(graphbinary_client::decode(&bytes).unwrap(), (Value::Bool(true), 3));
}
