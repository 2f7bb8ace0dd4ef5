//! Property tests over generic number inference and hostile input.
//!
//! Generated values exercise the Int / Long / Double boundaries and the
//! precision limit; generated bytes check that decoding fails with an error
//! rather than a panic.

use graphbinary_client::value::Value;
use graphbinary_client::{GraphBinaryCodec, GraphBinaryError};
use proptest::prelude::*;

const EXACT: i64 = 1 << 53;

proptest! {
    #[test]
    fn generic_i32_is_written_as_int(n in any::<i32>()) {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(&Value::Number(f64::from(n))).unwrap();
        prop_assert_eq!(bytes[0], 0x01);
        prop_assert_eq!(codec.decode(&bytes).unwrap().0, Value::Int(n));
    }

    #[test]
    fn generic_exact_integer_beyond_i32_is_written_as_long(
        n in prop_oneof![(i64::from(i32::MAX) + 1)..=EXACT, -EXACT..i64::from(i32::MIN)]
    ) {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(&Value::Number(n as f64)).unwrap();
        prop_assert_eq!(bytes[0], 0x02);
        prop_assert_eq!(codec.decode(&bytes).unwrap().0, Value::Long(n));
    }

    #[test]
    fn generic_fraction_is_written_as_double(
        f in any::<f64>().prop_filter("finite, non-integral", |f| f.is_finite() && f.fract() != 0.0)
    ) {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(&Value::Number(f)).unwrap();
        prop_assert_eq!(bytes[0], 0x07);
        prop_assert_eq!(codec.decode(&bytes).unwrap().0, Value::Double(f));
    }

    #[test]
    fn generic_integer_beyond_exact_range_is_refused(
        n in prop_oneof![(EXACT + 2)..i64::MAX / 2, i64::MIN / 2..-(EXACT + 2)]
    ) {
        // Round to a representable double that still sits beyond 2^53.
        let f = n as f64;
        prop_assume!(f.abs() > EXACT as f64);
        let result = GraphBinaryCodec::new().encode(&Value::Number(f));
        prop_assert!(matches!(result, Err(GraphBinaryError::PrecisionLossRisk(_))));
    }

    #[test]
    fn explicit_long_is_exact(n in any::<i64>()) {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(&Value::Long(n)).unwrap();
        prop_assert_eq!(codec.decode(&bytes).unwrap().0, Value::Long(n));
    }

    #[test]
    fn strings_roundtrip(s in any::<String>()) {
        let codec = GraphBinaryCodec::new();
        let bytes = codec.encode(&Value::from(s.as_str())).unwrap();
        prop_assert_eq!(bytes.len(), 6 + s.len());
        prop_assert_eq!(codec.decode(&bytes).unwrap(), (Value::String(s), bytes.len()));
    }

    #[test]
    fn arbitrary_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        let _ = GraphBinaryCodec::new().decode(&bytes);
    }

    #[test]
    fn declared_count_beyond_input_underflows(count in 1i32..i32::MAX, supplied in 0usize..32) {
        prop_assume!(supplied < count as usize);
        // List header, then `supplied` null Ints
        let mut data = vec![0x09, 0x00];
        data.extend_from_slice(&count.to_be_bytes());
        for _ in 0..supplied {
            data.extend_from_slice(&[0x01, 0x01]);
        }
        let result = GraphBinaryCodec::new().decode(&data);
        prop_assert!(
            matches!(result, Err(GraphBinaryError::BufferUnderflow { .. })),
            "expected BufferUnderflow, got {:?}",
            result
        );
    }
}
