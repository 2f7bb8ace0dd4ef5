//! Wire type resolution for numbers.
//!
//! A generic [`Value::Number`] carries a single `f64` and cannot say whether
//! it was meant as an Int, a Long or a Double. Resolution order:
//!
//! 1. explicit typed wrappers are written as exactly their own type
//! 2. an integral generic number within `i32` becomes an Int
//! 3. any other integral generic number becomes a Long, flagged as a
//!    precision risk above 2^53
//! 4. a non-integral generic number (including NaN and infinities) becomes
//!    a Double
//!
//! # Example
//!
//! ```
//! use graphbinary_client::number::NumberSerializationStrategy;
//! use graphbinary_client::protocol::DataType;
//! use graphbinary_client::value::Value;
//!
//! let strategy = NumberSerializationStrategy;
//! let small = strategy.resolve(&Value::Number(42.0)).unwrap();
//! assert_eq!(small.data_type, DataType::INT);
//!
//! let wide = strategy.resolve(&Value::Number(2147483648.0)).unwrap();
//! assert_eq!(wide.data_type, DataType::LONG);
//! ```

use crate::config::PrecisionPolicy;
use crate::error::{GraphBinaryError, Result};
use crate::protocol::{DataType, MAX_SAFE_INTEGER};
use crate::value::Value;

/// 2^63, the first integral f64 outside `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Outcome of resolving a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Wire type the value is written as.
    pub data_type: DataType,
    /// The value lies beyond the exact-integer range of a generic number.
    pub precision_risk: bool,
}

impl Resolution {
    fn exact(data_type: DataType) -> Self {
        Self {
            data_type,
            precision_risk: false,
        }
    }
}

/// Maps numeric values to a concrete wire numeric type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSerializationStrategy;

impl NumberSerializationStrategy {
    /// Check whether a value is numeric (typed wrapper or generic number).
    pub fn is_numeric(value: &Value) -> bool {
        matches!(
            value,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Int(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
                | Value::BigInteger(_)
                | Value::Number(_)
        )
    }

    /// Resolve the wire type of a numeric value.
    ///
    /// Returns `None` for non-numeric values.
    pub fn resolve(&self, value: &Value) -> Option<Resolution> {
        let resolution = match value {
            Value::Byte(_) => Resolution::exact(DataType::BYTE),
            Value::Short(_) => Resolution::exact(DataType::SHORT),
            Value::Int(_) => Resolution::exact(DataType::INT),
            Value::Long(_) => Resolution::exact(DataType::LONG),
            Value::Float(_) => Resolution::exact(DataType::FLOAT),
            Value::Double(_) => Resolution::exact(DataType::DOUBLE),
            Value::BigInteger(_) => Resolution::exact(DataType::BIG_INTEGER),
            Value::Number(n) => self.resolve_generic(*n),
            _ => return None,
        };
        Some(resolution)
    }

    /// Resolve the wire type of a generic number.
    pub fn resolve_generic(&self, n: f64) -> Resolution {
        if !is_integral(n) {
            return Resolution::exact(DataType::DOUBLE);
        }
        if n >= i32::MIN as f64 && n <= i32::MAX as f64 {
            return Resolution::exact(DataType::INT);
        }
        Resolution {
            data_type: DataType::LONG,
            precision_risk: n.abs() > MAX_SAFE_INTEGER,
        }
    }

    /// Convert an integral generic number to the Long it is written as.
    ///
    /// Numbers beyond 2^53 are rejected under the strict policy. Numbers
    /// outside `i64` are rejected under every policy.
    pub fn to_long(&self, n: f64, policy: PrecisionPolicy) -> Result<i64> {
        if !is_integral(n) {
            return Err(GraphBinaryError::UnsupportedType(format!(
                "non-integral number {n} cannot be written as Long"
            )));
        }
        if n.abs() <= MAX_SAFE_INTEGER {
            return Ok(n as i64);
        }
        if policy == PrecisionPolicy::Strict || !(-I64_BOUND..I64_BOUND).contains(&n) {
            return Err(GraphBinaryError::PrecisionLossRisk(n));
        }
        tracing::warn!(
            "Writing {} as Long beyond the exact integer range; precision may already be lost",
            n
        );
        Ok(n as i64)
    }
}

#[inline]
fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(value: Value) -> Resolution {
        NumberSerializationStrategy.resolve(&value).unwrap()
    }

    #[test]
    fn test_int32_boundary() {
        assert_eq!(resolve(Value::Number(2_147_483_647.0)).data_type, DataType::INT);
        assert_eq!(resolve(Value::Number(2_147_483_648.0)).data_type, DataType::LONG);
        assert_eq!(resolve(Value::Number(-2_147_483_648.0)).data_type, DataType::INT);
        assert_eq!(resolve(Value::Number(-2_147_483_649.0)).data_type, DataType::LONG);
    }

    #[test]
    fn test_exact_integer_boundary() {
        let limit = 9_007_199_254_740_992.0;
        let at = resolve(Value::Number(limit));
        assert_eq!(at.data_type, DataType::LONG);
        assert!(!at.precision_risk);

        let beyond = resolve(Value::Number(limit + 2.0));
        assert_eq!(beyond.data_type, DataType::LONG);
        assert!(beyond.precision_risk);

        assert!(resolve(Value::Number(-limit - 2.0)).precision_risk);
    }

    #[test]
    fn test_explicit_wrappers_win() {
        assert_eq!(resolve(Value::Double(2_147_483_647.0)).data_type, DataType::DOUBLE);
        assert_eq!(resolve(Value::Float(1.0)).data_type, DataType::FLOAT);
        assert_eq!(resolve(Value::Byte(1)).data_type, DataType::BYTE);
        assert_eq!(resolve(Value::Short(1)).data_type, DataType::SHORT);
        assert_eq!(resolve(Value::Long(1)).data_type, DataType::LONG);
        assert!(!resolve(Value::Long(i64::MAX)).precision_risk);
        assert_eq!(
            resolve(Value::BigInteger(1.into())).data_type,
            DataType::BIG_INTEGER
        );
    }

    #[test]
    fn test_non_integral_is_double() {
        assert_eq!(resolve(Value::Number(1.5)).data_type, DataType::DOUBLE);
        assert_eq!(resolve(Value::Number(f64::NAN)).data_type, DataType::DOUBLE);
        assert_eq!(resolve(Value::Number(f64::INFINITY)).data_type, DataType::DOUBLE);
    }

    #[test]
    fn test_non_numeric_is_none() {
        assert!(NumberSerializationStrategy.resolve(&Value::from("1")).is_none());
        assert!(NumberSerializationStrategy.resolve(&Value::Bool(true)).is_none());
    }

    #[test]
    fn test_to_long_policies() {
        let strategy = NumberSerializationStrategy;
        let risky = 9_007_199_254_740_994.0;

        assert_eq!(strategy.to_long(3e9, PrecisionPolicy::Strict).unwrap(), 3_000_000_000);
        assert!(matches!(
            strategy.to_long(risky, PrecisionPolicy::Strict),
            Err(GraphBinaryError::PrecisionLossRisk(_))
        ));
        assert_eq!(
            strategy.to_long(risky, PrecisionPolicy::Lenient).unwrap(),
            9_007_199_254_740_994
        );
        assert!(matches!(
            strategy.to_long(1e19, PrecisionPolicy::Lenient),
            Err(GraphBinaryError::PrecisionLossRisk(_))
        ));
    }
}
