//! GraphBinary 1.0 type codes.
//!
//! Every type code defined by the format is listed here, including the ones
//! this crate does not implement. Keeping them named lets the reader tell an
//! unsupported-but-valid code apart from garbage.

use std::fmt;

/// A GraphBinary data type: one type-code byte plus its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// Type code as written on the wire.
    pub code: u8,
    /// Type name, as used by the format and by enum values.
    pub name: &'static str,
}

macro_rules! data_types {
    ($($ident:ident = $code:literal, $name:literal;)*) => {
        impl DataType {
            $(
                #[doc = concat!("`", $name, "` (", stringify!($code), ").")]
                pub const $ident: DataType = DataType { code: $code, name: $name };
            )*

            /// All data types defined by GraphBinary 1.0.
            pub const ALL: &'static [DataType] = &[$(DataType::$ident),*];
        }
    };
}

data_types! {
    CUSTOM = 0x00, "Custom";
    INT = 0x01, "Int";
    LONG = 0x02, "Long";
    STRING = 0x03, "String";
    DATE = 0x04, "Date";
    TIMESTAMP = 0x05, "Timestamp";
    CLASS = 0x06, "Class";
    DOUBLE = 0x07, "Double";
    FLOAT = 0x08, "Float";
    LIST = 0x09, "List";
    MAP = 0x0a, "Map";
    SET = 0x0b, "Set";
    UUID = 0x0c, "UUID";
    EDGE = 0x0d, "Edge";
    PATH = 0x0e, "Path";
    PROPERTY = 0x0f, "Property";
    GRAPH = 0x10, "Graph";
    VERTEX = 0x11, "Vertex";
    VERTEX_PROPERTY = 0x12, "VertexProperty";
    BARRIER = 0x13, "Barrier";
    BINDING = 0x14, "Binding";
    BYTECODE = 0x15, "Bytecode";
    CARDINALITY = 0x16, "Cardinality";
    COLUMN = 0x17, "Column";
    DIRECTION = 0x18, "Direction";
    OPERATOR = 0x19, "Operator";
    ORDER = 0x1a, "Order";
    PICK = 0x1b, "Pick";
    POP = 0x1c, "Pop";
    LAMBDA = 0x1d, "Lambda";
    P = 0x1e, "P";
    SCOPE = 0x1f, "Scope";
    T = 0x20, "T";
    TRAVERSER = 0x21, "Traverser";
    BIG_DECIMAL = 0x22, "BigDecimal";
    BIG_INTEGER = 0x23, "BigInteger";
    BYTE = 0x24, "Byte";
    BYTE_BUFFER = 0x25, "ByteBuffer";
    SHORT = 0x26, "Short";
    BOOLEAN = 0x27, "Boolean";
    TEXT_P = 0x28, "TextP";
    TRAVERSAL_STRATEGY = 0x29, "TraversalStrategy";
    BULK_SET = 0x2a, "BulkSet";
    TREE = 0x2b, "Tree";
    METRICS = 0x2c, "Metrics";
    TRAVERSAL_METRICS = 0x2d, "TraversalMetrics";
    MERGE = 0x2e, "Merge";
    CHAR = 0x80, "Char";
    DURATION = 0x81, "Duration";
    INET_ADDRESS = 0x82, "InetAddress";
    INSTANT = 0x83, "Instant";
    LOCAL_DATE = 0x84, "LocalDate";
    LOCAL_DATE_TIME = 0x85, "LocalDateTime";
    LOCAL_TIME = 0x86, "LocalTime";
    MONTH_DAY = 0x87, "MonthDay";
    OFFSET_DATE_TIME = 0x88, "OffsetDateTime";
    OFFSET_TIME = 0x89, "OffsetTime";
    PERIOD = 0x8a, "Period";
    YEAR = 0x8b, "Year";
    YEAR_MONTH = 0x8c, "YearMonth";
    ZONED_DATE_TIME = 0x8d, "ZonedDateTime";
    ZONE_OFFSET = 0x8e, "ZoneOffset";
    UNSPECIFIED_NULL = 0xfe, "UnspecifiedNull";
}

impl DataType {
    /// Enum categories, each with its own type code.
    pub const ENUMS: &'static [DataType] = &[
        DataType::BARRIER,
        DataType::CARDINALITY,
        DataType::COLUMN,
        DataType::DIRECTION,
        DataType::OPERATOR,
        DataType::ORDER,
        DataType::PICK,
        DataType::POP,
        DataType::SCOPE,
        DataType::T,
        DataType::MERGE,
    ];

    /// Look up a data type by its wire code.
    pub fn from_code(code: u8) -> Option<DataType> {
        Self::ALL.iter().copied().find(|dt| dt.code == code)
    }

    /// Look up a data type by its name.
    pub fn from_name(name: &str) -> Option<DataType> {
        Self::ALL.iter().copied().find(|dt| dt.name == name)
    }

    /// Check whether this is one of the enum categories.
    #[inline]
    pub fn is_enum(&self) -> bool {
        Self::ENUMS.contains(self)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02x})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<u8> = DataType::ALL.iter().map(|dt| dt.code).collect();
        assert_eq!(codes.len(), DataType::ALL.len());
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = DataType::ALL.iter().map(|dt| dt.name).collect();
        assert_eq!(names.len(), DataType::ALL.len());
    }

    #[test]
    fn test_core_codes_match_format() {
        assert_eq!(DataType::INT.code, 0x01);
        assert_eq!(DataType::LIST.code, 0x09);
        assert_eq!(DataType::MAP.code, 0x0a);
        assert_eq!(DataType::BYTECODE.code, 0x15);
        assert_eq!(DataType::BULK_SET.code, 0x2a);
        assert_eq!(DataType::UNSPECIFIED_NULL.code, 0xfe);
    }

    #[test]
    fn test_lookup_by_code_and_name() {
        assert_eq!(DataType::from_code(0x27), Some(DataType::BOOLEAN));
        assert_eq!(DataType::from_name("TextP"), Some(DataType::TEXT_P));
        assert_eq!(DataType::from_code(0x7f), None);
        assert_eq!(DataType::from_name("Nope"), None);
    }

    #[test]
    fn test_enum_categories() {
        assert!(DataType::T.is_enum());
        assert!(DataType::MERGE.is_enum());
        assert!(!DataType::STRING.is_enum());
        assert_eq!(DataType::ENUMS.len(), 11);
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::UUID.to_string(), "UUID(0x0c)");
    }
}
