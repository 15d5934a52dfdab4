//! Typed field values and encoding options.

use std::fmt;

/// A field value that can be placed in an index key.
///
/// Records expose their indexed fields as `FieldValue`s. Integers and floats
/// are both numbers: they encode into one order and `20` equals `20.0`.
/// Integers are kept exact rather than passed through a float.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// UTF-8 text.
    Text(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float. NaN is rejected at encoding time.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl FieldValue {
    /// Returns the name of the value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
        }
    }

    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s:?}"),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// How an index orders its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Equality lookups only. Strings are stored raw and unpadded.
    Unordered,
    /// Ascending key order.
    #[default]
    Ascending,
    /// Descending key order.
    Descending,
}

impl SortOrder {
    /// Returns true for `Ascending` and `Descending`.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        !matches!(self, SortOrder::Unordered)
    }

    /// Returns true for `Descending`.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, SortOrder::Descending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Unordered => "unordered",
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        f.write_str(name)
    }
}

/// Parameters that control how a field value becomes key bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Key ordering.
    pub order: SortOrder,
    /// Ordered strings are right-padded to this many characters.
    pub string_pad_length: usize,
    /// Re-encode descending strings through the base32hex alphabet.
    pub base32: bool,
}

impl EncodeOptions {
    /// Default pad length for ordered strings.
    pub const DEFAULT_STRING_PAD_LENGTH: usize = 16;

    /// Creates options for the given order with default padding.
    #[must_use]
    pub const fn new(order: SortOrder) -> Self {
        Self {
            order,
            string_pad_length: Self::DEFAULT_STRING_PAD_LENGTH,
            base32: true,
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(SortOrder::Ascending)
    }
}
