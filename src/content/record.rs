//! Content records and identifiers.

use super::ContentType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Field name → value map of a record (insertion order preserved).
pub type FieldMap = Map<String, Value>;

/// Record identifier: numeric row id or opaque document id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(u64),
    Opaque(String),
}

impl RecordId {
    /// Extract an id from a JSON value, as found in store exports.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(Self::Numeric),
            Value::String(s) if !s.is_empty() => Some(Self::Opaque(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Numeric(n) => Value::from(*n),
            Self::Opaque(s) => Value::String(s.clone()),
        }
    }

    /// The same id in the other spelling: `42` and `"42"`.
    ///
    /// Exports may store numeric ids as strings while command-line input
    /// always parses digits as numeric.
    pub fn alternate(&self) -> Option<Self> {
        match self {
            Self::Numeric(n) => Some(Self::Opaque(n.to_string())),
            Self::Opaque(s) => s
                .parse::<u64>()
                .ok()
                .filter(|n| n.to_string() == *s)
                .map(Self::Numeric),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Opaque(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    /// Digits parse as numeric ids, anything else is opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(Self::Numeric)
            .unwrap_or_else(|_| Self::Opaque(s.to_string())))
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Opaque(s.to_string())
    }
}

/// A stored record, tagged with its content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub content_type: ContentType,
    pub id: RecordId,
    pub fields: FieldMap,
}

impl ContentRecord {
    pub fn new(content_type: ContentType, id: impl Into<RecordId>, fields: FieldMap) -> Self {
        Self {
            content_type,
            id: id.into(),
            fields,
        }
    }

    /// Get a string field, `None` if absent or not a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// One pending update: the fields being written to an existing record.
///
/// Lives for a single write; the interceptor mutates `fields` in place
/// before they are handed to storage.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOperation {
    pub content_type: ContentType,
    pub id: RecordId,
    pub fields: FieldMap,
}

impl UpdateOperation {
    pub fn new(content_type: ContentType, id: impl Into<RecordId>, fields: FieldMap) -> Self {
        Self {
            content_type,
            id: id.into(),
            fields,
        }
    }
}
