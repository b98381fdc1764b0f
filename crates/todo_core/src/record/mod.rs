//! Generic key-value records and the codec traits mapping domain values onto them.
//!
//! # Responsibility
//! - Model an external store record without tying it to one vendor.
//! - Define `Encode`/`Decode` seams for domain types.
//!
//! # Invariants
//! - A record is identified by `(record_type, record_name)`.
//! - Field values are scalars; records never nest.

pub mod todo_record;

use crate::model::todo::TodoValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scalar value stored under one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i64),
    /// Unix epoch milliseconds.
    Timestamp(i64),
}

impl FieldValue {
    /// Short shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

/// External key-value record tagged with a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Schema discriminator, e.g. `"Todo"`.
    pub record_type: String,
    /// Identity of the record within its type.
    pub record_name: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new(record_type: impl Into<String>, record_name: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            record_name: record_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insert.
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.set(key, value);
        self
    }

    /// Inserts or replaces a field, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }
}

/// Malformed-record conditions raised while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    UnexpectedRecordType {
        expected: &'static str,
        actual: String,
    },
    InvalidRecordName(String),
    MissingField(&'static str),
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    InvalidTodo(TodoValidationError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedRecordType { expected, actual } => {
                write!(f, "unexpected record type `{actual}`, expected `{expected}`")
            }
            Self::InvalidRecordName(name) => write!(f, "invalid record name `{name}`"),
            Self::MissingField(field) => write!(f, "record is missing field `{field}`"),
            Self::WrongFieldType {
                field,
                expected,
                actual,
            } => write!(
                f,
                "record field `{field}` has type {actual}, expected {expected}"
            ),
            Self::InvalidTodo(err) => write!(f, "record holds an invalid todo: {err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTodo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RecordError {
    fn from(value: TodoValidationError) -> Self {
        Self::InvalidTodo(value)
    }
}

/// Binds a domain type to the record type tag its records carry.
pub trait RecordType {
    const RECORD_TYPE: &'static str;
}

/// Maps a value onto a record.
pub trait Encode: RecordType {
    fn encode(&self) -> Record;
}

/// Rebuilds a value from a record. All-or-nothing.
pub trait Decode: RecordType + Sized {
    fn decode(record: &Record) -> Result<Self, RecordError>;
}

#[cfg(test)]
mod tests {
    use super::{FieldValue, Record};

    #[test]
    fn set_replaces_and_returns_previous_value() {
        let mut record = Record::new("Todo", "a").with_field("done", FieldValue::Bool(false));
        let previous = record.set("done", FieldValue::Bool(true));

        assert_eq!(previous, Some(FieldValue::Bool(false)));
        assert_eq!(record.get("done"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.remove("done"), Some(FieldValue::Bool(true)));
        assert!(record.get("done").is_none());
    }

    #[test]
    fn field_values_serialize_as_tagged_scalars() {
        let record = Record::new("Todo", "a")
            .with_field("title", FieldValue::Text("x".to_string()))
            .with_field("creationDate", FieldValue::Timestamp(7));

        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["record_type"], "Todo");
        assert_eq!(json["fields"]["title"]["text"], "x");
        assert_eq!(json["fields"]["creationDate"]["timestamp"], 7);
    }
}
