//! Todo <-> record mapping.
//!
//! # Invariants
//! - Records carry `TODO_RECORD_TYPE` and the todo id as record name.
//! - Encoding always writes all four fields; decoding ignores unknown ones.

use super::{Decode, Encode, FieldValue, Record, RecordError, RecordType};
use crate::model::todo::Todo;
use uuid::Uuid;

/// Record type tag identifying todo records in a store.
pub const TODO_RECORD_TYPE: &str = "Todo";

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DONE: &str = "done";
pub const FIELD_CREATION_DATE: &str = "creationDate";
pub const FIELD_MODIFICATION_DATE: &str = "modificationDate";

impl RecordType for Todo {
    const RECORD_TYPE: &'static str = TODO_RECORD_TYPE;
}

impl Encode for Todo {
    fn encode(&self) -> Record {
        Record::new(TODO_RECORD_TYPE, self.id().to_string())
            .with_field(FIELD_TITLE, FieldValue::Text(self.title().to_string()))
            .with_field(FIELD_DONE, FieldValue::Bool(self.done()))
            .with_field(
                FIELD_CREATION_DATE,
                FieldValue::Timestamp(self.creation_date()),
            )
            .with_field(
                FIELD_MODIFICATION_DATE,
                FieldValue::Timestamp(self.modification_date()),
            )
    }
}

impl Decode for Todo {
    fn decode(record: &Record) -> Result<Self, RecordError> {
        if record.record_type != TODO_RECORD_TYPE {
            return Err(RecordError::UnexpectedRecordType {
                expected: TODO_RECORD_TYPE,
                actual: record.record_type.clone(),
            });
        }

        let id = Uuid::parse_str(&record.record_name)
            .map_err(|_| RecordError::InvalidRecordName(record.record_name.clone()))?;

        let title = match required(record, FIELD_TITLE)? {
            FieldValue::Text(value) => value.clone(),
            other => return Err(wrong_type(FIELD_TITLE, "text", other)),
        };

        let done = match required(record, FIELD_DONE)? {
            FieldValue::Bool(value) => *value,
            FieldValue::Int(0) => false,
            FieldValue::Int(1) => true,
            other => return Err(wrong_type(FIELD_DONE, "bool or 0/1 int", other)),
        };

        let creation_date = timestamp(record, FIELD_CREATION_DATE)?;
        let modification_date = timestamp(record, FIELD_MODIFICATION_DATE)?;

        Ok(Todo::from_parts(
            id,
            title,
            done,
            creation_date,
            modification_date,
        )?)
    }
}

/// Encodes a todo into its store record.
pub fn to_record(todo: &Todo) -> Record {
    todo.encode()
}

/// Decodes a todo from a store record.
///
/// # Errors
/// - Returns a `RecordError` when the record type, name, or any required
///   field is missing or malformed, or when the values break todo invariants.
pub fn from_record(record: &Record) -> Result<Todo, RecordError> {
    Todo::decode(record)
}

fn required<'r>(record: &'r Record, field: &'static str) -> Result<&'r FieldValue, RecordError> {
    record.get(field).ok_or(RecordError::MissingField(field))
}

fn timestamp(record: &Record, field: &'static str) -> Result<i64, RecordError> {
    match required(record, field)? {
        FieldValue::Timestamp(value) | FieldValue::Int(value) => Ok(*value),
        other => Err(wrong_type(field, "timestamp", other)),
    }
}

fn wrong_type(field: &'static str, expected: &'static str, actual: &FieldValue) -> RecordError {
    RecordError::WrongFieldType {
        field,
        expected,
        actual: actual.kind(),
    }
}
