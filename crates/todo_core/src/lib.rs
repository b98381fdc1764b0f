//! Todo item model with a vendor-neutral record codec.
//!
//! `Todo` is an immutable snapshot; `MutableTodo` is its editable twin.
//! Both map onto generic key-value `Record`s that any `RecordStore` can hold.

pub mod db;
pub mod logging;
pub mod model;
pub mod record;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{MutableTodo, Todo, TodoId, TodoValidationError};
pub use record::todo_record::{from_record, to_record, TODO_RECORD_TYPE};
pub use record::{Decode, Encode, FieldValue, Record, RecordError, RecordType};
pub use service::todo_service::{
    ServiceError, ServiceResult, SkipReason, SkippedRecord, TodoListing, TodoService,
};
pub use store::{
    RecordQuery, RecordStore, SqliteRecordStore, StoreError, StoreResult, UnreadableRecord,
};
