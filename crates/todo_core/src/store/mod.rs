//! Record store seam and local implementation.
//!
//! # Responsibility
//! - Define the fetch/query/save/delete contract of an external record store.
//! - Keep record persistence independent from the todo codec.
//!
//! # Invariants
//! - Records are keyed by `(record_type, record_name)`; `save` is an upsert.
//! - Stores return records verbatim; decoding is the caller's job.

pub mod sqlite_store;

use crate::db::DbError;
use crate::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use sqlite_store::SqliteRecordStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by record store implementations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Stored data (or a record key) cannot be represented as a record.
    InvalidData(String),
    Serde(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
            Self::Serde(message) => write!(f, "record serialization error: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::Serde(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A stored row whose fields could not be rebuilt into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableRecord {
    pub record_name: String,
    pub reason: String,
}

/// Records returned by a type query, plus rows that failed to parse.
///
/// One bad row never hides the readable ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    /// Ordered by record name.
    pub records: Vec<Record>,
    pub unreadable: Vec<UnreadableRecord>,
}

/// Key-value record store contract.
pub trait RecordStore {
    /// Returns one record, or `None` when absent.
    fn fetch(&self, record_type: &str, record_name: &str) -> StoreResult<Option<Record>>;
    /// Returns every record of one type. Rows that cannot be parsed are
    /// reported in `RecordQuery::unreadable` instead of failing the query.
    fn query(&self, record_type: &str) -> StoreResult<RecordQuery>;
    /// Inserts or replaces a record.
    fn save(&self, record: &Record) -> StoreResult<()>;
    /// Deletes one record. Returns whether it existed.
    fn delete(&self, record_type: &str, record_name: &str) -> StoreResult<bool>;
}
