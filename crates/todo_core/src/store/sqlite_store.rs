//! SQLite-backed record store.
//!
//! # Invariants
//! - `fields` are persisted as JSON in `records.fields_json`.
//! - `fetch` rejects an unparsable row; `query` reports it and keeps going.

use super::{RecordQuery, RecordStore, StoreError, StoreResult, UnreadableRecord};
use crate::record::{FieldValue, Record};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;

const RECORD_SELECT_SQL: &str = "SELECT
    record_type,
    record_name,
    fields_json
FROM records";

/// Record store over one borrowed SQLite connection.
///
/// The connection must come from [`crate::db::open_db`] or
/// [`crate::db::open_db_in_memory`] so the schema exists.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn fetch(&self, record_type: &str, record_name: &str) -> StoreResult<Option<Record>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL}
             WHERE record_type = ?1
               AND record_name = ?2;"
        ))?;

        let mut rows = stmt.query(params![record_type, record_name])?;
        if let Some(row) = rows.next()? {
            let raw = RawRecord::from_row(row)?;
            return raw.into_record().map(Some).map_err(|reason| {
                StoreError::InvalidData(format!(
                    "invalid fields_json for `{record_type}:{record_name}`: {reason}"
                ))
            });
        }

        Ok(None)
    }

    fn query(&self, record_type: &str) -> StoreResult<RecordQuery> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL}
             WHERE record_type = ?1
             ORDER BY record_name ASC;"
        ))?;

        let mut rows = stmt.query([record_type])?;
        let mut result = RecordQuery::default();
        while let Some(row) = rows.next()? {
            let raw = RawRecord::from_row(row)?;
            let record_name = raw.record_name.clone();
            match raw.into_record() {
                Ok(record) => result.records.push(record),
                Err(reason) => {
                    warn!(
                        "event=record_query module=store status=unreadable \
                         record_type={record_type} record_name={record_name}"
                    );
                    result.unreadable.push(UnreadableRecord {
                        record_name,
                        reason,
                    });
                }
            }
        }

        Ok(result)
    }

    fn save(&self, record: &Record) -> StoreResult<()> {
        if record.record_type.is_empty() || record.record_name.is_empty() {
            return Err(StoreError::InvalidData(
                "record_type and record_name must not be empty".to_string(),
            ));
        }

        let fields_json = serde_json::to_string(&record.fields)
            .map_err(|err| StoreError::Serde(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO records (
                record_type,
                record_name,
                fields_json
            ) VALUES (?1, ?2, ?3)
            ON CONFLICT (record_type, record_name) DO UPDATE SET
                fields_json = excluded.fields_json;",
            params![
                record.record_type.as_str(),
                record.record_name.as_str(),
                fields_json,
            ],
        )?;

        debug!(
            "event=record_save module=store status=ok record_type={} field_count={}",
            record.record_type,
            record.fields.len()
        );
        Ok(())
    }

    fn delete(&self, record_type: &str, record_name: &str) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE record_type = ?1 AND record_name = ?2;",
            params![record_type, record_name],
        )?;

        debug!(
            "event=record_delete module=store status=ok record_type={} deleted={}",
            record_type,
            changed > 0
        );
        Ok(changed > 0)
    }
}

/// Row columns before the fields JSON is parsed.
struct RawRecord {
    record_type: String,
    record_name: String,
    fields_json: String,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            record_type: row.get("record_type")?,
            record_name: row.get("record_name")?,
            fields_json: row.get("fields_json")?,
        })
    }

    fn into_record(self) -> Result<Record, String> {
        let fields: BTreeMap<String, FieldValue> =
            serde_json::from_str(&self.fields_json).map_err(|err| err.to_string())?;
        Ok(Record {
            record_type: self.record_type,
            record_name: self.record_name,
            fields,
        })
    }
}
