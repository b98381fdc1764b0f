//! Todo use-case service.
//!
//! # Responsibility
//! - Provide create/read/update/delete entry points for todos.
//! - Edit through `thaw` -> setter -> `freeze` so timestamps stay consistent.
//!
//! # Invariants
//! - Malformed records never abort a listing; they are skipped and reported.
//! - Service layer remains storage-agnostic.

use crate::model::todo::{MutableTodo, Todo, TodoId, TodoValidationError};
use crate::record::todo_record::TODO_RECORD_TYPE;
use crate::record::{Decode, Encode, RecordError};
use crate::store::{RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Record(RecordError),
    Validation(TodoValidationError),
    NotFound(TodoId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Record(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Record(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RecordError> for ServiceError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

impl From<TodoValidationError> for ServiceError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Why a stored todo record was left out of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The store could not parse the row into a record.
    Unreadable(String),
    /// The record parsed but does not decode as a todo.
    Malformed(RecordError),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(reason) => write!(f, "unreadable record: {reason}"),
            Self::Malformed(err) => write!(f, "{err}"),
        }
    }
}

/// A stored record that could not be turned into a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub record_name: String,
    pub reason: SkipReason,
}

/// Result of listing todos: decoded items plus the records that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListing {
    /// Ordered by creation date, then id.
    pub todos: Vec<Todo>,
    pub skipped: Vec<SkippedRecord>,
}

/// Todo use-cases over any record store.
pub struct TodoService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates and persists a new open todo.
    pub fn create_todo(&self, title: impl Into<String>) -> ServiceResult<Todo> {
        let todo = Todo::new(title)?;
        self.store.save(&todo.encode())?;
        info!("event=todo_create module=service status=ok id={}", todo.id());
        Ok(todo)
    }

    /// Persists an existing snapshot as-is (insert or replace).
    pub fn save_todo(&self, todo: &Todo) -> ServiceResult<()> {
        todo.validate()?;
        self.store.save(&todo.encode())?;
        Ok(())
    }

    /// Loads one todo. A stored but malformed record is an error here.
    pub fn get_todo(&self, id: TodoId) -> ServiceResult<Option<Todo>> {
        match self.store.fetch(TODO_RECORD_TYPE, &id.to_string())? {
            Some(record) => Ok(Some(Todo::decode(&record)?)),
            None => Ok(None),
        }
    }

    /// Loads every todo, skipping and reporting malformed records.
    pub fn list_todos(&self) -> ServiceResult<TodoListing> {
        let mut listing = TodoListing::default();

        let query = self.store.query(TODO_RECORD_TYPE)?;

        for unreadable in query.unreadable {
            listing.skipped.push(SkippedRecord {
                record_name: unreadable.record_name,
                reason: SkipReason::Unreadable(unreadable.reason),
            });
        }

        for record in query.records {
            match Todo::decode(&record) {
                Ok(todo) => listing.todos.push(todo),
                Err(error) => {
                    warn!(
                        "event=todo_list module=service status=skipped record_name={} error={}",
                        record.record_name, error
                    );
                    listing.skipped.push(SkippedRecord {
                        record_name: record.record_name,
                        reason: SkipReason::Malformed(error),
                    });
                }
            }
        }

        listing
            .todos
            .sort_by(|a, b| (a.creation_date(), a.id()).cmp(&(b.creation_date(), b.id())));
        Ok(listing)
    }

    /// Marks a todo done or open.
    pub fn set_done(&self, id: TodoId, done: bool) -> ServiceResult<Todo> {
        self.edit(id, |todo| {
            todo.set_done(done);
            Ok(())
        })
    }

    /// Replaces a todo title.
    pub fn rename(&self, id: TodoId, title: impl Into<String>) -> ServiceResult<Todo> {
        let title = title.into();
        self.edit(id, move |todo| todo.set_title(title))
    }

    /// Deletes a todo by id.
    pub fn delete_todo(&self, id: TodoId) -> ServiceResult<()> {
        if !self.store.delete(TODO_RECORD_TYPE, &id.to_string())? {
            return Err(ServiceError::NotFound(id));
        }
        info!("event=todo_delete module=service status=ok id={id}");
        Ok(())
    }

    fn edit(
        &self,
        id: TodoId,
        apply: impl FnOnce(&mut MutableTodo) -> Result<(), TodoValidationError>,
    ) -> ServiceResult<Todo> {
        let current = self.get_todo(id)?.ok_or(ServiceError::NotFound(id))?;
        let mut editable = current.thaw();
        apply(&mut editable)?;

        let updated = editable.freeze();
        self.store.save(&updated.encode())?;
        info!("event=todo_update module=service status=ok id={id}");
        Ok(updated)
    }
}
