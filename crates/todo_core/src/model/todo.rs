//! Todo value model.
//!
//! # Responsibility
//! - Define the immutable `Todo` snapshot and the editable `MutableTodo`.
//! - Provide explicit `thaw`/`freeze` conversions between the two.
//!
//! # Invariants
//! - `id` is stable and never nil.
//! - `title` is never empty or whitespace-only.
//! - `creation_date` never changes after construction.
//! - `modification_date >= creation_date`, and setters never move
//!   `modification_date` backwards.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a todo. Doubles as the record name when persisted.
pub type TodoId = Uuid;

/// Invariant violations detected while building or editing a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    NilId,
    EmptyTitle,
    ModifiedBeforeCreated { created: i64, modified: i64 },
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be nil"),
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
            Self::ModifiedBeforeCreated { created, modified } => write!(
                f,
                "modification_date ({modified}) must be >= creation_date ({created})"
            ),
        }
    }
}

impl Error for TodoValidationError {}

/// Immutable todo snapshot.
///
/// Fields are private so every instance goes through validation. Use
/// [`Todo::thaw`] to obtain an editable copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoWire")]
pub struct Todo {
    id: TodoId,
    title: String,
    done: bool,
    /// Unix epoch milliseconds.
    creation_date: i64,
    /// Unix epoch milliseconds. Always >= `creation_date`.
    modification_date: i64,
}

#[derive(Deserialize)]
struct TodoWire {
    id: TodoId,
    title: String,
    done: bool,
    creation_date: i64,
    modification_date: i64,
}

impl TryFrom<TodoWire> for Todo {
    type Error = TodoValidationError;

    fn try_from(wire: TodoWire) -> Result<Self, Self::Error> {
        Todo::from_parts(
            wire.id,
            wire.title,
            wire.done,
            wire.creation_date,
            wire.modification_date,
        )
    }
}

impl Todo {
    /// Creates a new open todo stamped with the current time.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is empty after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, TodoValidationError> {
        let now = now_epoch_ms();
        Self::from_parts(Uuid::new_v4(), title, false, now, now)
    }

    /// Rebuilds a todo from already-known field values.
    ///
    /// Used by decode/import paths where identity and timestamps exist
    /// externally.
    ///
    /// # Errors
    /// - Returns the first invariant violation found by [`Todo::validate`].
    pub fn from_parts(
        id: TodoId,
        title: impl Into<String>,
        done: bool,
        creation_date: i64,
        modification_date: i64,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            id,
            title: title.into(),
            done,
            creation_date,
            modification_date,
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Checks all model invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        validate_title(&self.title)?;
        if self.modification_date < self.creation_date {
            return Err(TodoValidationError::ModifiedBeforeCreated {
                created: self.creation_date,
                modified: self.modification_date,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// Alias of [`Todo::done`] reading as a predicate.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn creation_date(&self) -> i64 {
        self.creation_date
    }

    pub fn modification_date(&self) -> i64 {
        self.modification_date
    }

    /// Returns an independent editable copy with identical field values.
    pub fn thaw(&self) -> MutableTodo {
        MutableTodo {
            inner: self.clone(),
        }
    }

    /// Same as [`Todo::thaw`].
    pub fn to_mutable_copy(&self) -> MutableTodo {
        self.thaw()
    }
}

/// Editable todo.
///
/// Every setter refreshes `modification_date`, including writes of an
/// unchanged value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableTodo {
    inner: Todo,
}

impl MutableTodo {
    /// Creates a fresh editable todo. See [`Todo::new`].
    pub fn new(title: impl Into<String>) -> Result<Self, TodoValidationError> {
        Todo::new(title).map(Self::from)
    }

    pub fn id(&self) -> TodoId {
        self.inner.id
    }

    pub fn title(&self) -> &str {
        &self.inner.title
    }

    pub fn done(&self) -> bool {
        self.inner.done
    }

    pub fn is_done(&self) -> bool {
        self.inner.done
    }

    pub fn creation_date(&self) -> i64 {
        self.inner.creation_date
    }

    pub fn modification_date(&self) -> i64 {
        self.inner.modification_date
    }

    /// Replaces the title.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is empty after trimming. The todo is left
    ///   untouched, including `modification_date`.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), TodoValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.inner.title = title;
        self.touch();
        Ok(())
    }

    pub fn set_done(&mut self, done: bool) {
        self.inner.done = done;
        self.touch();
    }

    /// Returns an immutable snapshot of the current values.
    pub fn freeze(&self) -> Todo {
        self.inner.clone()
    }

    /// Same as [`MutableTodo::freeze`].
    pub fn to_immutable_copy(&self) -> Todo {
        self.freeze()
    }

    fn touch(&mut self) {
        self.touch_at(now_epoch_ms());
    }

    fn touch_at(&mut self, now_ms: i64) {
        self.inner.modification_date = self.inner.modification_date.max(now_ms);
    }
}

impl From<Todo> for MutableTodo {
    fn from(todo: Todo) -> Self {
        Self { inner: todo }
    }
}

impl From<MutableTodo> for Todo {
    fn from(todo: MutableTodo) -> Self {
        todo.inner
    }
}

fn validate_title(title: &str) -> Result<(), TodoValidationError> {
    if title.trim().is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    Ok(())
}

/// Wall clock in Unix epoch milliseconds.
fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
