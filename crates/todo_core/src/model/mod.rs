//! Todo domain model.
//!
//! # Responsibility
//! - Define the immutable `Todo` value and its editable `MutableTodo` twin.
//! - Keep timestamp invariants inside the model instead of in callers.
//!
//! # Invariants
//! - Every todo is identified by a stable, non-nil `TodoId`.
//! - `modification_date >= creation_date` for every constructed value.

pub mod todo;
