//! Use-case services over record stores.
//!
//! # Responsibility
//! - Expose todo use-cases without leaking storage or codec details.
//!
//! # Invariants
//! - Every read decodes through `Decode`; every write encodes through `Encode`.

pub mod todo_service;
