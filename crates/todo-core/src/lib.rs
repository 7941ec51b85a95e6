//! todo-core: Core types for the Todo service
//!
//! This crate provides:
//! - Identifier newtypes (`TodoId`, `NoteId`)
//! - The `Todo` and `Note` records
//! - Input types for the write operations (`NewTodo`, `NewNote`)
//!
//! All types are plain data; validation and ownership live in `todo-store`.

pub mod types;

pub use types::*;
