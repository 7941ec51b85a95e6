//! todo-store: In-memory storage for the Todo service
//!
//! This crate provides:
//! - `TodoStore`: the single owner of all todo and note state
//! - `Notifier`: typed change notification with per-listener bounded queues
//!
//! # Usage
//!
//! ```rust,ignore
//! use todo_store::{NotifierConfig, TodoStore};
//! use todo_core::{NewNote, NewTodo};
//!
//! let store = TodoStore::new(NotifierConfig::default());
//! let mut created = store.notifier().subscribe_todos();
//!
//! let todo = store.add_todo(NewTodo::named("Buy milk"))?;
//! store.add_note(&todo.id, NewNote::new("2% please"))?;
//!
//! assert_eq!(store.list_todos().len(), 1);
//! ```

pub mod error;
pub mod events;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use events::{
    DEFAULT_QUEUE_CAPACITY, EventFilter, Notifier, NotifierConfig, StoreEvent, Subscription,
};
pub use store::{DEMO_TODOS, TodoStore};

// Re-export todo-core for downstream crates
pub use todo_core;
