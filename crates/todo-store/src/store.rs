//! In-memory todo store.
//!
//! `TodoStore` is the single owner of all todo and note state. Every read and
//! write goes through it, and each operation holds the store lock for its
//! whole duration, so operations are atomic with respect to each other.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use todo_core::{NewNote, NewTodo, Note, Todo, TodoId};

use crate::error::{StoreError, StoreResult};
use crate::events::{Notifier, NotifierConfig, StoreEvent};

/// Todos the demo server starts with, as `(name, description)` pairs.
pub const DEMO_TODOS: [(&str, &str); 2] = [
    ("First todo", "something about the todo"),
    ("Second todo", "something about another todo"),
];

#[derive(Debug, Default)]
struct State {
    /// Todos in insertion order.
    todos: Vec<Todo>,
    /// Position of each todo in `todos`.
    index: HashMap<TodoId, usize>,
}

/// In-memory store of todos and their notes.
///
/// Share it behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct TodoStore {
    state: RwLock<State>,
    notifier: Notifier,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(NotifierConfig::default())
    }
}

impl TodoStore {
    /// Create an empty store.
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            state: RwLock::new(State::default()),
            notifier: Notifier::new(config),
        }
    }

    /// Create a store preloaded with [`DEMO_TODOS`].
    pub fn with_demo_data(config: NotifierConfig) -> StoreResult<Self> {
        let store = Self::new(config);
        store.seed_demo_data()?;
        Ok(store)
    }

    /// Insert [`DEMO_TODOS`] through `add_todo`.
    pub fn seed_demo_data(&self) -> StoreResult<Vec<Todo>> {
        DEMO_TODOS
            .iter()
            .map(|(name, description)| {
                self.add_todo(NewTodo::named(*name).with_description(*description))
            })
            .collect()
    }

    // Poisoning is recovered: every mutation validates first and then
    // performs a single push, so a panicking writer cannot leave partial state.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// The listener registry for this store's events.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// All todos in insertion order.
    pub fn list_todos(&self) -> Vec<Todo> {
        self.read().todos.clone()
    }

    /// Look up a todo by id.
    pub fn get_todo(&self, id: &TodoId) -> Option<Todo> {
        let state = self.read();
        state.index.get(id).map(|&pos| state.todos[pos].clone())
    }

    /// Number of todos in the store.
    pub fn len(&self) -> usize {
        self.read().todos.len()
    }

    /// Whether the store holds no todos.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create a todo and publish `TodoAdded`.
    ///
    /// A missing description is stored as an empty string.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the name is empty; the store is left unchanged.
    pub fn add_todo(&self, input: NewTodo) -> StoreResult<Todo> {
        require_non_empty("name", &input.name)?;

        let mut todo = Todo::new(input.name, input.description.unwrap_or_default());

        let mut state = self.write();
        while state.index.contains_key(&todo.id) {
            todo.id = TodoId::new();
        }

        let pos = state.todos.len();
        state.index.insert(todo.id, pos);
        state.todos.push(todo.clone());

        tracing::debug!(todo_id = %todo.id, position = pos, "Added todo");

        // Published under the write lock so listeners see events in mutation order.
        self.notifier.publish(&StoreEvent::TodoAdded { todo: todo.clone() });

        Ok(todo)
    }

    /// Append a note to an existing todo and publish `NoteAdded`.
    ///
    /// Only `NoteAdded` is published; the parent todo gets no event of its own.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the text is empty
    /// - `NotFound` if no todo has id `todo_id`
    pub fn add_note(&self, todo_id: &TodoId, input: NewNote) -> StoreResult<Note> {
        require_non_empty("text", &input.text)?;

        let mut state = self.write();
        let pos = *state
            .index
            .get(todo_id)
            .ok_or(StoreError::NotFound(*todo_id))?;

        let note = Note::new(input.text);
        state.todos[pos].notes.push(note.clone());

        tracing::debug!(
            todo_id = %todo_id,
            note_id = %note.id,
            note_count = state.todos[pos].notes.len(),
            "Added note"
        );

        self.notifier.publish(&StoreEvent::NoteAdded {
            todo_id: *todo_id,
            note: note.clone(),
        });

        Ok(note)
    }
}

/// Reject empty values. Whitespace counts as content.
fn require_non_empty(field: &'static str, value: &str) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::empty_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_todo_defaults_description() {
        let store = TodoStore::default();
        let todo = store.add_todo(NewTodo::named("Buy milk")).unwrap();

        assert_eq!(todo.name, "Buy milk");
        assert_eq!(todo.description, "");
        assert!(todo.notes.is_empty());
        assert_eq!(store.get_todo(&todo.id), Some(todo));
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let store = TodoStore::default();
        let todo = store.add_todo(NewTodo::named(" ")).unwrap();
        assert_eq!(todo.name, " ");

        let note = store.add_note(&todo.id, NewNote::new("\t")).unwrap();
        assert_eq!(note.text, "\t");

        let err = store.add_todo(NewTodo::named("")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: "name", .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_values_are_stored_untrimmed() {
        let store = TodoStore::default();
        let todo = store
            .add_todo(NewTodo::named(" padded ").with_description(" d "))
            .unwrap();
        assert_eq!(todo.name, " padded ");
        assert_eq!(todo.description, " d ");
    }

    #[test]
    fn test_empty_note_rejected_before_lookup() {
        let store = TodoStore::default();
        let err = store.add_note(&TodoId::new(), NewNote::new("")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: "text", .. }));
    }

    #[test]
    fn test_seed_demo_data() {
        let store = TodoStore::with_demo_data(NotifierConfig::default()).unwrap();
        let names: Vec<_> = store.list_todos().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["First todo", "Second todo"]);
        assert_eq!(store.list_todos()[1].description, "something about another todo");
    }

    #[test]
    fn test_seed_publishes_events() {
        let store = TodoStore::default();
        let mut sub = store.notifier().subscribe_todos();
        let seeded = store.seed_demo_data().unwrap();

        for todo in seeded {
            assert_eq!(sub.try_recv(), Some(StoreEvent::TodoAdded { todo }));
        }
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn test_note_ids_unique_across_todos() {
        let store = TodoStore::default();
        let a = store.add_todo(NewTodo::named("a")).unwrap();
        let b = store.add_todo(NewTodo::named("b")).unwrap();

        let n1 = store.add_note(&a.id, NewNote::new("same")).unwrap();
        let n2 = store.add_note(&b.id, NewNote::new("same")).unwrap();
        let n3 = store.add_note(&a.id, NewNote::new("same")).unwrap();

        assert_ne!(n1.id, n2.id);
        assert_ne!(n1.id, n3.id);
        assert_eq!(store.get_todo(&a.id).unwrap().notes, vec![n1, n3]);
    }
}
