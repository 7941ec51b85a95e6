//! Core data types for the Todo service.
//!
//! A `Todo` owns an ordered list of `Note`s. Both are identified by UUID v4
//! newtypes that serialize as plain strings, so the wire format exposes
//! opaque string identifiers.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a todo.
///
/// Wraps a UUID v4 so todo ids cannot be mixed up with note ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub Uuid);

impl TodoId {
    /// Creates a new random TodoId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TodoId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a note.
///
/// Notes draw from the same UUID generator as todos, so note ids are unique
/// across the whole store, not only within their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Records
// ============================================================================

/// A short text annotation owned by exactly one todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
}

impl Note {
    /// Creates a note with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            text: text.into(),
        }
    }
}

/// An item on the todo list.
///
/// `notes` only ever grows: new notes are appended, existing notes are never
/// removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub description: String,
    pub notes: Vec<Note>,
}

impl Todo {
    /// Creates a todo with a freshly generated id and no notes.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: TodoId::new(),
            name: name.into(),
            description: description.into(),
            notes: Vec::new(),
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Input for creating a todo.
///
/// A missing `name` deserializes to an empty string so that it is rejected
/// by validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewTodo {
    /// Creates an input with a name and no description.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for appending a note to a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub text: String,
}

impl NewNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_display_fromstr() {
        let id = TodoId::new();
        let parsed: TodoId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn todo_id_rejects_non_uuid() {
        assert!("1".parse::<TodoId>().is_err());
        assert!("not-a-uuid".parse::<NoteId>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = TodoId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn todo_serializes_expected_fields() {
        let mut todo = Todo::new("Buy milk", "");
        todo.notes.push(Note::new("2% please"));

        let value = serde_json::to_value(&todo).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["description", "id", "name", "notes"]);
        assert_eq!(value["notes"][0]["text"], "2% please");
        assert!(value["notes"][0]["id"].is_string());
    }

    #[test]
    fn new_todo_missing_fields_default() {
        let input: NewTodo = serde_json::from_str("{}").unwrap();
        assert_eq!(input.name, "");
        assert_eq!(input.description, None);

        let input: NewTodo =
            serde_json::from_str(r#"{"name":"x","description":"y"}"#).unwrap();
        assert_eq!(input, NewTodo::named("x").with_description("y"));
    }

    #[test]
    fn new_note_missing_text_defaults_to_empty() {
        let input: NewNote = serde_json::from_str("{}").unwrap();
        assert!(input.text.is_empty());
    }

    #[test]
    fn fresh_todo_has_no_notes() {
        let todo = Todo::new("a", "b");
        assert!(todo.notes.is_empty());
    }
}
