//! Domain types for the todo widget.
//!
//! A todo list is an ordered collection of items that can be added and
//! removed. The collection is never edited in place: every change publishes a
//! new [`TodoCollection`] snapshot and the previous one is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use todo_widget_core::snapshot::{Generation, Snapshot};
use todo_widget_macros::{Action, State};

/// Identifier of a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// The text is trimmed and never blank. Items are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoItem {
    id: TodoId,
    text: String,
}

impl TodoItem {
    /// Builds an item from raw input, trimming surrounding whitespace
    ///
    /// Returns `None` if nothing is left after trimming.
    #[must_use]
    pub fn from_draft(id: TodoId, raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id,
            text: text.to_owned(),
        })
    }

    /// Identifier
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Trimmed text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, immutable snapshot of todo items
///
/// Equality is snapshot identity: two collections are equal when one is a
/// clone of the other. Compare [`items`](Self::items) for content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TodoCollection(Snapshot<Vec<TodoItem>>);

impl TodoCollection {
    /// An empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of this snapshot
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.0.generation()
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.0
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.0.iter()
    }

    /// First item with the given id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.0.iter().find(|item| item.id == id)
    }

    /// Checks if an item with the given id exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Next snapshot with `item` appended at the end
    #[must_use]
    pub fn appended(&self, item: TodoItem) -> Self {
        Self(self.0.replace_with(|items| {
            let mut next = Vec::with_capacity(items.len() + 1);
            next.extend_from_slice(items);
            next.push(item);
            next
        }))
    }

    /// Next snapshot without any item carrying `id`
    ///
    /// Always a new snapshot, even when nothing matched.
    #[must_use]
    pub fn without(&self, id: TodoId) -> Self {
        Self(self.0.replace_with(|items| {
            items.iter().filter(|item| item.id != id).cloned().collect()
        }))
    }
}

impl FromIterator<TodoItem> for TodoCollection {
    fn from_iter<I: IntoIterator<Item = TodoItem>>(iter: I) -> Self {
        Self(Snapshot::new(iter.into_iter().collect()))
    }
}

impl<'a> IntoIterator for &'a TodoCollection {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reasons an add was refused
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TodoError {
    /// The generated id is already used by another item
    #[error("Todo id {0} is already in use")]
    DuplicateId(TodoId),
}

/// State of the todo widget
#[derive(State, Clone, Debug, Default)]
pub struct TodoState {
    /// Current collection snapshot
    pub todos: TodoCollection,
    /// Text typed but not yet committed
    pub draft: String,
    /// Why the last add was refused, cleared by the next successful change
    pub last_error: Option<TodoError>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current collection snapshot
    #[must_use]
    pub const fn todos(&self) -> &TodoCollection {
        &self.todos
    }

    /// Current draft text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }
}

/// Actions representing commands and events for the widget
///
/// Commands are what the user asks for. The reducer validates them and
/// applies the resulting events.
#[derive(Action, Clone, Debug, PartialEq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Replace the draft text
    #[command]
    SetDraft {
        /// New draft, unvalidated
        text: String,
    },

    /// Command: Add the draft as a todo and clear it
    #[command]
    CommitDraft,

    /// Command: Add a todo
    #[command]
    AddTodo {
        /// Raw text, trimmed by the reducer
        text: String,
    },

    /// Command: Remove a todo
    #[command]
    RemoveTodo {
        /// Todo to remove
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Todo was appended
    #[event]
    TodoAdded {
        /// The new item
        item: TodoItem,
    },

    /// Event: Collection was replaced without the given id
    #[event]
    TodoRemoved {
        /// Removed todo
        id: TodoId,
    },

    /// Event: Add was refused
    #[event]
    AddRejected {
        /// Reason
        error: TodoError,
    },
}
