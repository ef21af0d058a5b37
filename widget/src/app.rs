//! The widget: store, view and input handling wired together.

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::render::{Command, HELP};
use crate::types::{TodoAction, TodoState};
use crate::view::{Frame, TodoView};
use thiserror::Error;
use todo_widget_runtime::{Dispatch, Store, StoreError};

/// The store holding a todo widget's state
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Creates a store with an empty list
#[must_use]
pub fn todo_store(env: TodoEnvironment) -> TodoStore {
    Store::new(TodoState::new(), TodoReducer::new(), env)
}

/// Errors surfaced while handling input
#[derive(Error, Debug)]
pub enum AppError {
    /// The store refused the dispatch
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The collection could not be encoded
    #[error("Failed to encode todos: {0}")]
    Json(#[from] serde_json::Error),
}

/// What the surface should show after a command
#[derive(Debug)]
pub enum Reply {
    /// Repaint with this frame
    Frame(Frame),
    /// Print this JSON document
    Json(String),
    /// Print help
    Help(&'static str),
    /// Tell the user the row does not exist
    NoSuchRow(usize),
    /// Tell the user the command was not understood
    Unknown(String),
    /// Stop reading input
    Quit,
}

/// Store and view of one widget instance
#[derive(Debug)]
pub struct TodoApp {
    store: TodoStore,
    view: TodoView,
}

impl TodoApp {
    /// Creates a widget with an empty list
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        let mut store = todo_store(env);
        store.subscribe(|state: &TodoState| {
            tracing::debug!(
                todos = state.todos.len(),
                generation = %state.todos.generation(),
                draft_len = state.draft.len(),
                "Snapshot published"
            );
        });

        Self {
            store,
            view: TodoView::new(),
        }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Mutable access to the store, for subscribing
    pub fn store_mut(&mut self) -> &mut TodoStore {
        &mut self.store
    }

    /// The view and its memo counters
    #[must_use]
    pub const fn view(&self) -> &TodoView {
        &self.view
    }

    /// Send an action straight to the store
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub fn send(&mut self, action: TodoAction) -> Result<Dispatch, AppError> {
        Ok(self.store.send(action)?)
    }

    /// Render the current state
    pub fn frame(&mut self) -> Frame {
        self.view.render(self.store.state())
    }

    /// Handle one command from the surface
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the store rejects a dispatch or the JSON
    /// export fails.
    pub fn handle(&mut self, command: Command) -> Result<Reply, AppError> {
        match command {
            // Blank lines leave the draft alone.
            Command::Submit(text) if text.trim().is_empty() => {},
            Command::Submit(text) => {
                self.send(TodoAction::SetDraft { text })?;
                self.send(TodoAction::CommitDraft)?;
            },
            Command::SetDraft(text) => {
                self.send(TodoAction::SetDraft { text })?;
            },
            Command::Add => {
                self.send(TodoAction::CommitDraft)?;
            },
            Command::Remove(n) => {
                let frame = self.frame();
                let Some(row) = n.checked_sub(1).and_then(|index| frame.rows.get(index)) else {
                    return Ok(Reply::NoSuchRow(n));
                };
                let action = row.delete();
                self.send(action)?;
            },
            Command::List => {},
            Command::Json => {
                let json = serde_json::to_string_pretty(self.store.state().todos())?;
                return Ok(Reply::Json(json));
            },
            Command::Help => return Ok(Reply::Help(HELP)),
            Command::Quit => return Ok(Reply::Quit),
            Command::Unknown(line) => return Ok(Reply::Unknown(line)),
        }

        Ok(Reply::Frame(self.frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TodoConfig;
    use crate::types::{TodoError, TodoId};
    use std::sync::Arc;
    use todo_widget_testing::{ConstantIds, SequentialIds};

    fn app() -> TodoApp {
        TodoApp::new(TodoEnvironment::new(
            Arc::new(SequentialIds::starting_at(1)),
            TodoConfig::default(),
        ))
    }

    fn frame(reply: Reply) -> Frame {
        match reply {
            Reply::Frame(frame) => frame,
            other => panic!("expected a frame, got {other:?}"),
        }
    }

    #[test]
    fn submit_adds_and_clears_input() {
        let mut app = app();

        let frame = frame(app.handle(Command::Submit(" Buy milk ".into())).unwrap());

        assert_eq!(frame.count, 1);
        assert_eq!(frame.rows[0].text, "Buy milk");
        assert!(frame.draft.is_empty());
    }

    #[test]
    fn blank_submit_keeps_pending_draft() {
        let mut app = app();
        app.handle(Command::SetDraft("Walk dog".into())).unwrap();
        let revision = app.store().revision();

        let frame = frame(app.handle(Command::Submit("   ".into())).unwrap());

        assert_eq!(frame.draft, "Walk dog");
        assert_eq!(frame.count, 0);
        assert_eq!(app.store().revision(), revision);
    }

    #[test]
    fn rejected_submit_keeps_text_in_input() {
        let mut app = TodoApp::new(TodoEnvironment::new(
            Arc::new(ConstantIds(7)),
            TodoConfig::default(),
        ));
        app.handle(Command::Submit("first".into())).unwrap();

        let frame = frame(app.handle(Command::Submit("second".into())).unwrap());

        assert_eq!(frame.count, 1);
        assert_eq!(frame.draft, "second");
        assert_eq!(frame.error, Some(TodoError::DuplicateId(TodoId::new(7))));
    }

    #[test]
    fn draft_then_add() {
        let mut app = app();

        let typed = frame(app.handle(Command::SetDraft("Walk dog".into())).unwrap());
        assert_eq!(typed.count, 0);
        assert_eq!(typed.draft, "Walk dog");

        let added = frame(app.handle(Command::Add).unwrap());
        assert_eq!(added.count, 1);
    }

    #[test]
    fn remove_uses_row_number() {
        let mut app = app();
        app.handle(Command::Submit("a".into())).unwrap();
        app.handle(Command::Submit("b".into())).unwrap();

        let frame = frame(app.handle(Command::Remove(1)).unwrap());

        assert_eq!(frame.rows.len(), 1);
        assert_eq!(frame.rows[0].text, "b");
    }

    #[test]
    fn remove_out_of_range() {
        let mut app = app();
        assert!(matches!(
            app.handle(Command::Remove(3)).unwrap(),
            Reply::NoSuchRow(3)
        ));
        assert_eq!(app.store().revision(), 0);
    }

    #[test]
    fn list_does_not_recompute() {
        let mut app = app();
        app.handle(Command::Submit("a".into())).unwrap();
        let before = app.view().count_computations();

        app.handle(Command::List).unwrap();
        app.handle(Command::List).unwrap();

        assert_eq!(app.view().count_computations(), before);
    }

    #[test]
    fn json_export() {
        let mut app = app();
        app.handle(Command::Submit("Buy milk".into())).unwrap();

        let Reply::Json(json) = app.handle(Command::Json).unwrap() else {
            panic!("expected json");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value, serde_json::json!([{ "id": 1, "text": "Buy milk" }]));
    }
}
