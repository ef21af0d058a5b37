//! Reducer logic for the todo widget.
//!
//! Commands are validated here and turned into events; events are the only
//! thing that touches the collection. Blank text and removals that match
//! nothing are not errors, they simply produce no event.

use crate::config::{IdCollision, TodoConfig, UnchangedRemoval};
use crate::types::{TodoAction, TodoError, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use todo_widget_core::{effect::Effect, environment::IdGenerator, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new items
    pub ids: Arc<dyn IdGenerator>,
    /// Policies for the edge cases
    pub config: TodoConfig,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, config: TodoConfig) -> Self {
        Self { ids, config }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reducer for the todo widget
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decides what an `AddTodo` command produces
    fn add(state: &TodoState, text: &str, env: &TodoEnvironment) -> Option<TodoAction> {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank todo text");
            return None;
        }

        let id = TodoId::new(env.ids.next_id());
        let item = TodoItem::from_draft(id, text)?;

        if state.todos.contains(id) {
            match env.config.id_collision {
                IdCollision::Reject => {
                    tracing::warn!(%id, "Generated id already in use, rejecting add");
                    return Some(TodoAction::AddRejected {
                        error: TodoError::DuplicateId(id),
                    });
                },
                IdCollision::Accept => {
                    tracing::warn!(%id, "Generated id already in use, adding duplicate");
                },
            }
        }

        Some(TodoAction::TodoAdded { item })
    }

    /// Decides what a `RemoveTodo` command produces
    fn remove(state: &TodoState, id: TodoId, env: &TodoEnvironment) -> Option<TodoAction> {
        if !state.todos.contains(id) {
            match env.config.unchanged_removal {
                UnchangedRemoval::Skip => {
                    tracing::debug!(%id, "No todo with this id, keeping snapshot");
                    return None;
                },
                UnchangedRemoval::Replace => {
                    tracing::debug!(%id, "No todo with this id, replacing snapshot anyway");
                },
            }
        }

        Some(TodoAction::TodoRemoved { id })
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        tracing::trace!(event = action.name(), "Applying event");

        match action {
            TodoAction::TodoAdded { item } => {
                state.todos = state.todos.appended(item.clone());
                state.last_error = None;
            },
            TodoAction::TodoRemoved { id } => {
                state.todos = state.todos.without(*id);
                state.last_error = None;
            },
            TodoAction::AddRejected { error } => {
                state.last_error = Some(error.clone());
            },
            // Commands are not applied to state
            TodoAction::SetDraft { .. }
            | TodoAction::CommitDraft
            | TodoAction::AddTodo { .. }
            | TodoAction::RemoveTodo { .. } => {},
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::SetDraft { text } => {
                state.draft = text;
                SmallVec::new()
            },

            // A rejected add keeps the draft.
            TodoAction::CommitDraft => {
                let Some(event) = Self::add(state, &state.draft, env) else {
                    return SmallVec::new();
                };

                if matches!(event, TodoAction::TodoAdded { .. }) {
                    state.draft.clear();
                }
                smallvec![Effect::send(event)]
            },

            TodoAction::AddTodo { text } => {
                if let Some(event) = Self::add(state, &text, env) {
                    Self::apply_event(state, &event);
                }
                SmallVec::new()
            },

            TodoAction::RemoveTodo { id } => {
                if let Some(event) = Self::remove(state, id, env) {
                    Self::apply_event(state, &event);
                }
                SmallVec::new()
            },

            // ========== Events ==========
            TodoAction::TodoAdded { .. }
            | TodoAction::TodoRemoved { .. }
            | TodoAction::AddRejected { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
