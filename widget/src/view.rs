//! Derived view of the todo state.
//!
//! [`TodoView`] turns a [`TodoState`] into a [`Frame`] for the renderer
//! without touching the state:
//!
//! - the item count is memoized against the collection's
//!   [`Generation`], so it is recomputed once per published snapshot and never
//!   for draft-only changes
//! - each row is memoized against its item and its delete callback, so an
//!   unchanged item keeps its `Rc<TodoRow>` across renders. Rows are keyed by
//!   id and by how many earlier items share that id, so accepted duplicate ids
//!   get a cache slot each
//! - the delete callback is created once with the view and handed to every
//!   row, which is what lets the row memo hit

use crate::types::{TodoAction, TodoCollection, TodoError, TodoId, TodoItem, TodoState};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use todo_widget_core::{callback::Callback, memo::Memo, snapshot::Generation};

/// Callback a row invokes to delete its item
pub type DeleteCallback = Callback<TodoId, TodoAction>;

/// One rendered item
#[derive(Debug)]
pub struct TodoRow {
    /// Item the row shows
    pub id: TodoId,
    /// Display text
    pub text: String,
    on_delete: DeleteCallback,
}

impl TodoRow {
    /// Activate the row's delete control
    ///
    /// Returns the action to send to the store.
    #[must_use]
    pub fn delete(&self) -> TodoAction {
        self.on_delete.call(self.id)
    }

    /// The callback this row was rendered with
    #[must_use]
    pub const fn on_delete(&self) -> &DeleteCallback {
        &self.on_delete
    }
}

/// Everything the renderer needs for one paint
#[derive(Debug)]
pub struct Frame {
    /// Number of items
    pub count: usize,
    /// Rows in collection order
    pub rows: Vec<Rc<TodoRow>>,
    /// Current draft text
    pub draft: String,
    /// Why the last add was refused, if it was
    pub error: Option<TodoError>,
}

/// Item id plus the number of earlier items carrying the same id
type RowKey = (TodoId, usize);

#[derive(Debug)]
struct CachedRow {
    item: TodoItem,
    on_delete: DeleteCallback,
    row: Rc<TodoRow>,
}

/// Memoizing view over [`TodoState`]
#[derive(Debug)]
pub struct TodoView {
    count: Memo<Generation, usize>,
    rows: HashMap<RowKey, CachedRow>,
    row_renders: u64,
    on_delete: DeleteCallback,
}

impl TodoView {
    /// Creates a view with an empty cache and its delete callback
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Memo::new("todo_count"),
            rows: HashMap::new(),
            row_renders: 0,
            on_delete: Callback::new(|id| TodoAction::RemoveTodo { id }),
        }
    }

    /// The delete callback; every call returns the same closure
    #[must_use]
    pub fn on_delete(&self) -> DeleteCallback {
        self.on_delete.clone()
    }

    /// Item count, recomputed only for a new snapshot
    pub fn count(&mut self, todos: &TodoCollection) -> usize {
        *self.count.get_or_compute(todos.generation(), || {
            tracing::debug!(generation = %todos.generation(), "Calculating todo count");
            todos.len()
        })
    }

    /// Row for `item`, re-rendered only if the item or callback changed
    ///
    /// Uses the cache slot of the first item with this id.
    pub fn row_for(&mut self, item: &TodoItem, on_delete: &DeleteCallback) -> Rc<TodoRow> {
        self.row_at((item.id(), 0), item, on_delete)
    }

    fn row_at(&mut self, key: RowKey, item: &TodoItem, on_delete: &DeleteCallback) -> Rc<TodoRow> {
        if let Some(cached) = self.rows.get(&key) {
            if cached.item == *item && cached.on_delete.ptr_eq(on_delete) {
                return Rc::clone(&cached.row);
            }
        }

        self.row_renders += 1;
        tracing::debug!(id = %item.id(), text = item.text(), "TodoItem rendered");

        let row = Rc::new(TodoRow {
            id: item.id(),
            text: item.text().to_owned(),
            on_delete: on_delete.clone(),
        });
        self.rows.insert(
            key,
            CachedRow {
                item: item.clone(),
                on_delete: on_delete.clone(),
                row: Rc::clone(&row),
            },
        );
        row
    }

    /// Build the frame for the current state
    ///
    /// Cached rows for items no longer in the collection are dropped.
    pub fn render(&mut self, state: &TodoState) -> Frame {
        let count = self.count(&state.todos);
        let on_delete = self.on_delete();

        let mut occurrences: HashMap<TodoId, usize> = HashMap::new();
        let mut live = HashSet::with_capacity(state.todos.len());
        let mut rows = Vec::with_capacity(state.todos.len());

        for item in &state.todos {
            let seen = occurrences.entry(item.id()).or_default();
            let key = (item.id(), *seen);
            *seen += 1;

            live.insert(key);
            rows.push(self.row_at(key, item, &on_delete));
        }

        self.rows.retain(|key, _| live.contains(key));

        Frame {
            count,
            rows,
            draft: state.draft.clone(),
            error: state.last_error.clone(),
        }
    }

    /// Times the count has been computed
    #[must_use]
    pub const fn count_computations(&self) -> u64 {
        self.count.computations()
    }

    /// Times a row has been (re)built
    #[must_use]
    pub const fn row_renders(&self) -> u64 {
        self.row_renders
    }
}

impl Default for TodoView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, text: &str) -> TodoItem {
        TodoItem::from_draft(TodoId::new(id), text).unwrap()
    }

    fn state_of(items: Vec<TodoItem>) -> TodoState {
        TodoState {
            todos: items.into_iter().collect(),
            ..TodoState::default()
        }
    }

    #[test]
    fn count_is_memoized_per_snapshot() {
        let mut view = TodoView::new();
        let todos: TodoCollection = vec![item(1, "a")].into_iter().collect();

        assert_eq!(view.count(&todos), 1);
        assert_eq!(view.count(&todos.clone()), 1);
        assert_eq!(view.count_computations(), 1);

        let more = todos.appended(item(2, "b"));
        assert_eq!(view.count(&more), 2);
        assert_eq!(view.count_computations(), 2);
    }

    #[test]
    fn content_equal_snapshot_still_recomputes() {
        let mut view = TodoView::new();
        let todos: TodoCollection = vec![item(1, "a")].into_iter().collect();
        view.count(&todos);

        view.count(&todos.without(TodoId::new(99)));

        assert_eq!(view.count_computations(), 2);
    }

    #[test]
    fn draft_change_does_not_recompute_count() {
        let mut view = TodoView::new();
        let mut state = state_of(vec![item(1, "a")]);
        view.render(&state);

        state.draft = "typing".to_string();
        let frame = view.render(&state);

        assert_eq!(frame.draft, "typing");
        assert_eq!(view.count_computations(), 1);
        assert_eq!(view.row_renders(), 1);
    }

    #[test]
    fn on_delete_identity_is_stable() {
        let view = TodoView::new();
        assert!(view.on_delete().ptr_eq(&view.on_delete()));
    }

    #[test]
    fn unchanged_rows_are_reused() {
        let mut view = TodoView::new();
        let state = state_of(vec![item(1, "a"), item(2, "b")]);
        let first = view.render(&state);

        let next = TodoState {
            todos: state.todos.appended(item(3, "c")),
            ..state
        };
        let second = view.render(&next);

        assert!(Rc::ptr_eq(&first.rows[0], &second.rows[0]));
        assert!(Rc::ptr_eq(&first.rows[1], &second.rows[1]));
        assert_eq!(view.row_renders(), 3);
    }

    #[test]
    fn new_callback_identity_rerenders_row() {
        let mut view = TodoView::new();
        let milk = item(1, "Buy milk");

        let stable = view.on_delete();
        view.row_for(&milk, &stable);
        view.row_for(&milk, &stable);
        assert_eq!(view.row_renders(), 1);

        let fresh: DeleteCallback = Callback::new(|id| TodoAction::RemoveTodo { id });
        view.row_for(&milk, &fresh);
        assert_eq!(view.row_renders(), 2);
    }

    #[test]
    fn row_delete_produces_remove_action() {
        let mut view = TodoView::new();
        let frame = view.render(&state_of(vec![item(5, "Walk dog")]));

        assert_eq!(frame.rows[0].delete(), TodoAction::RemoveTodo { id: TodoId::new(5) });
        assert!(frame.rows[0].on_delete().ptr_eq(&view.on_delete()));
    }

    #[test]
    fn removed_items_are_evicted() {
        let mut view = TodoView::new();
        let state = state_of(vec![item(1, "a"), item(2, "b")]);
        view.render(&state);

        let shrunk = TodoState {
            todos: state.todos.without(TodoId::new(1)),
            ..state
        };
        view.render(&shrunk);

        assert_eq!(view.rows.len(), 1);
        assert!(view.rows.contains_key(&(TodoId::new(2), 0)));
    }

    #[test]
    fn shared_ids_keep_separate_rows() {
        let mut view = TodoView::new();
        let state = state_of(vec![item(7, "Buy milk"), item(7, "Walk dog")]);

        let first = view.render(&state);
        let second = view.render(&state);

        assert_eq!(second.rows[0].text, "Buy milk");
        assert_eq!(second.rows[1].text, "Walk dog");
        assert!(Rc::ptr_eq(&first.rows[0], &second.rows[0]));
        assert!(Rc::ptr_eq(&first.rows[1], &second.rows[1]));
        assert_eq!(view.row_renders(), 2);
        assert_eq!(view.rows.len(), 2);
    }
}
