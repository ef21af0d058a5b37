//! Single-page to-do list widget: text entry, add, delete and a live count.
//!
//! The widget is a thin layer over an in-memory list:
//!
//! - [`TodoStore`] owns the state. Every change to the list publishes a new
//!   [`TodoCollection`] snapshot and notifies subscribers.
//! - [`TodoView`] derives what is shown. The count is recomputed once per
//!   snapshot, rows are reused while their item and delete callback are
//!   unchanged, and the delete callback keeps its identity for the life of the
//!   view.
//! - [`render`] parses input lines and paints frames for the terminal.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use todo_widget::{todo_store, TodoAction, TodoConfig, TodoEnvironment, TodoView};
//! use todo_widget_core::environment::{SystemClock, TimestampIds};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ids = TimestampIds::new(Arc::new(SystemClock));
//! let mut store = todo_store(TodoEnvironment::new(Arc::new(ids), TodoConfig::default()));
//! let mut view = TodoView::new();
//!
//! store.send(TodoAction::AddTodo { text: "Buy milk".to_string() })?;
//! store.send(TodoAction::AddTodo { text: "   ".to_string() })?;
//!
//! let frame = view.render(store.state());
//! assert_eq!(frame.count, 1);
//!
//! // Deleting goes through the row's callback.
//! store.send(frame.rows[0].delete())?;
//! assert!(store.state().todos().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod reducer;
pub mod render;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{todo_store, AppError, Reply, TodoApp, TodoStore};
pub use config::{ConfigError, IdCollision, TodoConfig, UnchangedRemoval};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoCollection, TodoError, TodoId, TodoItem, TodoState};
pub use view::{Frame, TodoRow, TodoView};
