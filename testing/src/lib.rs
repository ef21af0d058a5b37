//! # Todo Widget Testing
//!
//! Testing utilities and helpers for the todo widget.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (clocks, id generators)
//! - [`Recorder`], a store subscriber that keeps what it was notified of
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - proptest strategies for draft text
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_testing::{Recorder, mocks::SequentialIds};
//!
//! #[test]
//! fn test_add_publishes() {
//!     let env = TodoEnvironment::new(Arc::new(SequentialIds::default()), TodoConfig::default());
//!     let mut store = todo_store(env);
//!     let counts = Recorder::new();
//!     counts.attach(&mut store, |state| state.todos.len());
//!
//!     store.send(TodoAction::AddTodo { text: "Buy milk".into() }).unwrap();
//!
//!     assert_eq!(counts.values(), vec![1]);
//! }
//! ```

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use todo_widget_core::{environment::Clock, reducer::Reducer, state::Fingerprinted};
use todo_widget_runtime::{Store, SubscriptionId};


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};
    use todo_widget_core::environment::IdGenerator;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_widget_testing::mocks::FixedClock;
    /// use todo_widget_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    /// Predictable ids: `start`, `start + 1`, ...
    #[derive(Debug)]
    pub struct SequentialIds {
        next: AtomicI64,
    }

    impl SequentialIds {
        /// Start counting at `start`
        #[must_use]
        pub const fn starting_at(start: i64) -> Self {
            Self {
                next: AtomicI64::new(start),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::starting_at(1)
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> i64 {
            self.next.fetch_add(1, Ordering::Relaxed)
        }
    }

    /// Always returns the same id
    ///
    /// Simulates a timestamp generator called twice within one clock tick.
    #[derive(Debug, Clone, Copy)]
    pub struct ConstantIds(pub i64);

    impl IdGenerator for ConstantIds {
        fn next_id(&self) -> i64 {
            self.0
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Text that is empty or whitespace only
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n\r]{0,8}"
    }

    /// Text with at least one non-whitespace character, possibly padded
    pub fn non_blank_text() -> impl Strategy<Value = String> {
        ("[ \t]{0,3}", "[a-zA-Z0-9][a-zA-Z0-9 ]{0,20}", "[ \t]{0,3}")
            .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
    }

    /// Either kind of draft, roughly half blank
    pub fn draft_text() -> impl Strategy<Value = String> {
        prop_oneof![blank_text(), non_blank_text()]
    }
}

/// Store subscriber that records a projection of every published state
///
/// Clones share the same record, so a clone can be moved into the store while
/// the test keeps the other.
#[derive(Debug)]
pub struct Recorder<T> {
    seen: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            seen: Rc::clone(&self.seen),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: 'static> Recorder<T> {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `store`, recording `project(state)` on every publish
    pub fn attach<S, A, E, R, F>(&self, store: &mut Store<S, A, E, R>, project: F) -> SubscriptionId
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Fingerprinted,
        A: std::fmt::Debug,
        F: Fn(&S) -> T + 'static,
    {
        let seen = Rc::clone(&self.seen);
        store.subscribe(move |state| seen.borrow_mut().push(project(state)))
    }

    /// Record a value directly
    pub fn push(&self, value: T) {
        self.seen.borrow_mut().push(value);
    }

    /// Number of notifications recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }

    /// Take everything recorded so far, leaving the record empty
    #[must_use]
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.seen.borrow_mut())
    }
}

impl<T: Clone + 'static> Recorder<T> {
    /// Copy of everything recorded so far
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.seen.borrow().clone()
    }

    /// Most recent record
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.seen.borrow().last().cloned()
    }
}

/// Install a test-friendly tracing subscriber (once per process)
///
/// Respects `RUST_LOG`; defaults to `debug` for the widget crates. Output is
/// captured by the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_widget=debug,todo_widget_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{test_clock, ConstantIds, FixedClock, SequentialIds};
