//! # Todo Widget Runtime
//!
//! Store runtime for the todo widget.
//!
//! The [`Store`] owns the state, runs the reducer for every action sent to it,
//! feeds effect-produced actions back in order, and notifies subscribers when
//! the state's fingerprint changed.
//!
//! ## Execution model
//!
//! - Single-threaded: `send` takes `&mut self` and runs to completion
//! - Ordered: fed-back actions are processed FIFO after the action that
//!   produced them, before `send` returns
//! - No suspension, timeouts or cancellation
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Observe published changes
//! store.subscribe(|state| println!("{state:?}"));
//!
//! // Send an action
//! let dispatch = store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.select(|s| s.some_field);
//! ```

use todo_widget_core::{reducer::Reducer, state::Fingerprinted};

/// Metric names and descriptions
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The reducer kept feeding actions back past the configured limit
        ///
        /// Actions still queued when the limit was hit are dropped. Changes
        /// made before that point are kept and published.
        #[error("Dispatch exceeded the limit of {limit} actions")]
        FeedbackLimitExceeded {
            /// Configured `max_actions_per_send`
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_widget_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_max_actions_per_send(16)
///     .with_publish_unchanged(true);
///
/// assert_eq!(config.max_actions_per_send, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Upper bound on actions processed by one `send`, fed-back ones included
    pub max_actions_per_send: usize,
    /// Notify subscribers even when the fingerprint did not change
    pub publish_unchanged: bool,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_actions_per_send: usize, publish_unchanged: bool) -> Self {
        Self {
            max_actions_per_send,
            publish_unchanged,
        }
    }

    /// Set the feedback limit
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, limit: usize) -> Self {
        self.max_actions_per_send = limit;
        self
    }

    /// Set whether unchanged dispatches still notify subscribers
    #[must_use]
    pub const fn with_publish_unchanged(mut self, publish: bool) -> Self {
        self.publish_unchanged = publish;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 64,
            publish_unchanged: false,
        }
    }
}

/// Outcome of one successful `send`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Store revision after the dispatch
    pub revision: u64,
    /// Whether the state fingerprint changed
    pub changed: bool,
    /// Whether subscribers were notified
    pub published: bool,
    /// Actions run through the reducer, the sent one included
    pub actions: usize,
}

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Store module - the state owner
pub mod store {
    use super::{
        Dispatch, Fingerprinted, Reducer, StoreConfig, StoreError, SubscriptionId,
        metrics::{
            counter, histogram, ACTIONS_PROCESSED, DISPATCHES_UNCHANGED, DISPATCH_DURATION,
            FEEDBACK_LIMIT_EXCEEDED, SNAPSHOTS_PUBLISHED,
        },
    };
    use std::collections::VecDeque;
    use std::fmt;
    use std::time::Instant;

    struct Subscriber<S> {
        id: SubscriptionId,
        notify: Box<dyn FnMut(&S)>,
    }

    /// The Store - runtime owner for a reducer's state
    ///
    /// The Store manages:
    /// 1. State (exclusively owned, handed out by reference)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect feedback (actions produced by effects run before `send` returns)
    /// 5. Subscribers (notified once per dispatch that changed the state)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        revision: u64,
        subscribers: Vec<Subscriber<S>>,
        next_subscription: u64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Fingerprinted,
        A: fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                revision: 0,
                subscribers: Vec::new(),
                next_subscription: 0,
            }
        }

        /// Current state
        #[must_use]
        pub const fn state(&self) -> &S {
            &self.state
        }

        /// Read a value derived from the current state
        pub fn select<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Injected dependencies
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Active configuration
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Number of dispatches published so far
        #[must_use]
        pub const fn revision(&self) -> u64 {
            self.revision
        }

        /// Consume the store, returning its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }

        /// Register a subscriber
        ///
        /// Subscribers are called in registration order, after a dispatch has
        /// fully completed, with the resulting state.
        pub fn subscribe<F>(&mut self, notify: F) -> SubscriptionId
        where
            F: FnMut(&S) + 'static,
        {
            let id = SubscriptionId(self.next_subscription);
            self.next_subscription += 1;
            self.subscribers.push(Subscriber {
                id,
                notify: Box::new(notify),
            });
            tracing::debug!(subscription = id.0, "Subscriber registered");
            id
        }

        /// Remove a subscriber; returns false if it was not registered
        pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            let before = self.subscribers.len();
            self.subscribers.retain(|subscriber| subscriber.id != id);
            before != self.subscribers.len()
        }

        /// Send an action to the store
        ///
        /// 1. Runs the reducer with (state, action, environment)
        /// 2. Queues the actions produced by the returned effects
        /// 3. Repeats for queued actions, first in first out
        /// 4. Compares the state fingerprint with the one taken before step 1
        /// 5. Notifies subscribers if it changed (or `publish_unchanged` is set)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if more than
        /// `max_actions_per_send` actions would run. Subscribers are still
        /// notified of the changes made up to that point.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<Dispatch, StoreError> {
            let started = Instant::now();
            let before = self.state.fingerprint();
            let limit = self.config.max_actions_per_send;

            let mut queue = VecDeque::from([action]);
            let mut processed = 0_usize;
            let mut outcome = Ok(());

            while let Some(action) = queue.pop_front() {
                if processed == limit {
                    tracing::error!(
                        limit,
                        dropped = queue.len() + 1,
                        "Feedback limit reached, dropping queued actions"
                    );
                    counter!(FEEDBACK_LIMIT_EXCEEDED).increment(1);
                    outcome = Err(StoreError::FeedbackLimitExceeded { limit });
                    break;
                }

                processed += 1;
                tracing::trace!(?action, "Reducing action");

                let effects = self
                    .reducer
                    .reduce(&mut self.state, action, &self.environment);
                for effect in effects {
                    effect.into_actions(&mut queue);
                }
            }

            counter!(ACTIONS_PROCESSED).increment(u64::try_from(processed).unwrap_or(u64::MAX));

            let changed = before != self.state.fingerprint();
            let published = changed || self.config.publish_unchanged;

            if published {
                self.revision += 1;
                counter!(SNAPSHOTS_PUBLISHED).increment(1);
                tracing::debug!(
                    revision = self.revision,
                    changed,
                    subscribers = self.subscribers.len(),
                    "Publishing state"
                );
                for subscriber in &mut self.subscribers {
                    (subscriber.notify)(&self.state);
                }
            } else {
                counter!(DISPATCHES_UNCHANGED).increment(1);
                tracing::debug!(actions = processed, "State unchanged, nothing published");
            }

            histogram!(DISPATCH_DURATION).record(started.elapsed().as_secs_f64());

            outcome.map(|()| Dispatch {
                revision: self.revision,
                changed,
                published,
                actions: processed,
            })
        }
    }

    impl<S, A, E, R> fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: fmt::Debug,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("config", &self.config)
                .field("revision", &self.revision)
                .field("subscribers", &self.subscribers.len())
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use todo_widget_core::{effect::Effect, smallvec, SmallVec};
    use todo_widget_macros::State;

    // Test state
    #[derive(State, Debug, Clone, Default)]
    struct TestState {
        value: i32,
        log: Vec<u8>,
        #[untracked]
        touched: u32,
    }

    // Test action
    #[derive(Debug, Clone)]
    enum TestAction {
        Increment,
        NoOp,
        Touch,
        IncrementTwiceLater,
        Record(u8),
        RecordFanOut,
        Forever,
    }

    // Test reducer
    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    SmallVec::new()
                },
                TestAction::NoOp => smallvec![Effect::None],
                TestAction::Touch => {
                    state.touched += 1;
                    SmallVec::new()
                },
                TestAction::IncrementTwiceLater => smallvec![Effect::chain(vec![
                    Effect::send(TestAction::Increment),
                    Effect::send(TestAction::Increment),
                ])],
                TestAction::Record(n) => {
                    state.log.push(n);
                    if n < 3 {
                        smallvec![Effect::send(TestAction::Record(n + 10))]
                    } else {
                        SmallVec::new()
                    }
                },
                TestAction::RecordFanOut => smallvec![
                    Effect::send(TestAction::Record(1)),
                    Effect::send(TestAction::Record(2)),
                ],
                TestAction::Forever => {
                    state.value += 1;
                    smallvec![Effect::send(TestAction::Forever)]
                },
            }
        }
    }

    fn store() -> Store<TestState, TestAction, (), TestReducer> {
        Store::new(TestState::default(), TestReducer, ())
    }

    #[test]
    fn test_store_creation() {
        let store = store();
        assert_eq!(store.state().value, 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_send_changes_state_and_publishes() {
        let mut store = store();

        let dispatch = store.send(TestAction::Increment).unwrap();

        assert_eq!(store.select(|s| s.value), 1);
        assert_eq!(
            dispatch,
            Dispatch {
                revision: 1,
                changed: true,
                published: true,
                actions: 1,
            }
        );
    }

    #[test]
    fn test_noop_is_not_published() {
        let mut store = store();
        let notified = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| *seen.borrow_mut() += 1);

        let dispatch = store.send(TestAction::NoOp).unwrap();

        assert!(!dispatch.published);
        assert_eq!(store.revision(), 0);
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn test_untracked_change_is_not_published() {
        let mut store = store();
        let dispatch = store.send(TestAction::Touch).unwrap();
        assert!(!dispatch.changed);
        assert_eq!(store.state().touched, 1);
    }

    #[test]
    fn test_publish_unchanged_config() {
        let config = StoreConfig::default().with_publish_unchanged(true);
        let mut store = Store::with_config(TestState::default(), TestReducer, (), config);

        let dispatch = store.send(TestAction::NoOp).unwrap();

        assert!(!dispatch.changed);
        assert!(dispatch.published);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_feedback_runs_before_send_returns() {
        let mut store = store();
        let notified = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&notified);
        store.subscribe(move |state: &TestState| seen.borrow_mut().push(state.value));

        let dispatch = store.send(TestAction::IncrementTwiceLater).unwrap();

        assert_eq!(dispatch.actions, 3);
        assert_eq!(store.state().value, 2);
        // One notification per dispatch, with the final state.
        assert_eq!(*notified.borrow(), vec![2]);
    }

    #[test]
    fn test_feedback_is_fifo() {
        let mut store = store();

        store.send(TestAction::RecordFanOut).unwrap();

        assert_eq!(store.state().log, vec![1, 2, 11, 12]);
    }

    #[test]
    fn test_feedback_limit() {
        let config = StoreConfig::default().with_max_actions_per_send(5);
        let mut store = Store::with_config(TestState::default(), TestReducer, (), config);
        let notified = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&notified);
        store.subscribe(move |_| *seen.borrow_mut() += 1);

        let result = store.send(TestAction::Forever);

        assert_eq!(result, Err(StoreError::FeedbackLimitExceeded { limit: 5 }));
        assert_eq!(store.state().value, 5);
        assert_eq!(*notified.borrow(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_subscribers_in_order_and_unsubscribe() {
        let mut store = store();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let calls = Rc::clone(&calls);
            store.subscribe(move |_| calls.borrow_mut().push("first"))
        };
        {
            let calls = Rc::clone(&calls);
            store.subscribe(move |_| calls.borrow_mut().push("second"));
        }

        store.send(TestAction::Increment).unwrap();
        assert!(store.unsubscribe(first));
        assert!(!store.unsubscribe(first));
        store.send(TestAction::Increment).unwrap();

        assert_eq!(*calls.borrow(), vec!["first", "second", "second"]);
    }

    #[test]
    fn test_into_state() {
        let mut store = store();
        store.send(TestAction::Increment).unwrap();
        assert_eq!(store.into_state().value, 1);
    }
}
