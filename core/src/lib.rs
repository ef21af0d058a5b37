//! # Todo Widget Core
//!
//! Core traits and types for the todo widget.
//!
//! The widget follows the reducer pattern: a single owned state value, a pure
//! reducer that turns actions into state changes, and a runtime (`Store`, in
//! the runtime crate) that owns the state and notifies observers.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, fingerprinted for change detection
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work described as a value, executed by the store
//! - **Environment**: Injected dependencies (clock, id generation)
//! - **Snapshot**: Immutable shared value tagged with a unique [`snapshot::Generation`]
//! - **Memo**: Single-entry cache keyed by a fingerprint of its input
//! - **Callback**: Shared closure whose identity survives re-renders
//!
//! ## Example
//!
//! ```
//! use todo_widget_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let effects = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! assert!(effects.is_empty());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Shared closures with stable identity
pub mod callback;

/// Single-entry memoization keyed by input fingerprints
pub mod memo;

/// Immutable, generation-tagged snapshots
pub mod snapshot;

/// State fingerprinting for change notification
pub mod state;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = TodoEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoState,
    ///         action: TodoAction,
    ///         env: &TodoEnvironment,
    ///     ) -> SmallVec<[Effect<TodoAction>; 4]> {
    ///         match action {
    ///             TodoAction::AddTodo { text } => {
    ///                 // Business logic here
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the store, in order
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work described as values
///
/// Effects describe what the store should do after a reducer returns. The
/// widget runs on a single event-loop turn, so every effect is synchronous:
/// an effect can only feed further actions back into the same store, and
/// those actions are processed before `send` returns.
pub mod effect {
    /// Effect type - describes follow-up work to be executed by the store
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        Send(Action),

        /// Run effects in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Send(action) => f.debug_tuple("Effect::Send").field(action).finish(),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Feed a single action back into the store
        #[must_use]
        pub const fn send(action: Action) -> Effect<Action> {
            Effect::Send(action)
        }

        /// Chain effects to run in order
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Flatten this effect into the actions it feeds back, in order
        pub fn into_actions(self, out: &mut impl Extend<Action>) {
            match self {
                Effect::None => {},
                Effect::Send(action) => out.extend(std::iter::once(action)),
                Effect::Sequential(effects) => {
                    for effect in effects {
                        effect.into_actions(out);
                    }
                },
            }
        }

        /// Returns true if this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Send(_) => false,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism (time, identifiers) are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of integer identifiers for new items
    ///
    /// Implementations should be monotonic. Uniqueness is not guaranteed by
    /// the trait: callers decide what to do when an id is already in use.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> i64;
    }

    /// Identifiers taken from the clock, in milliseconds since the epoch
    ///
    /// Two calls within the same millisecond return the same id.
    #[derive(Clone)]
    pub struct TimestampIds {
        clock: Arc<dyn Clock>,
    }

    impl TimestampIds {
        /// Creates a generator reading from the given clock
        #[must_use]
        pub fn new(clock: Arc<dyn Clock>) -> Self {
            Self { clock }
        }
    }

    impl std::fmt::Debug for TimestampIds {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("TimestampIds").finish_non_exhaustive()
        }
    }

    impl IdGenerator for TimestampIds {
        fn next_id(&self) -> i64 {
            self.clock.now().timestamp_millis()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, IdGenerator, TimestampIds};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    struct StoppedClock(DateTime<Utc>);

    impl Clock for StoppedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn sequential_effects_flatten_in_order() {
        let effect = Effect::chain(vec![
            Effect::send(1),
            Effect::None,
            Effect::chain(vec![Effect::send(2), Effect::send(3)]),
        ]);

        let mut actions = Vec::new();
        effect.into_actions(&mut actions);

        assert_eq!(actions, vec![1, 2, 3]);
    }

    #[test]
    fn nested_none_is_none() {
        let effect: Effect<()> = Effect::chain(vec![Effect::None, Effect::chain(vec![])]);
        assert!(effect.is_none());
        assert!(!Effect::send(()).is_none());
    }

    #[test]
    fn timestamp_ids_use_milliseconds() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let ids = TimestampIds::new(Arc::new(StoppedClock(at)));

        assert_eq!(ids.next_id(), at.timestamp_millis());
        // A stopped clock collides on every call.
        assert_eq!(ids.next_id(), ids.next_id());
    }
}
