//! Immutable, generation-tagged snapshots.
//!
//! A [`Snapshot`] is a shared, read-only value. Every call to
//! [`Snapshot::new`] (or [`Snapshot::replace_with`]) tags the value with a
//! fresh [`Generation`] taken from a process-wide counter, so two snapshots
//! compare equal only if one is a clone of the other. Derived data can be
//! cached against the generation instead of the content.
//!
//! Generations are never reused, unlike pointer addresses, which the allocator
//! may hand out again once the old value is dropped.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Identity of a published snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next() -> Self {
        Self(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}

/// Immutable shared value identified by its [`Generation`]
///
/// Cloning is cheap (an `Arc` bump) and keeps the generation. Equality is
/// identity: a content-equal value built separately is a different snapshot.
///
/// # Example
///
/// ```
/// use todo_widget_core::snapshot::Snapshot;
///
/// let first = Snapshot::new(vec![1, 2, 3]);
/// let same = first.clone();
/// let rebuilt = first.replace_with(|items| items.clone());
///
/// assert_eq!(first, same);
/// assert_ne!(first, rebuilt);
/// assert_eq!(*first, *rebuilt);
/// ```
pub struct Snapshot<T> {
    value: Arc<T>,
    generation: Generation,
}

impl<T> Snapshot<T> {
    /// Publishes a new snapshot with a fresh generation
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
            generation: Generation::next(),
        }
    }

    /// Builds the next snapshot from this one
    ///
    /// The result always carries a new generation, even when `f` returns a
    /// value equal to the current one.
    #[must_use]
    pub fn replace_with<F>(&self, f: F) -> Self
    where
        F: FnOnce(&T) -> T,
    {
        Self::new(f(&self.value))
    }

    /// Identity of this snapshot
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns true if both handles point at the same published value
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        self.generation == other.generation
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            generation: self.generation,
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<T> Eq for Snapshot<T> {}

impl<T: Default> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("generation", &self.generation)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: Serialize> Serialize for Snapshot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}
