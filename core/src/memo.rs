//! Single-entry memoization.
//!
//! [`Memo`] caches one computed value together with the key it was computed
//! from. Asking again with an equal key returns the cached value; any other
//! key recomputes and replaces the entry. Keys are meant to be cheap
//! fingerprints of the input (a [`Generation`](crate::snapshot::Generation),
//! a length, a revision number) rather than the input itself.
//!
//! Every recomputation is counted and logged at debug level so callers and
//! tests can observe exactly when the cache missed.

/// Cache holding the last computed value and its key
///
/// # Example
///
/// ```
/// use todo_widget_core::memo::Memo;
///
/// let mut memo = Memo::new("double");
/// assert_eq!(*memo.get_or_compute(2, || 4), 4);
/// assert_eq!(*memo.get_or_compute(2, || unreachable!()), 4);
/// assert_eq!(*memo.get_or_compute(3, || 6), 6);
/// assert_eq!(memo.computations(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    label: &'static str,
    entry: Option<(K, V)>,
    computations: u64,
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Creates an empty cache; `label` names it in log output
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            entry: None,
            computations: 0,
        }
    }

    /// Returns the cached value for `key`, computing it on a miss
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        if matches!(&self.entry, Some((cached, _)) if *cached != key) {
            self.entry = None;
        }

        let label = self.label;
        let computations = &mut self.computations;
        let (_, value) = self.entry.get_or_insert_with(|| {
            *computations += 1;
            tracing::debug!(
                memo = label,
                computations = *computations,
                "Recomputing memoized value"
            );
            (key, compute())
        });
        value
    }

    /// The cached value, if any, without touching the key
    #[must_use]
    pub fn cached(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    /// Number of times the value has been computed
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// Drops the cached entry so the next lookup recomputes
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
