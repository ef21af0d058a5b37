//! State fingerprinting.
//!
//! The store takes a fingerprint before and after each dispatch and only
//! notifies subscribers when the two differ. A fingerprint should be cheap to
//! take and compare: snapshots compare by [`Generation`](crate::snapshot::Generation),
//! small fields by value.
//!
//! `#[derive(State)]` from the macros crate generates the implementation.

/// State that can produce a comparable fingerprint of itself
pub trait Fingerprinted {
    /// Comparable projection of the state
    type Fingerprint: PartialEq;

    /// Capture the current fingerprint
    fn fingerprint(&self) -> Self::Fingerprint;
}

impl Fingerprinted for () {
    type Fingerprint = ();

    fn fingerprint(&self) -> Self::Fingerprint {}
}
