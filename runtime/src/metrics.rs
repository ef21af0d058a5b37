//! Metric names and descriptions for the store.
//!
//! The store records through the `metrics` facade. Nothing is exported unless
//! the host application installs a recorder; without one every call is a
//! no-op.
//!
//! # Example
//!
//! ```rust
//! use todo_widget_runtime::metrics;
//!
//! // Describe all metrics once, after installing a recorder.
//! metrics::register_metrics();
//! ```

use metrics::{describe_counter, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions run through the reducer, including fed-back ones
pub const ACTIONS_PROCESSED: &str = "store_actions_processed_total";

/// Dispatches whose fingerprint changed (or were forced) and notified subscribers
pub const SNAPSHOTS_PUBLISHED: &str = "store_snapshots_published_total";

/// Dispatches that left the state fingerprint unchanged
pub const DISPATCHES_UNCHANGED: &str = "store_dispatches_unchanged_total";

/// Dispatches cut short by the feedback limit
pub const FEEDBACK_LIMIT_EXCEEDED: &str = "store_feedback_limit_exceeded_total";

/// Wall time of a full dispatch, reducer and subscribers included
pub const DISPATCH_DURATION: &str = "store_dispatch_duration_seconds";

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        ACTIONS_PROCESSED,
        "Total number of actions processed by the reducer"
    );
    describe_counter!(
        SNAPSHOTS_PUBLISHED,
        "Total number of state changes published to subscribers"
    );
    describe_counter!(
        DISPATCHES_UNCHANGED,
        "Total number of dispatches that left the state unchanged"
    );
    describe_counter!(
        FEEDBACK_LIMIT_EXCEEDED,
        "Total number of dispatches aborted by the feedback limit"
    );
    describe_histogram!(
        DISPATCH_DURATION,
        "Time taken to process one dispatch"
    );
}
