//! Run-level sync failures.
//!
//! Only failures that prevent a run from making progress live here; a
//! failure affecting a single post is recorded in the run's report and
//! never surfaces as an error.

use pressroom_core::error::CoreError;
use pressroom_wordpress::WpError;

/// A sync run failed before or outside the per-post loop.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The stored credentials were rejected; continuing per-post is
    /// pointless, so the run is marked `failed` immediately.
    #[error("WordPress credential check failed: {0}")]
    Auth(#[source] WpError),

    /// The pre-run connection check did not reach a working site.
    #[error("WordPress connection check failed: {0}")]
    Unreachable(#[source] WpError),

    /// Listing remote posts failed mid-import.
    #[error("WordPress listing failed: {0}")]
    List(#[source] WpError),

    /// The local store was unreachable or rejected a run-level write.
    #[error(transparent)]
    Db(#[from] sqlx::Error),

    /// Malformed input surfaced outside the per-post loop (webhook path).
    #[error(transparent)]
    Core(#[from] CoreError),
}
