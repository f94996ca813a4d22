//! Bilateral synchronization between the local post store and WordPress.
//!
//! [`SyncCoordinator`] moves post data one direction at a time, resolves
//! identity exclusively through the stored remote post id, isolates per-post
//! failures, and writes one audit log entry per run.

pub mod coordinator;
pub mod error;

pub use coordinator::{SyncCoordinator, SyncOutcome};
pub use error::SyncError;

use pressroom_db::models::blog::Blog;
use pressroom_wordpress::BlogConnection;

/// Resolve the WordPress connection settings stored on a blog row.
pub fn blog_connection(blog: &Blog) -> BlogConnection {
    BlogConnection::new(
        blog.wp_base_url.clone(),
        blog.wp_username.clone(),
        blog.wp_app_password.clone(),
    )
}
