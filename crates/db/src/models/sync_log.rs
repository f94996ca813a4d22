//! Sync run audit log models.

use serde::Serialize;
use sqlx::FromRow;

use pressroom_core::types::{DbId, Timestamp};

/// One sync run: direction, lifecycle status, and the detail payload
/// (counts plus per-post error strings) written when the run finishes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncLogEntry {
    pub id: DbId,
    pub blog_id: DbId,
    pub direction: String,
    pub status: String,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}
