//! Repository for the `sync_logs` table.
//!
//! The log is append-only: `start_run` inserts a `running` row before any
//! post is touched, and `finish_run` moves it to a terminal status exactly
//! once. Terminal rows are never mutated again.

use sqlx::PgPool;

use pressroom_core::sync::{RunStatus, SyncDirection};
use pressroom_core::types::DbId;

use crate::models::sync_log::SyncLogEntry;

/// Column list for `sync_logs` queries.
const COLUMNS: &str = "id, blog_id, direction, status, details, created_at, finished_at";

/// Provides the run lifecycle and history queries for sync logs.
pub struct SyncLogRepo;

impl SyncLogRepo {
    /// Open a new run in the `running` state.
    pub async fn start_run(
        pool: &PgPool,
        blog_id: DbId,
        direction: SyncDirection,
    ) -> Result<SyncLogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO sync_logs (blog_id, direction) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncLogEntry>(&query)
            .bind(blog_id)
            .bind(direction.as_str())
            .fetch_one(pool)
            .await
    }

    /// Finish a run with its terminal status and detail payload.
    ///
    /// Only rows still in `running` transition; finishing an already-terminal
    /// row is a no-op and returns `None`.
    pub async fn finish_run(
        pool: &PgPool,
        id: DbId,
        status: RunStatus,
        details: &serde_json::Value,
    ) -> Result<Option<SyncLogEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE sync_logs \
             SET status = $2, details = $3, finished_at = NOW() \
             WHERE id = $1 AND status = 'running' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SyncLogEntry>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(details)
            .fetch_optional(pool)
            .await
    }

    /// Find a run by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SyncLogEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sync_logs WHERE id = $1");
        sqlx::query_as::<_, SyncLogEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the most recent runs for a blog, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        blog_id: DbId,
        limit: i64,
    ) -> Result<Vec<SyncLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sync_logs \
             WHERE blog_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, SyncLogEntry>(&query)
            .bind(blog_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
