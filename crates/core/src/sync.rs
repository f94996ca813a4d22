//! Vocabulary types for synchronization runs.
//!
//! A sync run moves post data between the local store and a blog's WordPress
//! site in one direction. These types carry the direction, the run status
//! stored on the log row, and the per-run report of counts and per-post
//! failures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── Direction ────────────────────────────────────────────────────────

/// Which way a sync run moves post data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    /// Import: WordPress is the source of truth for the posts it touches.
    WpToStore,
    /// Export: the local store is the source of truth for the posts it touches.
    StoreToWp,
}

impl SyncDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WpToStore => "wp_to_store",
            Self::StoreToWp => "store_to_wp",
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wp_to_store" => Ok(Self::WpToStore),
            "store_to_wp" => Ok(Self::StoreToWp),
            other => Err(CoreError::Validation(format!(
                "unknown sync direction `{other}` (expected wp_to_store or store_to_wp)"
            ))),
        }
    }
}

// ── Run status ───────────────────────────────────────────────────────

/// Lifecycle of a sync run as persisted on its log row.
///
/// `Running` is written before the first post is touched. A run that is
/// interrupted mid-loop (process crash) keeps its `running` row forever;
/// recovery is manual inspection, not automatic healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

// ── Report ───────────────────────────────────────────────────────────

/// A single post that failed during a run, identified by title for the
/// operator (titles are display-only here, never identity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostError {
    pub title: String,
    pub error: String,
}

/// Accumulated outcome of one sync run.
///
/// Per-post failures are recorded and the loop continues; a non-empty error
/// list still belongs to a `completed` run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub posts_synced: i64,
    pub media_synced: i64,
    pub errors: Vec<PostError>,
}

impl SyncReport {
    pub fn record_synced(&mut self) {
        self.posts_synced += 1;
    }

    pub fn record_media(&mut self) {
        self.media_synced += 1;
    }

    pub fn record_error(&mut self, title: impl Into<String>, error: impl fmt::Display) {
        self.errors.push(PostError {
            title: title.into(),
            error: error.to_string(),
        });
    }

    pub fn error_count(&self) -> i64 {
        self.errors.len() as i64
    }

    /// The JSON detail payload persisted on the sync log row.
    pub fn detail_json(&self) -> serde_json::Value {
        serde_json::json!({
            "posts_synced": self.posts_synced,
            "media_synced": self.media_synced,
            "errors": self.error_count(),
            "error_details": self.errors,
        })
    }
}
