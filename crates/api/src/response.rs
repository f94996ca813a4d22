//! Shared response envelope types for API handlers.
//!
//! CRUD responses use a `{ "data": ... }` envelope. The sync triggers keep
//! their flat `{ success, message, results }` shape because automation
//! callers consume them directly.

use serde::Serialize;

use pressroom_core::sync::{PostError, SyncReport};

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Counts and error details for one sync run.
#[derive(Debug, Serialize)]
pub struct SyncResults {
    pub posts_synced: i64,
    pub media_synced: i64,
    pub errors: i64,
    pub error_details: Vec<PostError>,
}

impl From<SyncReport> for SyncResults {
    fn from(report: SyncReport) -> Self {
        Self {
            posts_synced: report.posts_synced,
            media_synced: report.media_synced,
            errors: report.error_count(),
            error_details: report.errors,
        }
    }
}

/// Response body for the sync trigger endpoints.
#[derive(Debug, Serialize)]
pub struct SyncTriggerResponse {
    pub success: bool,
    pub message: String,
    pub results: SyncResults,
}
