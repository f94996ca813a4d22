//! Handlers for the sync trigger surface and run history.
//!
//! Triggers respond with the flat `{ success, message, results }` shape in
//! both outcomes so automation callers can consume one format. Runs for the
//! same blog are not serialized here; callers are expected to avoid firing
//! a second run for a blog while one is in flight.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use pressroom_core::error::CoreError;
use pressroom_core::search::clamp_limit;
use pressroom_core::sync::{SyncDirection, SyncReport};
use pressroom_core::types::DbId;
use pressroom_db::models::blog::Blog;
use pressroom_db::repositories::SyncLogRepo;
use pressroom_sync::{SyncCoordinator, SyncError, SyncOutcome};

use crate::error::{AppError, AppResult};
use crate::handlers::{load_blog, wp_client};
use crate::query::PaginationParams;
use crate::response::{DataResponse, SyncResults, SyncTriggerResponse};
use crate::state::AppState;

/// Default number of sync log entries returned.
const DEFAULT_LOG_LIMIT: i64 = 20;

/// Maximum number of sync log entries returned.
const MAX_LOG_LIMIT: i64 = 100;

/// Request body for `POST /sync`.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub blog_id: DbId,
    pub direction: SyncDirection,
}

/// Request body for `POST /sync/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkSyncRequest {
    pub blog_id: DbId,
    pub post_ids: Vec<DbId>,
    pub direction: SyncDirection,
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// POST /api/v1/sync
///
/// Run a full sync for a blog in the given direction.
pub async fn trigger_sync(
    State(state): State<AppState>,
    Json(input): Json<SyncRequest>,
) -> AppResult<Response> {
    let blog = load_blog(&state, input.blog_id).await?;
    ensure_active(&blog)?;

    let api = wp_client(&state, &blog);
    let coordinator =
        SyncCoordinator::new(&state.pool, &api).with_events(state.event_bus.as_ref());

    sync_response(coordinator.run(&blog, input.direction).await)
}

/// POST /api/v1/sync/bulk
///
/// Run a sync over an explicit subset of local post ids.
pub async fn trigger_bulk_sync(
    State(state): State<AppState>,
    Json(input): Json<BulkSyncRequest>,
) -> AppResult<Response> {
    if input.post_ids.is_empty() {
        return Err(AppError::BadRequest("post_ids must not be empty".into()));
    }

    let blog = load_blog(&state, input.blog_id).await?;
    ensure_active(&blog)?;

    let api = wp_client(&state, &blog);
    let coordinator =
        SyncCoordinator::new(&state.pool, &api).with_events(state.event_bus.as_ref());

    sync_response(
        coordinator
            .run_for_posts(&blog, &input.post_ids, input.direction)
            .await,
    )
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/blogs/{id}/sync-logs?limit=
///
/// Recent sync runs for a blog, newest first.
pub async fn list_sync_logs(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    load_blog(&state, blog_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT);
    let entries = SyncLogRepo::list_recent(&state.pool, blog_id, limit).await?;

    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

fn ensure_active(blog: &Blog) -> AppResult<()> {
    if !blog.is_active {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "blog `{}` is disabled",
            blog.domain
        ))));
    }
    Ok(())
}

/// Map a coordinator result onto the trigger response shape.
///
/// Completed runs (including those with per-post errors) are `success:
/// true`. Remote-side run failures keep the documented shape with `success:
/// false`; local failures (database, validation) use the standard error
/// body instead.
fn sync_response(result: Result<SyncOutcome, SyncError>) -> AppResult<Response> {
    match result {
        Ok(outcome) => {
            let results = SyncResults::from(outcome.report);
            let message = format!(
                "Synced {} posts ({} errors)",
                results.posts_synced, results.errors
            );
            Ok(Json(SyncTriggerResponse {
                success: true,
                message,
                results,
            })
            .into_response())
        }
        Err(SyncError::Db(err)) => Err(AppError::Database(err)),
        Err(SyncError::Core(err)) => Err(AppError::Core(err)),
        Err(err) => Ok((
            StatusCode::BAD_GATEWAY,
            Json(SyncTriggerResponse {
                success: false,
                message: err.to_string(),
                results: SyncResults::from(SyncReport::default()),
            }),
        )
            .into_response()),
    }
}
