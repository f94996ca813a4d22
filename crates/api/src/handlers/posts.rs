//! Handlers for content post CRUD and SEO scoring.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use pressroom_core::error::CoreError;
use pressroom_core::search::{clamp_limit, clamp_offset};
use pressroom_core::seo;
use pressroom_core::types::DbId;
use pressroom_db::models::post::{
    is_valid_status, CreateContentPost, NewPost, PostFilter, UpdateContentPost,
};
use pressroom_db::repositories::PostRepo;
use pressroom_wordpress::WordPressClient;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_blog, wp_client};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for post listings.
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size for post listings.
const MAX_PAGE_SIZE: i64 = 200;

/// Query parameters for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    pub blog_id: DbId,
    pub status: Option<String>,
    /// Case-insensitive substring match over title and body.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /posts/{id}/seo-score`.
#[derive(Debug, Default, Deserialize)]
pub struct SeoScoreRequest {
    pub focus_keyword: Option<String>,
}

/// Query parameters for `DELETE /posts/{id}/remote`.
#[derive(Debug, Deserialize)]
pub struct RemoteDeleteParams {
    /// Skip the WordPress trash and delete permanently.
    #[serde(default)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Post CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/posts
///
/// Create a post. Word count, reading time, and (when absent) the slug and
/// excerpt are derived from the payload before the insert.
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<CreateContentPost>,
) -> AppResult<impl IntoResponse> {
    load_blog(&state, input.blog_id).await?;

    let new_post = NewPost::from_input(input)?;
    let post = PostRepo::create(&state.pool, &new_post).await?;

    tracing::info!(post_id = post.id, blog_id = post.blog_id, "Content post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/posts?blog_id=&status=&search=&limit=&offset=
///
/// List a blog's posts, newest-created first.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &params.status {
        if !is_valid_status(status) {
            return Err(AppError::BadRequest(format!("unknown post status `{status}`")));
        }
    }

    let filter = PostFilter {
        status: params.status,
        search: params.search,
        limit: clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        offset: clamp_offset(params.offset),
    };

    let posts = PostRepo::list_by_blog(&state.pool, params.blog_id, &filter).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPost",
            id: post_id,
        }))?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /api/v1/posts/{id}
///
/// Partial update; derived fields are recomputed when the body changes.
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<UpdateContentPost>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &input.status {
        if !is_valid_status(status) {
            return Err(AppError::BadRequest(format!("unknown post status `{status}`")));
        }
    }
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".into()));
        }
    }
    if let Some(body) = &input.body {
        if body.trim().is_empty() {
            return Err(AppError::BadRequest("body must not be empty".into()));
        }
    }

    let updated = PostRepo::update(&state.pool, post_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPost",
            id: post_id,
        }))?;

    tracing::info!(post_id, "Content post updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/posts/{id}
///
/// Delete the local post only. A linked WordPress copy is left untouched;
/// removing it is a separate, explicit operation against the remote site.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PostRepo::delete(&state.pool, post_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ContentPost",
            id: post_id,
        }));
    }

    tracing::info!(post_id, "Content post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/posts/{id}/remote?force=
///
/// The explicit operation that removes a post's WordPress copy. The local
/// post stays; its linkage is cleared so a later export re-creates the
/// remote copy if wanted.
pub async fn delete_remote_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Query(params): Query<RemoteDeleteParams>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPost",
            id: post_id,
        }))?;

    let remote_id = post
        .wp_post_id
        .ok_or_else(|| AppError::BadRequest("post has no WordPress linkage".into()))?;

    let blog = load_blog(&state, post.blog_id).await?;
    wp_client(&state, &blog)
        .delete_post(remote_id, params.force)
        .await?;

    PostRepo::clear_wp_linkage(&state.pool, post.id).await?;

    tracing::info!(post_id, remote_id, "Remote post deleted, linkage cleared");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// SEO
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{id}/seo-score
///
/// Compute the fixed-weight SEO score for a post and store it.
pub async fn score_seo(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<SeoScoreRequest>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPost",
            id: post_id,
        }))?;

    let score = seo::score_post(
        &post.title,
        post.seo_title.as_deref(),
        post.seo_description.as_deref(),
        &post.body,
        input.focus_keyword.as_deref(),
    );

    let updated = PostRepo::set_seo_score(&state.pool, post.id, score)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentPost",
            id: post_id,
        }))?;

    tracing::info!(post_id, score, "SEO score stored");

    Ok(Json(DataResponse { data: updated }))
}
