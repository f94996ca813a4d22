//! Handlers for blog management and the per-blog WordPress passthroughs
//! (connection test, remote taxonomy, media upload).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use pressroom_core::error::CoreError;
use pressroom_core::types::DbId;
use pressroom_db::models::blog::{CreateBlog, UpdateBlog};
use pressroom_db::repositories::BlogRepo;
use pressroom_wordpress::WordPressClient;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_blog, wp_client};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a stored-credential check against a blog's WordPress site.
#[derive(Debug, Serialize)]
pub struct ConnectionCheck {
    pub ok: bool,
    pub error: Option<String>,
}

/// Request body for creating a remote category or tag.
#[derive(Debug, Deserialize)]
pub struct CreateTermRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Blog CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/blogs
///
/// Register a new managed blog with its WordPress connection settings.
pub async fn create_blog(
    State(state): State<AppState>,
    Json(input): Json<CreateBlog>,
) -> AppResult<impl IntoResponse> {
    for (value, field) in [
        (&input.name, "name"),
        (&input.domain, "domain"),
        (&input.wp_base_url, "wp_base_url"),
        (&input.wp_username, "wp_username"),
        (&input.wp_app_password, "wp_app_password"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} must not be empty")));
        }
    }

    let blog = BlogRepo::create(&state.pool, &input).await?;

    tracing::info!(blog_id = blog.id, domain = %blog.domain, "Blog created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: blog })))
}

/// GET /api/v1/blogs
///
/// List managed blogs, active only by default.
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let blogs = BlogRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// GET /api/v1/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let blog = load_blog(&state, blog_id).await?;
    Ok(Json(DataResponse { data: blog }))
}

/// PUT /api/v1/blogs/{id}
///
/// Update blog metadata, credentials, or the active flag.
pub async fn update_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
    Json(input): Json<UpdateBlog>,
) -> AppResult<impl IntoResponse> {
    let updated = BlogRepo::update(&state.pool, blog_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Blog",
            id: blog_id,
        }))?;

    tracing::info!(blog_id, "Blog updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/blogs/{id}
///
/// Hard-delete a blog. While content posts still reference it the delete is
/// rejected with 409; disable the blog instead (`is_active = false`).
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BlogRepo::delete(&state.pool, blog_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Blog",
            id: blog_id,
        }));
    }

    tracing::info!(blog_id, "Blog deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// WordPress passthroughs
// ---------------------------------------------------------------------------

/// POST /api/v1/blogs/{id}/test-connection
///
/// Validate the stored credentials with a lightweight WordPress call.
/// Always returns 200: the check result is in the payload.
pub async fn test_connection(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let blog = load_blog(&state, blog_id).await?;

    let check = match wp_client(&state, &blog).test_connection().await {
        Ok(()) => ConnectionCheck {
            ok: true,
            error: None,
        },
        Err(err) => {
            tracing::warn!(blog_id, error = %err, "WordPress connection check failed");
            ConnectionCheck {
                ok: false,
                error: Some(err.to_string()),
            }
        }
    };

    Ok(Json(DataResponse { data: check }))
}

/// GET /api/v1/blogs/{id}/remote/categories
pub async fn list_remote_categories(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let blog = load_blog(&state, blog_id).await?;
    let categories = wp_client(&state, &blog).list_categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/blogs/{id}/remote/categories
pub async fn create_remote_category(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
    Json(input): Json<CreateTermRequest>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let blog = load_blog(&state, blog_id).await?;
    let category = wp_client(&state, &blog)
        .create_category(input.name.trim())
        .await?;

    tracing::info!(blog_id, category_id = category.id, "Remote category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// POST /api/v1/blogs/{id}/remote/tags
pub async fn create_remote_tag(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
    Json(input): Json<CreateTermRequest>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let blog = load_blog(&state, blog_id).await?;
    let tag = wp_client(&state, &blog).create_tag(input.name.trim()).await?;

    tracing::info!(blog_id, tag_id = tag.id, "Remote tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/blogs/{id}/remote/tags
pub async fn list_remote_tags(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let blog = load_blog(&state, blog_id).await?;
    let tags = wp_client(&state, &blog).list_tags().await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/blogs/{id}/remote/media
///
/// Proxy a multipart file upload straight to the blog's WordPress media
/// library; nothing is stored locally.
pub async fn upload_remote_media(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let blog = load_blog(&state, blog_id).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
        .ok_or_else(|| AppError::BadRequest("missing file field".into()))?;

    let filename = field.file_name().unwrap_or("upload.bin").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

    let media = wp_client(&state, &blog)
        .upload_media(&filename, &content_type, bytes.to_vec())
        .await?;

    tracing::info!(blog_id, media_id = media.id, "Media uploaded to WordPress");

    Ok((StatusCode::CREATED, Json(DataResponse { data: media })))
}
