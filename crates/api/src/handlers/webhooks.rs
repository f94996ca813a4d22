//! Inbound WordPress webhook: push-based single-post import.
//!
//! WordPress (via a small mu-plugin or an automation hook) calls this
//! endpoint on post save/update with the normalized remote post shape. The
//! handler applies the same identity rules as a full import run for exactly
//! one post.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use pressroom_core::types::DbId;
use pressroom_sync::SyncCoordinator;
use pressroom_wordpress::RemotePost;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_blog, wp_client};
use crate::response::DataResponse;
use crate::state::AppState;

/// Header carrying the hex HMAC-SHA256 of the raw request body.
pub const SIGNATURE_HEADER: &str = "x-pressroom-signature";

type HmacSha256 = Hmac<Sha256>;

/// POST /api/v1/webhooks/wordpress/{blog_id}
///
/// When the blog has a webhook secret configured, the request must carry a
/// valid `x-pressroom-signature` header; without a secret the header is
/// ignored.
pub async fn wordpress_webhook(
    State(state): State<AppState>,
    Path(blog_id): Path<DbId>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let blog = load_blog(&state, blog_id).await?;

    if let Some(secret) = blog.webhook_secret.as_deref() {
        verify_signature(secret, &headers, &body)?;
    }

    let remote: RemotePost = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {e}")))?;

    let api = wp_client(&state, &blog);
    let coordinator = SyncCoordinator::new(&state.pool, &api);
    let post = coordinator.import_remote_post(blog.id, &remote).await?;

    tracing::info!(
        blog_id,
        wp_post_id = remote.id,
        post_id = post.id,
        "Webhook import applied",
    );

    Ok(Json(DataResponse { data: post }))
}

/// Check the request body against the blog's webhook secret.
///
/// Accepts the hex digest with or without a `sha256=` prefix.
fn verify_signature(secret: &str, headers: &HeaderMap, body: &[u8]) -> AppResult<()> {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing webhook signature".into()))?;
    let provided = provided.strip_prefix("sha256=").unwrap_or(provided);

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::InternalError("invalid webhook secret".into()))?;
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    if !provided.eq_ignore_ascii_case(&expected) {
        return Err(AppError::Unauthorized("webhook signature mismatch".into()));
    }
    Ok(())
}
