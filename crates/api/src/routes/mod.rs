pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /blogs                            list, create
/// /blogs/{id}                       get, update, delete
/// /blogs/{id}/test-connection       validate stored credentials (POST)
/// /blogs/{id}/remote/categories     list, create WordPress categories
/// /blogs/{id}/remote/tags           list, create WordPress tags
/// /blogs/{id}/remote/media          upload media to WordPress (POST, multipart)
/// /blogs/{id}/sync-logs             recent sync runs
///
/// /posts                            list, create
/// /posts/{id}                       get, update, delete (local only)
/// /posts/{id}/seo-score             compute and store SEO score (POST)
/// /posts/{id}/remote                delete the WordPress copy (DELETE)
///
/// /sync                             run a full sync (POST {blog_id, direction})
/// /sync/bulk                        sync an explicit post subset (POST)
///
/// /webhooks/wordpress/{blog_id}     inbound post-save notification (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // -- Blogs --
        .route(
            "/blogs",
            get(handlers::blogs::list_blogs).post(handlers::blogs::create_blog),
        )
        .route(
            "/blogs/{id}",
            get(handlers::blogs::get_blog)
                .put(handlers::blogs::update_blog)
                .delete(handlers::blogs::delete_blog),
        )
        .route(
            "/blogs/{id}/test-connection",
            post(handlers::blogs::test_connection),
        )
        .route(
            "/blogs/{id}/remote/categories",
            get(handlers::blogs::list_remote_categories)
                .post(handlers::blogs::create_remote_category),
        )
        .route(
            "/blogs/{id}/remote/tags",
            get(handlers::blogs::list_remote_tags).post(handlers::blogs::create_remote_tag),
        )
        .route(
            "/blogs/{id}/remote/media",
            post(handlers::blogs::upload_remote_media),
        )
        .route("/blogs/{id}/sync-logs", get(handlers::sync::list_sync_logs))
        // -- Posts --
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/posts/{id}",
            get(handlers::posts::get_post)
                .put(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route("/posts/{id}/seo-score", post(handlers::posts::score_seo))
        .route(
            "/posts/{id}/remote",
            delete(handlers::posts::delete_remote_post),
        )
        // -- Sync --
        .route("/sync", post(handlers::sync::trigger_sync))
        .route("/sync/bulk", post(handlers::sync::trigger_bulk_sync))
        // -- Webhooks --
        .route(
            "/webhooks/wordpress/{blog_id}",
            post(handlers::webhooks::wordpress_webhook),
        )
}
