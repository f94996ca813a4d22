//! HTTP handlers, grouped by resource.

pub mod blogs;
pub mod posts;
pub mod sync;
pub mod webhooks;

use pressroom_core::error::CoreError;
use pressroom_core::types::DbId;
use pressroom_db::models::blog::Blog;
use pressroom_db::repositories::BlogRepo;
use pressroom_sync::blog_connection;
use pressroom_wordpress::WordPressApi;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a blog by id or fail with 404.
pub(crate) async fn load_blog(state: &AppState, id: DbId) -> AppResult<Blog> {
    BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))
}

/// Build the WordPress client for a blog, reusing the app-wide connection
/// pool.
pub(crate) fn wp_client(state: &AppState, blog: &Blog) -> WordPressApi {
    WordPressApi::with_client(state.http.clone(), blog_connection(blog))
}
