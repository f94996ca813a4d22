//! Blog entity models.
//!
//! A blog is one managed WordPress site: display metadata plus the
//! connection settings used for every REST call against it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pressroom_core::types::{DbId, Timestamp};

/// A managed WordPress blog.
///
/// Credentials never leave the API: the application password and webhook
/// secret are excluded from serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub name: String,
    pub domain: String,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub wp_base_url: String,
    pub wp_username: String,
    #[serde(skip_serializing)]
    pub wp_app_password: String,
    #[serde(skip_serializing)]
    pub webhook_secret: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input payload for creating a blog.
#[derive(Debug, Deserialize)]
pub struct CreateBlog {
    pub name: String,
    pub domain: String,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub wp_base_url: String,
    pub wp_username: String,
    pub wp_app_password: String,
    pub webhook_secret: Option<String>,
}

/// Partial update payload for a blog. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBlog {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub niche: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub wp_base_url: Option<String>,
    pub wp_username: Option<String>,
    pub wp_app_password: Option<String>,
    pub webhook_secret: Option<String>,
}
