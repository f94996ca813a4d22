//! Connection settings and the client trait for one WordPress site.

use async_trait::async_trait;

use crate::error::WpError;
use crate::types::{PostFields, RemoteMedia, RemotePost, RemoteTerm};

/// Connection settings for a single WordPress site, resolved once per blog.
///
/// `base_url` is the site root (e.g. `https://blog.example`); the REST
/// prefix is appended by the client. The username/application-password pair
/// is sent as HTTP Basic auth on every call and is read-only configuration.
#[derive(Debug, Clone)]
pub struct BlogConnection {
    pub base_url: String,
    pub username: String,
    pub app_password: String,
}

impl BlogConnection {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        app_password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            app_password: app_password.into(),
        }
    }

    /// Root of the WP REST v2 API for this site.
    pub fn api_base(&self) -> String {
        format!("{}/wp-json/wp/v2", self.base_url.trim_end_matches('/'))
    }
}

/// Operations against one WordPress site.
///
/// [`WordPressApi`](crate::api::WordPressApi) is the HTTP implementation;
/// the sync coordinator's tests substitute an in-memory fake. Every call is
/// a single attempt with no retry; callers decide whether to retry or
/// skip-and-log.
#[async_trait]
pub trait WordPressClient: Send + Sync {
    /// Fetch one page of posts. `status` filters server-side when given.
    async fn list_posts(
        &self,
        page: u32,
        per_page: u32,
        status: Option<&str>,
    ) -> Result<Vec<RemotePost>, WpError>;

    /// Fetch a single post; [`WpError::NotFound`] if it no longer exists.
    async fn get_post(&self, remote_id: i64) -> Result<RemotePost, WpError>;

    /// Create a post. The returned id/link/slug establish the identity
    /// linkage for all future updates.
    async fn create_post(&self, fields: &PostFields) -> Result<RemotePost, WpError>;

    /// Partially update a post; [`WpError::NotFound`] means it was deleted
    /// upstream.
    async fn update_post(&self, remote_id: i64, fields: &PostFields)
        -> Result<RemotePost, WpError>;

    /// Delete a post. With `force`, skips the WordPress trash.
    async fn delete_post(&self, remote_id: i64, force: bool) -> Result<(), WpError>;

    async fn list_categories(&self) -> Result<Vec<RemoteTerm>, WpError>;

    async fn create_category(&self, name: &str) -> Result<RemoteTerm, WpError>;

    async fn list_tags(&self) -> Result<Vec<RemoteTerm>, WpError>;

    async fn create_tag(&self, name: &str) -> Result<RemoteTerm, WpError>;

    /// Upload a media file, returning its id and public URL.
    async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<RemoteMedia, WpError>;

    /// Lightweight credential check (lists a single post) used before a
    /// bulk sync.
    async fn test_connection(&self) -> Result<(), WpError>;
}
