//! Content post entity models.
//!
//! A content post is the canonical, store-owned copy of an article. The
//! WordPress linkage columns (`wp_post_id`, `wp_link`, `wp_slug`) stay NULL
//! until the first successful export and are the identity join key for all
//! later syncs; titles and slugs are never used for identity matching.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pressroom_core::content::{plain_excerpt, reading_time_minutes, word_count, EXCERPT_MAX_CHARS};
use pressroom_core::error::CoreError;
use pressroom_core::slugging::derive_slug;
use pressroom_core::types::{DbId, Timestamp};

/// Post lifecycle statuses, matching the WordPress vocabulary.
pub const VALID_STATUSES: &[&str] = &["draft", "pending", "publish", "private"];

/// Status assigned when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "draft";

/// Check whether a status string is part of the post lifecycle vocabulary.
pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

/// A canonical content post row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentPost {
    pub id: DbId,
    pub blog_id: DbId,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub status: String,
    pub slug: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_score: Option<i16>,
    pub word_count: i32,
    pub reading_time_minutes: i32,
    pub published_at: Option<Timestamp>,
    pub wp_post_id: Option<DbId>,
    pub wp_link: Option<String>,
    pub wp_slug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input payload for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreateContentPost {
    pub blog_id: DbId,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub slug: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub published_at: Option<Timestamp>,
}

/// A fully-resolved insert payload.
///
/// The only way to build one is [`NewPost::from_input`], which validates the
/// input and computes the derived fields, so every inserted row satisfies
/// the invariant that `word_count` and `reading_time_minutes` match `body`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub blog_id: DbId,
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub status: String,
    pub slug: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub word_count: i32,
    pub reading_time_minutes: i32,
    pub published_at: Option<Timestamp>,
    pub wp_post_id: Option<DbId>,
    pub wp_link: Option<String>,
    pub wp_slug: Option<String>,
}

impl NewPost {
    /// Validate a create payload and resolve its derived fields.
    ///
    /// Fails with [`CoreError::Validation`] when the title or body is empty,
    /// the blog id is missing, the status is unknown, or no slug was supplied
    /// and none can be derived from the title.
    pub fn from_input(input: CreateContentPost) -> Result<Self, CoreError> {
        if input.blog_id <= 0 {
            return Err(CoreError::Validation("blog_id is required".into()));
        }
        if input.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if input.body.trim().is_empty() {
            return Err(CoreError::Validation("body must not be empty".into()));
        }

        let status = input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        if !is_valid_status(&status) {
            return Err(CoreError::Validation(format!(
                "unknown post status `{status}`"
            )));
        }

        let slug = match input.slug {
            Some(slug) if !slug.trim().is_empty() => slug,
            _ => derive_slug(&input.title)?,
        };

        let words = word_count(&input.body);
        let excerpt = input
            .excerpt
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| plain_excerpt(&input.body, EXCERPT_MAX_CHARS));

        Ok(Self {
            blog_id: input.blog_id,
            title: input.title,
            body: input.body,
            excerpt: Some(excerpt),
            status,
            slug,
            seo_title: input.seo_title,
            seo_description: input.seo_description,
            word_count: words,
            reading_time_minutes: reading_time_minutes(words),
            published_at: input.published_at,
            wp_post_id: None,
            wp_link: None,
            wp_slug: None,
        })
    }

    /// Pre-populate the WordPress linkage (import path: the remote post
    /// already exists and its id becomes the identity join key).
    pub fn with_linkage(mut self, wp_post_id: DbId, wp_link: Option<String>, wp_slug: Option<String>) -> Self {
        self.wp_post_id = Some(wp_post_id);
        self.wp_link = wp_link;
        self.wp_slug = wp_slug;
        self
    }
}

/// Partial update payload for a post. Absent fields are left unchanged; the
/// repository recomputes `word_count`/`reading_time_minutes` whenever `body`
/// is present.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContentPost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub slug: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub published_at: Option<Timestamp>,
}

/// Filters for listing posts within a blog.
#[derive(Debug, Default)]
pub struct PostFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match over title and body.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
