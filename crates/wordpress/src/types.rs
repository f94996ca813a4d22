//! Wire types for the WordPress REST API.
//!
//! Inbound shapes mirror the `/wp-json/wp/v2` JSON (rendered fields are
//! nested objects); outbound [`PostFields`] serializes to the flat shape
//! WordPress accepts on create/update.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A `{ "rendered": "..." }` field as WordPress returns it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderedField {
    #[serde(default)]
    pub rendered: String,
}

/// A post as returned by `GET /wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemotePost {
    pub id: i64,
    #[serde(default)]
    pub title: RenderedField,
    #[serde(default)]
    pub content: RenderedField,
    #[serde(default)]
    pub excerpt: RenderedField,
    pub status: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub link: String,
    /// Publish timestamp in UTC, without offset (`2024-05-01T09:30:00`).
    #[serde(default)]
    pub date_gmt: Option<NaiveDateTime>,
}

/// A category or tag term.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteTerm {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// An uploaded media item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteMedia {
    pub id: i64,
    #[serde(default)]
    pub source_url: String,
}

/// Outbound post payload for create/update calls.
///
/// WordPress accepts plain strings where it returns rendered objects, and
/// ignores absent fields on partial updates, so every field is optional and
/// skipped when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<i64>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null", default)]
    pub meta: serde_json::Value,
}

impl PostFields {
    /// Attach SEO meta fields under WordPress's `meta` object.
    pub fn with_seo_meta(mut self, seo_title: Option<&str>, seo_description: Option<&str>) -> Self {
        if seo_title.is_none() && seo_description.is_none() {
            return self;
        }
        let mut meta = serde_json::Map::new();
        if let Some(title) = seo_title {
            meta.insert("seo_title".into(), title.into());
        }
        if let Some(description) = seo_description {
            meta.insert("seo_description".into(), description.into());
        }
        self.meta = serde_json::Value::Object(meta);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_post_deserializes_rendered_fields() {
        let json = serde_json::json!({
            "id": 123,
            "title": { "rendered": "Hello World" },
            "content": { "rendered": "<p>Body</p>", "protected": false },
            "excerpt": { "rendered": "<p>Short</p>" },
            "status": "publish",
            "slug": "hello-world",
            "link": "https://blog.example/hello-world/",
            "date_gmt": "2024-05-01T09:30:00"
        });

        let post: RemotePost = serde_json::from_value(json).unwrap();
        assert_eq!(post.id, 123);
        assert_eq!(post.title.rendered, "Hello World");
        assert_eq!(post.content.rendered, "<p>Body</p>");
        assert_eq!(post.status, "publish");
        assert!(post.date_gmt.is_some());
    }

    #[test]
    fn remote_post_tolerates_missing_optional_fields() {
        let json = serde_json::json!({ "id": 7, "status": "draft" });
        let post: RemotePost = serde_json::from_value(json).unwrap();
        assert_eq!(post.title.rendered, "");
        assert!(post.date_gmt.is_none());
    }

    #[test]
    fn post_fields_skip_unset_values() {
        let fields = PostFields {
            title: Some("Hello".into()),
            status: Some("publish".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["title"], "Hello");
        assert!(value.get("content").is_none());
        assert!(value.get("categories").is_none());
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn seo_meta_lands_under_meta_object() {
        let fields = PostFields::default().with_seo_meta(Some("SEO title"), None);
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["meta"]["seo_title"], "SEO title");
        assert!(value["meta"].get("seo_description").is_none());
    }
}
