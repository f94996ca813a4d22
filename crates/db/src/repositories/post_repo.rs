//! Repository for the `content_posts` table.

use sqlx::PgPool;

use pressroom_core::content::{reading_time_minutes, word_count};
use pressroom_core::types::DbId;

use crate::models::post::{ContentPost, NewPost, PostFilter, UpdateContentPost};

/// Column list for `content_posts` queries.
const COLUMNS: &str = "\
    id, blog_id, title, body, excerpt, status, slug, \
    seo_title, seo_description, seo_score, \
    word_count, reading_time_minutes, published_at, \
    wp_post_id, wp_link, wp_slug, created_at, updated_at";

/// Provides CRUD and linkage operations for content posts.
pub struct PostRepo;

impl PostRepo {
    // ── Queries ──────────────────────────────────────────────────────

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_posts WHERE id = $1");
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a post by its remote identity join key.
    ///
    /// This is the only lookup the import path uses: remote ids are
    /// immutable, titles and slugs are not.
    pub async fn find_by_wp_post_id(
        pool: &PgPool,
        blog_id: DbId,
        wp_post_id: DbId,
    ) -> Result<Option<ContentPost>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM content_posts WHERE blog_id = $1 AND wp_post_id = $2");
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(blog_id)
            .bind(wp_post_id)
            .fetch_optional(pool)
            .await
    }

    /// List posts for a blog with optional status and substring filters.
    ///
    /// Results are ordered newest-created first.
    pub async fn list_by_blog(
        pool: &PgPool,
        blog_id: DbId,
        filter: &PostFilter,
    ) -> Result<Vec<ContentPost>, sqlx::Error> {
        let mut conditions = vec!["blog_id = $1".to_string()];
        let mut param_idx: usize = 2;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(title ILIKE ${param_idx} OR body ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM content_posts \
             WHERE {} \
             ORDER BY created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            conditions.join(" AND "),
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, ContentPost>(&query).bind(blog_id);

        if let Some(status) = &filter.status {
            q = q.bind(status);
        }
        if let Some(search) = &filter.search {
            q = q.bind(format!("%{search}%"));
        }
        q = q.bind(filter.limit).bind(filter.offset);

        q.fetch_all(pool).await
    }

    /// List the posts eligible for export (status `publish`), oldest first
    /// so earlier posts claim their remote identity before later ones.
    pub async fn list_eligible_for_export(
        pool: &PgPool,
        blog_id: DbId,
    ) -> Result<Vec<ContentPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_posts \
             WHERE blog_id = $1 AND status = 'publish' \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(blog_id)
            .fetch_all(pool)
            .await
    }

    /// Load an explicit subset of posts for a blog, oldest first.
    pub async fn list_by_ids(
        pool: &PgPool,
        blog_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<ContentPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_posts \
             WHERE blog_id = $1 AND id = ANY($2) \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(blog_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Insert a fully-resolved post, returning the full row.
    pub async fn create(pool: &PgPool, new_post: &NewPost) -> Result<ContentPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_posts \
                (blog_id, title, body, excerpt, status, slug, \
                 seo_title, seo_description, word_count, reading_time_minutes, \
                 published_at, wp_post_id, wp_link, wp_slug) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(new_post.blog_id)
            .bind(&new_post.title)
            .bind(&new_post.body)
            .bind(&new_post.excerpt)
            .bind(&new_post.status)
            .bind(&new_post.slug)
            .bind(&new_post.seo_title)
            .bind(&new_post.seo_description)
            .bind(new_post.word_count)
            .bind(new_post.reading_time_minutes)
            .bind(new_post.published_at)
            .bind(new_post.wp_post_id)
            .bind(&new_post.wp_link)
            .bind(&new_post.wp_slug)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. When the body changes, `word_count` and
    /// `reading_time_minutes` are recomputed in the same statement so the
    /// derived fields never go stale. Returns the updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateContentPost,
    ) -> Result<Option<ContentPost>, sqlx::Error> {
        let derived = changes.body.as_deref().map(|body| {
            let words = word_count(body);
            (words, reading_time_minutes(words))
        });

        let query = format!(
            "UPDATE content_posts SET \
                title = COALESCE($2, title), \
                body = COALESCE($3, body), \
                excerpt = COALESCE($4, excerpt), \
                status = COALESCE($5, status), \
                slug = COALESCE($6, slug), \
                seo_title = COALESCE($7, seo_title), \
                seo_description = COALESCE($8, seo_description), \
                published_at = COALESCE($9, published_at), \
                word_count = COALESCE($10, word_count), \
                reading_time_minutes = COALESCE($11, reading_time_minutes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.body)
            .bind(&changes.excerpt)
            .bind(&changes.status)
            .bind(&changes.slug)
            .bind(&changes.seo_title)
            .bind(&changes.seo_description)
            .bind(changes.published_at)
            .bind(derived.map(|(words, _)| words))
            .bind(derived.map(|(_, minutes)| minutes))
            .fetch_optional(pool)
            .await
    }

    /// Record the remote identity established by a successful export.
    pub async fn set_wp_linkage(
        pool: &PgPool,
        id: DbId,
        wp_post_id: DbId,
        wp_link: Option<&str>,
        wp_slug: Option<&str>,
    ) -> Result<Option<ContentPost>, sqlx::Error> {
        let query = format!(
            "UPDATE content_posts \
             SET wp_post_id = $2, wp_link = $3, wp_slug = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(id)
            .bind(wp_post_id)
            .bind(wp_link)
            .bind(wp_slug)
            .fetch_optional(pool)
            .await
    }

    /// Drop a stale remote linkage (the remote post was deleted out-of-band);
    /// the next export run re-creates the remote copy.
    pub async fn clear_wp_linkage(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_posts \
             SET wp_post_id = NULL, wp_link = NULL, wp_slug = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a computed SEO score. Returns the updated row if found.
    pub async fn set_seo_score(
        pool: &PgPool,
        id: DbId,
        score: i16,
    ) -> Result<Option<ContentPost>, sqlx::Error> {
        let query = format!(
            "UPDATE content_posts SET seo_score = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentPost>(&query)
            .bind(id)
            .bind(score)
            .fetch_optional(pool)
            .await
    }

    /// Delete a local post. The WordPress copy, if any, is untouched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
