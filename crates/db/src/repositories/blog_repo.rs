//! Repository for the `blogs` table.

use sqlx::PgPool;

use pressroom_core::types::DbId;

use crate::models::blog::{Blog, CreateBlog, UpdateBlog};

/// Column list for `blogs` queries.
const COLUMNS: &str = "\
    id, name, domain, niche, description, is_active, \
    wp_base_url, wp_username, wp_app_password, webhook_secret, \
    created_at, updated_at";

/// Provides CRUD operations for managed blogs.
pub struct BlogRepo;

impl BlogRepo {
    /// Create a new blog, returning the full row.
    ///
    /// A duplicate domain violates the `uq_blogs_domain` constraint and
    /// surfaces as a database error for the API layer to classify.
    pub async fn create(pool: &PgPool, input: &CreateBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs \
                (name, domain, niche, description, \
                 wp_base_url, wp_username, wp_app_password, webhook_secret) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.name)
            .bind(&input.domain)
            .bind(&input.niche)
            .bind(&input.description)
            .bind(&input.wp_base_url)
            .bind(&input.wp_username)
            .bind(&input.wp_app_password)
            .bind(&input.webhook_secret)
            .fetch_one(pool)
            .await
    }

    /// Find a blog by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a blog by its unique domain.
    pub async fn find_by_domain(pool: &PgPool, domain: &str) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE domain = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(domain)
            .fetch_optional(pool)
            .await
    }

    /// List blogs ordered by ID, active only unless `include_inactive`.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Blog>, sqlx::Error> {
        let where_clause = if include_inactive {
            ""
        } else {
            "WHERE is_active = true "
        };
        let query = format!("SELECT {COLUMNS} FROM blogs {where_clause}ORDER BY id ASC");
        sqlx::query_as::<_, Blog>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Absent fields keep their current value.
    /// Returns the updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateBlog,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET \
                name = COALESCE($2, name), \
                domain = COALESCE($3, domain), \
                niche = COALESCE($4, niche), \
                description = COALESCE($5, description), \
                is_active = COALESCE($6, is_active), \
                wp_base_url = COALESCE($7, wp_base_url), \
                wp_username = COALESCE($8, wp_username), \
                wp_app_password = COALESCE($9, wp_app_password), \
                webhook_secret = COALESCE($10, webhook_secret) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.domain)
            .bind(&changes.niche)
            .bind(&changes.description)
            .bind(changes.is_active)
            .bind(&changes.wp_base_url)
            .bind(&changes.wp_username)
            .bind(&changes.wp_app_password)
            .bind(&changes.webhook_secret)
            .fetch_optional(pool)
            .await
    }

    /// Soft-disable or re-enable a blog. Returns `true` if a row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE blogs SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a blog. Returns `true` if a row was deleted; fails while
    /// dependent content still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
