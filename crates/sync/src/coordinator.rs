//! The sync coordinator: one blog, one direction, one audit log entry.
//!
//! Identity between the two systems of record is resolved exclusively
//! through the stored remote post id. Titles and slugs can collide or
//! change, so they are never used for matching; a post without linkage is
//! created remotely (export) or locally (import), and the id returned by
//! that creation becomes the join key for every later run. This is what
//! makes back-to-back runs idempotent.
//!
//! Runs for different blogs may execute concurrently. Two runs for the same
//! blog and direction are not guarded here and can race on remote-id
//! assignment; callers serialize at the trigger layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pressroom_core::content::strip_html;
use pressroom_core::error::CoreError;
use pressroom_core::sync::{RunStatus, SyncDirection, SyncReport};
use pressroom_core::types::DbId;
use pressroom_db::models::blog::Blog;
use pressroom_db::models::post::{
    is_valid_status, ContentPost, CreateContentPost, NewPost, UpdateContentPost,
};
use pressroom_db::repositories::{PostRepo, SyncLogRepo};
use pressroom_events::bus::{SYNC_COMPLETED, SYNC_FAILED};
use pressroom_events::{EventBus, SyncEvent};
use pressroom_wordpress::{PostFields, RemotePost, WordPressClient, WpError};

use crate::error::SyncError;

/// Page size for sequential remote listing during import.
const PER_PAGE: u32 = 50;

/// Outcome of a finished run, mirrored onto its sync log entry.
#[derive(Debug)]
pub struct SyncOutcome {
    pub log_id: DbId,
    pub status: RunStatus,
    pub report: SyncReport,
}

/// A failure affecting a single post within a run. Recorded in the run
/// report; never aborts the loop.
#[derive(Debug, thiserror::Error)]
enum PostSyncError {
    #[error("{0}")]
    Wp(#[from] WpError),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("{0}")]
    Invalid(#[from] CoreError),

    /// The linked remote post was deleted out-of-band. The stale linkage is
    /// cleared so the next export run re-creates the remote copy.
    #[error("remote post {remote_id} no longer exists; linkage cleared for re-create")]
    StaleLinkage { remote_id: i64 },
}

/// Orchestrates bilateral post transfer for one blog.
pub struct SyncCoordinator<'a> {
    pool: &'a PgPool,
    client: &'a dyn WordPressClient,
    events: Option<&'a EventBus>,
}

impl<'a> SyncCoordinator<'a> {
    pub fn new(pool: &'a PgPool, client: &'a dyn WordPressClient) -> Self {
        Self {
            pool,
            client,
            events: None,
        }
    }

    /// Publish run-completion events on `bus`. Publishing is
    /// fire-and-forget and never affects the run outcome.
    pub fn with_events(mut self, bus: &'a EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Run a full sync for a blog: all eligible posts (export) or all
    /// remote posts page by page (import).
    pub async fn run(
        &self,
        blog: &Blog,
        direction: SyncDirection,
    ) -> Result<SyncOutcome, SyncError> {
        self.execute(blog, direction, None).await
    }

    /// Run a sync over an explicit subset of local post ids, with the same
    /// error-isolation and logging contract as a full run.
    pub async fn run_for_posts(
        &self,
        blog: &Blog,
        post_ids: &[DbId],
        direction: SyncDirection,
    ) -> Result<SyncOutcome, SyncError> {
        self.execute(blog, direction, Some(post_ids)).await
    }

    /// Import a single normalized remote post (the inbound webhook path).
    ///
    /// Applies the same found/not-found logic as a full import but without
    /// opening a log run.
    pub async fn import_remote_post(
        &self,
        blog_id: DbId,
        remote: &RemotePost,
    ) -> Result<ContentPost, SyncError> {
        self.import_remote(blog_id, remote)
            .await
            .map_err(|err| match err {
                PostSyncError::Db(e) => SyncError::Db(e),
                PostSyncError::Invalid(e) => SyncError::Core(e),
                PostSyncError::Wp(e) => SyncError::List(e),
                PostSyncError::StaleLinkage { .. } => {
                    SyncError::Core(CoreError::Internal(err.to_string()))
                }
            })
    }

    // ── Run lifecycle ────────────────────────────────────────────────

    async fn execute(
        &self,
        blog: &Blog,
        direction: SyncDirection,
        subset: Option<&[DbId]>,
    ) -> Result<SyncOutcome, SyncError> {
        let log = SyncLogRepo::start_run(self.pool, blog.id, direction).await?;
        tracing::info!(
            blog_id = blog.id,
            direction = %direction,
            log_id = log.id,
            "Sync run started",
        );

        // Validate credentials before touching any post; an unreachable or
        // rejecting site fails the whole run up front.
        if let Err(err) = self.client.test_connection().await {
            let run_err = if matches!(err, WpError::Auth { .. }) {
                SyncError::Auth(err)
            } else {
                SyncError::Unreachable(err)
            };
            return self
                .fail_run(blog, direction, log.id, SyncReport::default(), run_err)
                .await;
        }

        let mut report = SyncReport::default();
        let loop_result = match (direction, subset) {
            (SyncDirection::StoreToWp, None) => self.export_blog(blog.id, &mut report).await,
            (SyncDirection::StoreToWp, Some(ids)) => {
                self.export_subset(blog.id, ids, &mut report).await
            }
            (SyncDirection::WpToStore, None) => self.import_blog(blog.id, &mut report).await,
            (SyncDirection::WpToStore, Some(ids)) => {
                self.import_subset(blog.id, ids, &mut report).await
            }
        };

        match loop_result {
            Ok(()) => self.complete_run(blog, direction, log.id, report).await,
            Err(err) => self.fail_run(blog, direction, log.id, report, err).await,
        }
    }

    async fn complete_run(
        &self,
        blog: &Blog,
        direction: SyncDirection,
        log_id: DbId,
        report: SyncReport,
    ) -> Result<SyncOutcome, SyncError> {
        let details = report.detail_json();

        // Logging is best-effort: the sync work already happened and is
        // never rolled back over a log write failure.
        match SyncLogRepo::finish_run(self.pool, log_id, RunStatus::Completed, &details).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(log_id, "Sync log entry was not in running state at finish")
            }
            Err(err) => {
                tracing::error!(log_id, error = %err, "Failed to finalize sync log entry")
            }
        }

        tracing::info!(
            blog_id = blog.id,
            direction = %direction,
            log_id,
            posts_synced = report.posts_synced,
            errors = report.error_count(),
            "Sync run completed",
        );

        if let Some(events) = self.events {
            events.publish(SyncEvent::new(SYNC_COMPLETED, blog.id, direction, details));
        }

        Ok(SyncOutcome {
            log_id,
            status: RunStatus::Completed,
            report,
        })
    }

    async fn fail_run(
        &self,
        blog: &Blog,
        direction: SyncDirection,
        log_id: DbId,
        report: SyncReport,
        error: SyncError,
    ) -> Result<SyncOutcome, SyncError> {
        let mut details = report.detail_json();
        details["error"] = serde_json::Value::String(error.to_string());

        match SyncLogRepo::finish_run(self.pool, log_id, RunStatus::Failed, &details).await {
            Ok(_) => {}
            Err(err) => {
                tracing::error!(log_id, error = %err, "Failed to finalize sync log entry")
            }
        }

        tracing::error!(
            blog_id = blog.id,
            direction = %direction,
            log_id,
            error = %error,
            "Sync run failed",
        );

        if let Some(events) = self.events {
            events.publish(SyncEvent::new(SYNC_FAILED, blog.id, direction, details));
        }

        Err(error)
    }

    // ── Export: store → WordPress ────────────────────────────────────

    async fn export_blog(&self, blog_id: DbId, report: &mut SyncReport) -> Result<(), SyncError> {
        let posts = PostRepo::list_eligible_for_export(self.pool, blog_id).await?;
        self.export_posts(&posts, report).await;
        Ok(())
    }

    async fn export_subset(
        &self,
        blog_id: DbId,
        post_ids: &[DbId],
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let posts = PostRepo::list_by_ids(self.pool, blog_id, post_ids).await?;
        self.export_posts(&posts, report).await;
        Ok(())
    }

    /// Sequential by design: each post's linkage must be persisted before
    /// the next post starts, and WordPress sees at most one in-flight
    /// request per run.
    async fn export_posts(&self, posts: &[ContentPost], report: &mut SyncReport) {
        for post in posts {
            match self.export_post(post).await {
                Ok(()) => report.record_synced(),
                Err(err) => {
                    tracing::warn!(post_id = post.id, error = %err, "Post export failed");
                    report.record_error(&post.title, err);
                }
            }
        }
    }

    async fn export_post(&self, post: &ContentPost) -> Result<(), PostSyncError> {
        let fields = post_fields(post);

        match post.wp_post_id {
            Some(remote_id) => match self.client.update_post(remote_id, &fields).await {
                Ok(remote) => {
                    PostRepo::set_wp_linkage(
                        self.pool,
                        post.id,
                        remote.id,
                        non_empty(&remote.link).as_deref(),
                        non_empty(&remote.slug).as_deref(),
                    )
                    .await?;
                    Ok(())
                }
                Err(WpError::NotFound) => {
                    // Deleted upstream. Clearing the linkage makes the next
                    // run create a fresh remote post instead of failing again.
                    PostRepo::clear_wp_linkage(self.pool, post.id).await?;
                    Err(PostSyncError::StaleLinkage { remote_id })
                }
                Err(err) => Err(err.into()),
            },
            None => {
                let remote = self.client.create_post(&fields).await?;
                PostRepo::set_wp_linkage(
                    self.pool,
                    post.id,
                    remote.id,
                    non_empty(&remote.link).as_deref(),
                    non_empty(&remote.slug).as_deref(),
                )
                .await?;
                Ok(())
            }
        }
    }

    // ── Import: WordPress → store ────────────────────────────────────

    async fn import_blog(&self, blog_id: DbId, report: &mut SyncReport) -> Result<(), SyncError> {
        let mut page: u32 = 1;
        loop {
            let remote_posts = match self.client.list_posts(page, PER_PAGE, None).await {
                Ok(posts) => posts,
                // WordPress signals a past-the-end page with HTTP 400 when
                // the total is an exact multiple of the page size.
                Err(WpError::Remote { status: 400, .. }) if page > 1 => break,
                Err(err) => return Err(SyncError::List(err)),
            };
            let fetched = remote_posts.len();

            for remote in &remote_posts {
                match self.import_remote(blog_id, remote).await {
                    Ok(_) => report.record_synced(),
                    Err(err) => {
                        tracing::warn!(wp_post_id = remote.id, error = %err, "Post import failed");
                        report.record_error(&remote.title.rendered, err);
                    }
                }
            }

            if fetched < PER_PAGE as usize {
                break;
            }
            page += 1;
        }
        Ok(())
    }

    async fn import_subset(
        &self,
        blog_id: DbId,
        post_ids: &[DbId],
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let posts = PostRepo::list_by_ids(self.pool, blog_id, post_ids).await?;
        for post in &posts {
            let result = match post.wp_post_id {
                Some(remote_id) => match self.client.get_post(remote_id).await {
                    Ok(remote) => self.import_remote(blog_id, &remote).await.map(|_| ()),
                    Err(err) => Err(err.into()),
                },
                None => Err(PostSyncError::Invalid(CoreError::Validation(
                    "post has no WordPress linkage to import from".into(),
                ))),
            };
            match result {
                Ok(()) => report.record_synced(),
                Err(err) => {
                    tracing::warn!(post_id = post.id, error = %err, "Post import failed");
                    report.record_error(&post.title, err);
                }
            }
        }
        Ok(())
    }

    /// Import one remote post: update the local copy matched by remote id,
    /// or create a new local post with the linkage pre-populated. The
    /// remote copy wins on every field it carries.
    async fn import_remote(
        &self,
        blog_id: DbId,
        remote: &RemotePost,
    ) -> Result<ContentPost, PostSyncError> {
        if !is_valid_status(&remote.status) {
            return Err(CoreError::Validation(format!(
                "unsupported remote status `{}`",
                remote.status
            ))
            .into());
        }

        let published_at = remote
            .date_gmt
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));

        match PostRepo::find_by_wp_post_id(self.pool, blog_id, remote.id).await? {
            Some(local) => {
                let changes = UpdateContentPost {
                    title: Some(remote.title.rendered.clone()),
                    body: Some(remote.content.rendered.clone()),
                    excerpt: Some(strip_html(&remote.excerpt.rendered)),
                    status: Some(remote.status.clone()),
                    slug: non_empty(&remote.slug),
                    published_at,
                    ..Default::default()
                };
                PostRepo::update(self.pool, local.id, &changes)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;

                // Refresh the permalink/slug snapshot alongside the content.
                let updated = PostRepo::set_wp_linkage(
                    self.pool,
                    local.id,
                    remote.id,
                    non_empty(&remote.link).as_deref(),
                    non_empty(&remote.slug).as_deref(),
                )
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
                Ok(updated)
            }
            None => {
                let input = CreateContentPost {
                    blog_id,
                    title: remote.title.rendered.clone(),
                    body: remote.content.rendered.clone(),
                    excerpt: Some(strip_html(&remote.excerpt.rendered)),
                    status: Some(remote.status.clone()),
                    slug: non_empty(&remote.slug),
                    seo_title: None,
                    seo_description: None,
                    published_at,
                };
                let new_post = NewPost::from_input(input)?.with_linkage(
                    remote.id,
                    non_empty(&remote.link),
                    non_empty(&remote.slug),
                );
                Ok(PostRepo::create(self.pool, &new_post).await?)
            }
        }
    }
}

/// Map a local post onto the outbound WordPress payload.
fn post_fields(post: &ContentPost) -> PostFields {
    PostFields {
        title: Some(post.title.clone()),
        content: Some(post.body.clone()),
        excerpt: post.excerpt.clone(),
        status: Some(post.status.clone()),
        slug: Some(post.slug.clone()),
        ..Default::default()
    }
    .with_seo_meta(post.seo_title.as_deref(), post.seo_description.as_deref())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
