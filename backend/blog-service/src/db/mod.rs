/// Database access layer
///
/// Two store traits describe everything the services need from storage.
/// `PgStore` implements both against PostgreSQL; tests substitute an
/// in-memory implementation.
///
/// Stores never interpret failures: they return raw `sqlx::Error` and the
/// service layer classifies it. Every read excludes soft-deleted rows.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{Comment, CommentPatch, NewComment, NewPost, Post, PostPatch};

pub mod comment_repo;
pub mod post_repo;

pub type StoreResult<T> = Result<T, sqlx::Error>;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert and return the generated id
    async fn insert_post(&self, post: &NewPost) -> StoreResult<i64>;

    async fn post_exists(&self, id: i64) -> StoreResult<bool>;

    async fn post_exists_by_title(&self, title: &str, created_by_id: i64) -> StoreResult<bool>;

    /// Whether another live post by the same author as live post `id`
    /// already carries `title`
    async fn post_title_taken(&self, id: i64, title: &str) -> StoreResult<bool>;

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>>;

    async fn find_posts(&self) -> StoreResult<Vec<Post>>;

    /// COALESCE merge of the supplied fields; returns affected rows
    async fn update_post(&self, id: i64, patch: &PostPatch) -> StoreResult<u64>;

    /// Flag as deleted and stamp `deleted_at`; returns affected rows
    async fn soft_delete_post(&self, id: i64, deleted_at: DateTime<Utc>) -> StoreResult<u64>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Insert only if the referenced post is live. `None` when it is not.
    async fn insert_comment(&self, comment: &NewComment) -> StoreResult<Option<i64>>;

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>>;

    async fn find_comments(&self) -> StoreResult<Vec<Comment>>;

    async fn find_comments_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>>;

    async fn update_comment(&self, id: i64, patch: &CommentPatch) -> StoreResult<u64>;

    async fn soft_delete_comment(&self, id: i64, deleted_at: DateTime<Utc>) -> StoreResult<u64>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::debug!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
