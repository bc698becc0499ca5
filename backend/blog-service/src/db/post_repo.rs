use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{PgStore, PostStore, StoreResult};
use crate::models::{NewPost, Post, PostPatch};

const POST_COLUMNS: &str = "id, title, body, created_by_id, updated_by_id, posted_date, \
                            updated_date, deletion_date, soft_deleted";

#[async_trait]
impl PostStore for PgStore {
    async fn insert_post(&self, post: &NewPost) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO post (title, body, created_by_id, posted_date, soft_deleted)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.created_by_id)
        .bind(post.posted_date)
        .fetch_one(self.pool())
        .await?;

        tracing::debug!(post_id = id, "Inserted post");
        Ok(id)
    }

    async fn post_exists(&self, id: i64) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM post WHERE id = $1 AND soft_deleted = FALSE)",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
    }

    async fn post_exists_by_title(&self, title: &str, created_by_id: i64) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM post
                WHERE title = $1 AND created_by_id = $2 AND soft_deleted = FALSE
            )
            "#,
        )
        .bind(title)
        .bind(created_by_id)
        .fetch_one(self.pool())
        .await
    }

    async fn post_title_taken(&self, id: i64, title: &str) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM post target
                JOIN post other ON other.created_by_id = target.created_by_id
                WHERE target.id = $1 AND target.soft_deleted = FALSE
                  AND other.id <> $1 AND other.title = $2 AND other.soft_deleted = FALSE
            )
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_one(self.pool())
        .await
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM post WHERE id = $1 AND soft_deleted = FALSE"
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
    }

    async fn find_posts(&self) -> StoreResult<Vec<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM post WHERE soft_deleted = FALSE ORDER BY id");
        sqlx::query_as::<_, Post>(&sql).fetch_all(self.pool()).await
    }

    async fn update_post(&self, id: i64, patch: &PostPatch) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE post
            SET title = COALESCE($2, title),
                body = COALESCE($3, body),
                updated_by_id = $4,
                updated_date = $5
            WHERE id = $1 AND soft_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.body)
        .bind(patch.updated_by_id)
        .bind(patch.updated_date)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn soft_delete_post(&self, id: i64, deleted_at: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE post
            SET soft_deleted = TRUE, deletion_date = $2
            WHERE id = $1 AND soft_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(deleted_at)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }
}
