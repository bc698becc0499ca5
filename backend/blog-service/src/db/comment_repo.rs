use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CommentStore, PgStore, StoreResult};
use crate::models::{Comment, CommentPatch, NewComment};

#[async_trait]
impl CommentStore for PgStore {
    async fn insert_comment(&self, comment: &NewComment) -> StoreResult<Option<i64>> {
        // Guarded by the post row so a concurrent post deletion cannot
        // leave an orphan comment behind
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO comment (content, comment_date, user_id, post_id, soft_deleted)
            SELECT $1, $2, $3, p.id, FALSE
            FROM post p
            WHERE p.id = $4 AND p.soft_deleted = FALSE
            RETURNING id
            "#,
        )
        .bind(&comment.content)
        .bind(comment.comment_date)
        .bind(comment.user_id)
        .bind(comment.post_id)
        .fetch_optional(self.pool())
        .await
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, comment_date, user_id, post_id, soft_deleted, deletion_date
            FROM comment
            WHERE id = $1 AND soft_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn find_comments(&self) -> StoreResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, comment_date, user_id, post_id, soft_deleted, deletion_date
            FROM comment
            WHERE soft_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
    }

    async fn find_comments_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, comment_date, user_id, post_id, soft_deleted, deletion_date
            FROM comment
            WHERE post_id = $1 AND soft_deleted = FALSE
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_comment(&self, id: i64, patch: &CommentPatch) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE comment
            SET content = COALESCE($2, content)
            WHERE id = $1 AND soft_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(&patch.content)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected())
    }

    async fn soft_delete_comment(&self, id: i64, deleted_at: DateTime<Utc>) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE comment
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
