/// Persistence records for blog-service
///
/// - `Post` / `Comment`: rows as stored, including soft-deleted state
/// - `NewPost` / `NewComment`: insert payloads (identifier assigned by the database)
/// - `PostPatch` / `CommentPatch`: partial updates, `None` leaves the column untouched
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_by_id: i64,
    pub updated_by_id: Option<i64>,
    pub posted_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub deletion_date: Option<DateTime<Utc>>,
    pub soft_deleted: bool,
}

/// Comment entity - always belongs to exactly one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: Option<String>,
    pub comment_date: DateTime<Utc>,
    pub user_id: i64,
    pub post_id: i64,
    pub soft_deleted: bool,
    pub deletion_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_by_id: i64,
    pub posted_date: DateTime<Utc>,
}

impl NewPost {
    /// Materialize the stored row once the database has assigned `id`
    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
            created_by_id: self.created_by_id,
            updated_by_id: None,
            posted_date: self.posted_date,
            updated_date: None,
            deletion_date: None,
            soft_deleted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub updated_by_id: i64,
    pub updated_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: Option<String>,
    pub post_id: i64,
    pub user_id: i64,
    pub comment_date: DateTime<Utc>,
}

impl NewComment {
    pub fn into_comment(self, id: i64) -> Comment {
        Comment {
            id,
            content: self.content,
            comment_date: self.comment_date,
            user_id: self.user_id,
            post_id: self.post_id,
            soft_deleted: false,
            deletion_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPatch {
    pub content: Option<String>,
}
