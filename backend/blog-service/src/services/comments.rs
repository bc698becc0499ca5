/// Comment service - comment lifecycle, always scoped to a live post
use crate::db::{CommentStore, PostStore};
use crate::dto::{AddCommentRequest, CommentResponse, SuccessResponse, UpdateCommentRequest};
use crate::error::{AppError, Result};
use crate::mapper;
use crate::metrics::lifecycle::observe;
use crate::services::posts::post_not_found;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

const ENTITY: &str = "comment";

#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { posts, comments }
    }

    pub async fn get_comment(&self, comment_id: i64) -> Result<CommentResponse> {
        let started = Instant::now();
        let result = self.load_comment(comment_id).await;
        observe(ENTITY, "get", started, result)
    }

    pub async fn list_comments(&self) -> Result<Vec<CommentResponse>> {
        let started = Instant::now();
        let result: Result<Vec<CommentResponse>> = async {
            let comments = self.comments.find_comments().await?;
            Ok(comments.into_iter().map(CommentResponse::from).collect())
        }
        .await;
        observe(ENTITY, "list", started, result)
    }

    /// Comments of one live post
    pub async fn list_post_comments(&self, post_id: i64) -> Result<Vec<CommentResponse>> {
        let started = Instant::now();
        let result: Result<Vec<CommentResponse>> = async {
            if !self.posts.post_exists(post_id).await? {
                return Err(post_not_found(post_id));
            }
            let comments = self.comments.find_comments_by_post(post_id).await?;
            Ok(comments.into_iter().map(CommentResponse::from).collect())
        }
        .await;
        observe(ENTITY, "list_by_post", started, result)
    }

    /// Add a comment to a live post
    pub async fn add_comment(&self, req: AddCommentRequest) -> Result<CommentResponse> {
        let started = Instant::now();
        let result: Result<CommentResponse> = async {
            let post_id = req.post_id;
            if !self.posts.post_exists(post_id).await? {
                return Err(post_not_found(post_id));
            }

            let record = mapper::new_comment(req, Utc::now());
            // The insert re-checks the post, so a delete racing this call
            // still ends in NotFound
            let comment_id = self
                .comments
                .insert_comment(&record)
                .await?
                .ok_or_else(|| post_not_found(post_id))?;
            tracing::info!(comment_id, post_id, user_id = record.user_id, "Comment added");

            Ok(CommentResponse::from(record.into_comment(comment_id)))
        }
        .await;
        observe(ENTITY, "create", started, result)
    }

    pub async fn update_comment(
        &self,
        comment_id: i64,
        req: UpdateCommentRequest,
    ) -> Result<CommentResponse> {
        let started = Instant::now();
        let result: Result<CommentResponse> = async {
            let patch = mapper::comment_patch(req);
            let affected = self.comments.update_comment(comment_id, &patch).await?;
            if affected == 0 {
                return Err(comment_not_found(comment_id));
            }
            tracing::info!(comment_id, "Comment updated");

            self.load_comment(comment_id).await
        }
        .await;
        observe(ENTITY, "update", started, result)
    }

    pub async fn soft_delete_comment(&self, comment_id: i64) -> Result<SuccessResponse> {
        let started = Instant::now();
        let result: Result<SuccessResponse> = async {
            let affected = self
                .comments
                .soft_delete_comment(comment_id, Utc::now())
                .await?;
            if affected == 0 {
                return Err(comment_not_found(comment_id));
            }
            tracing::info!(comment_id, "Comment soft-deleted");
            Ok(SuccessResponse::ok())
        }
        .await;
        observe(ENTITY, "soft_delete", started, result)
    }

    async fn load_comment(&self, comment_id: i64) -> Result<CommentResponse> {
        self.comments
            .find_comment(comment_id)
            .await?
            .map(CommentResponse::from)
            .ok_or_else(|| comment_not_found(comment_id))
    }
}

fn comment_not_found(comment_id: i64) -> AppError {
    AppError::NotFound(format!("Comment {} not found", comment_id))
}
