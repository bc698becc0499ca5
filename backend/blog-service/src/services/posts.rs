/// Post service - handles post creation, retrieval, and management
use crate::db::{CommentStore, PostStore};
use crate::dto::{CreatePostRequest, PostResponse, SuccessResponse, UpdatePostRequest};
use crate::error::{AppError, Result};
use crate::mapper;
use crate::metrics::lifecycle::observe;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

const ENTITY: &str = "post";

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { posts, comments }
    }

    /// Get a live post with its comments
    pub async fn get_post(&self, post_id: i64) -> Result<PostResponse> {
        let started = Instant::now();
        let result = self.load_post(post_id).await;
        observe(ENTITY, "get", started, result)
    }

    /// All live posts, each with its comments. Empty is not an error.
    pub async fn list_posts(&self) -> Result<Vec<PostResponse>> {
        let started = Instant::now();
        let result: Result<Vec<PostResponse>> = async {
            let posts = self.posts.find_posts().await?;
            if posts.is_empty() {
                return Ok(Vec::new());
            }
            let comments = self.comments.find_comments().await?;
            Ok(mapper::attach_comments(posts, comments))
        }
        .await;
        observe(ENTITY, "list", started, result)
    }

    /// Create a post; a live post with the same title and author is a conflict
    pub async fn create_post(&self, req: CreatePostRequest) -> Result<PostResponse> {
        let started = Instant::now();
        let result: Result<PostResponse> = async {
            let created_by_id = req.created_by_id;
            if self
                .posts
                .post_exists_by_title(&req.title, created_by_id)
                .await?
            {
                tracing::debug!(created_by_id, "Duplicate post title rejected");
                return Err(AppError::AlreadyExists(format!(
                    "Post with title '{}' already exists for user {}",
                    req.title, created_by_id
                )));
            }

            let record = mapper::new_post(req, Utc::now());
            let post_id = self.posts.insert_post(&record).await?;
            tracing::info!(post_id, created_by_id, "Post created");

            Ok(mapper::post_response(record.into_post(post_id), Vec::new()))
        }
        .await;
        observe(ENTITY, "create", started, result)
    }

    /// Merge supplied fields into a live post and return the refreshed post.
    /// Renaming onto another live post of the same author is a conflict.
    pub async fn update_post(&self, post_id: i64, req: UpdatePostRequest) -> Result<PostResponse> {
        let started = Instant::now();
        let result: Result<PostResponse> = async {
            let patch = mapper::post_patch(req, Utc::now());
            if let Some(title) = &patch.title {
                if self.posts.post_title_taken(post_id, title).await? {
                    tracing::debug!(post_id, "Duplicate post title rejected on update");
                    return Err(AppError::AlreadyExists(format!(
                        "Post with title '{}' already exists for this author",
                        title
                    )));
                }
            }
            let affected = self.posts.update_post(post_id, &patch).await?;
            if affected == 0 {
                return Err(post_not_found(post_id));
            }
            tracing::info!(post_id, updated_by_id = patch.updated_by_id, "Post updated");

            self.load_post(post_id).await
        }
        .await;
        observe(ENTITY, "update", started, result)
    }

    /// Soft-delete a live post. A second delete reports `NotFound`.
    pub async fn soft_delete_post(&self, post_id: i64) -> Result<SuccessResponse> {
        let started = Instant::now();
        let result: Result<SuccessResponse> = async {
            let affected = self.posts.soft_delete_post(post_id, Utc::now()).await?;
            if affected == 0 {
                return Err(post_not_found(post_id));
            }
            tracing::info!(post_id, "Post soft-deleted");
            Ok(SuccessResponse::ok())
        }
        .await;
        observe(ENTITY, "soft_delete", started, result)
    }

    async fn load_post(&self, post_id: i64) -> Result<PostResponse> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;
        let comments = self.comments.find_comments_by_post(post_id).await?;
        Ok(mapper::post_response(post, comments))
    }
}

pub(crate) fn post_not_found(post_id: i64) -> AppError {
    AppError::NotFound(format!("Post {} not found", post_id))
}
