#![allow(dead_code)]

pub mod memory_store;

use blog_service::db::{CommentStore, PostStore};
use blog_service::dto::{AddCommentRequest, CreatePostRequest, UpdatePostRequest};
use blog_service::services::{CommentService, PostService};
use memory_store::MemoryStore;
use std::sync::Arc;

/// Build both services over one shared in-memory store
pub fn services(store: &Arc<MemoryStore>) -> (PostService, CommentService) {
    let posts: Arc<dyn PostStore> = store.clone();
    let comments: Arc<dyn CommentStore> = store.clone();
    (
        PostService::new(posts.clone(), comments.clone()),
        CommentService::new(posts, comments),
    )
}

pub fn create_request(title: &str, body: &str, created_by_id: i64) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        body: body.to_string(),
        created_by_id,
    }
}

pub fn body_update(body: &str) -> UpdatePostRequest {
    UpdatePostRequest {
        body: Some(body.to_string()),
        updated_by_id: 42,
        ..Default::default()
    }
}

pub fn title_update(title: &str) -> UpdatePostRequest {
    UpdatePostRequest {
        title: Some(title.to_string()),
        updated_by_id: 42,
        ..Default::default()
    }
}

pub fn comment_request(post_id: i64, content: &str) -> AddCommentRequest {
    AddCommentRequest {
        content: content.to_string(),
        post_id,
        user_id: 7,
    }
}
