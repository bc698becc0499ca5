//! In-memory store for service and HTTP tests
//!
//! Implements both store traits over plain vectors with the same
//! visibility rules as the SQL: reads and conditional updates skip
//! soft-deleted rows. Rows are never removed, so tests can inspect the
//! soft-deleted state directly. The partial unique index on live
//! `(title, created_by_id)` is enforced too, failing the way Postgres does.

use async_trait::async_trait;
use blog_service::db::{CommentStore, PostStore, StoreResult};
use blog_service::models::{Comment, CommentPatch, NewComment, NewPost, Post, PostPatch};
use chrono::{DateTime, Utc};
use sqlx::error::{DatabaseError, ErrorKind};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    post_inserts: usize,
    comment_inserts: usize,
    comment_scans: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    /// When set, every call fails like an exhausted pool
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_all(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw row, including soft-deleted ones
    pub fn stored_post(&self, id: i64) -> Option<Post> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn stored_comment(&self, id: i64) -> Option<Comment> {
        self.state
            .lock()
            .unwrap()
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn post_insert_count(&self) -> usize {
        self.state.lock().unwrap().post_inserts
    }

    pub fn comment_insert_count(&self) -> usize {
        self.state.lock().unwrap().comment_inserts
    }

    /// Number of full comment-table scans (for N+1 verification)
    pub fn comment_scan_count(&self) -> usize {
        self.state.lock().unwrap().comment_scans
    }

    /// Soft-delete a post behind the service's back
    pub fn delete_post_directly(&self, id: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == id) {
            post.soft_deleted = true;
            post.deletion_date = Some(Utc::now());
        }
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

fn post_is_live(state: &State, id: i64) -> bool {
    state.posts.iter().any(|p| p.id == id && !p.soft_deleted)
}

/// Another live post (other than `except`) with this title and author
fn live_title_clash(state: &State, except: Option<i64>, title: &str, created_by_id: i64) -> bool {
    state.posts.iter().any(|p| {
        Some(p.id) != except
            && !p.soft_deleted
            && p.created_by_id == created_by_id
            && p.title.as_deref() == Some(title)
    })
}

const TITLE_INDEX: &str = "idx_post_title_author_live";

#[derive(Debug)]
struct UniqueViolation;

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate key value violates unique constraint \"{TITLE_INDEX}\"")
    }
}

impl std::error::Error for UniqueViolation {}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(TITLE_INDEX)
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

fn unique_violation() -> sqlx::Error {
    sqlx::Error::Database(Box::new(UniqueViolation))
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: &NewPost) -> StoreResult<i64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if let Some(title) = &post.title {
            if live_title_clash(&state, None, title, post.created_by_id) {
                return Err(unique_violation());
            }
        }
        let id = state.posts.len() as i64 + 1;
        state.posts.push(post.clone().into_post(id));
        state.post_inserts += 1;
        Ok(id)
    }

    async fn post_exists(&self, id: i64) -> StoreResult<bool> {
        self.check()?;
        Ok(post_is_live(&self.state.lock().unwrap(), id))
    }

    async fn post_exists_by_title(&self, title: &str, created_by_id: i64) -> StoreResult<bool> {
        self.check()?;
        Ok(self.state.lock().unwrap().posts.iter().any(|p| {
            !p.soft_deleted && p.created_by_id == created_by_id && p.title.as_deref() == Some(title)
        }))
    }

    async fn post_title_taken(&self, id: i64, title: &str) -> StoreResult<bool> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id && !p.soft_deleted)
            .is_some_and(|p| live_title_clash(&state, Some(id), title, p.created_by_id)))
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == id && !p.soft_deleted)
            .cloned())
    }

    async fn find_posts(&self) -> StoreResult<Vec<Post>> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .posts
            .iter()
            .filter(|p| !p.soft_deleted)
            .cloned()
            .collect())
    }

    async fn update_post(&self, id: i64, patch: &PostPatch) -> StoreResult<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if let Some(title) = &patch.title {
            let author = state
                .posts
                .iter()
                .find(|p| p.id == id && !p.soft_deleted)
                .map(|p| p.created_by_id);
            if let Some(created_by_id) = author {
                if live_title_clash(&state, Some(id), title, created_by_id) {
                    return Err(unique_violation());
                }
            }
        }
        match state.posts.iter_mut().find(|p| p.id == id && !p.soft_deleted) {
            Some(post) => {
                if let Some(title) = &patch.title {
                    post.title = Some(title.clone());
                }
                if let Some(body) = &patch.body {
                    post.body = Some(body.clone());
                }
                post.updated_by_id = Some(patch.updated_by_id);
                post.updated_date = Some(patch.updated_date);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn soft_delete_post(&self, id: i64, deleted_at: DateTime<Utc>) -> StoreResult<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        match state.posts.iter_mut().find(|p| p.id == id && !p.soft_deleted) {
            Some(post) => {
                post.soft_deleted = true;
                post.deletion_date = Some(deleted_at);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(&self, comment: &NewComment) -> StoreResult<Option<i64>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if !post_is_live(&state, comment.post_id) {
            return Ok(None);
        }
        let id = state.comments.len() as i64 + 1;
        state.comments.push(comment.clone().into_comment(id));
        state.comment_inserts += 1;
        Ok(Some(id))
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .comments
            .iter()
            .find(|c| c.id == id && !c.soft_deleted)
            .cloned())
    }

    async fn find_comments(&self) -> StoreResult<Vec<Comment>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.comment_scans += 1;
        Ok(state
            .comments
            .iter()
            .filter(|c| !c.soft_deleted)
            .cloned()
            .collect())
    }

    async fn find_comments_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && !c.soft_deleted)
            .cloned()
            .collect())
    }

    async fn update_comment(&self, id: i64, patch: &CommentPatch) -> StoreResult<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        match state.comments.iter_mut().find(|c| c.id == id && !c.soft_deleted) {
            Some(comment) => {
                if let Some(content) = &patch.content {
                    comment.content = Some(content.clone());
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn soft_delete_comment(&self, id: i64, deleted_at: DateTime<Utc>) -> StoreResult<u64> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        match state.comments.iter_mut().find(|c| c.id == id && !c.soft_deleted) {
            Some(comment) => {
                comment.soft_deleted = true;
                comment.deletion_date = Some(deleted_at);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
