//! Translation between wire types and persistence records
//!
//! Everything here is pure: timestamps are passed in by the caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::dto::{
    AddCommentRequest, CommentResponse, CreatePostRequest, PostResponse, UpdateCommentRequest,
    UpdatePostRequest,
};
use crate::models::{Comment, CommentPatch, NewComment, NewPost, Post, PostPatch};

/// Blank strings are treated as omitted
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn new_post(req: CreatePostRequest, now: DateTime<Utc>) -> NewPost {
    NewPost {
        title: non_blank(Some(req.title)),
        body: non_blank(Some(req.body)),
        created_by_id: req.created_by_id,
        posted_date: now,
    }
}

pub fn post_patch(req: UpdatePostRequest, now: DateTime<Utc>) -> PostPatch {
    PostPatch {
        title: non_blank(req.title),
        body: non_blank(req.body),
        updated_by_id: req.updated_by_id,
        updated_date: now,
    }
}

pub fn new_comment(req: AddCommentRequest, now: DateTime<Utc>) -> NewComment {
    NewComment {
        content: non_blank(Some(req.content)),
        post_id: req.post_id,
        user_id: req.user_id,
        comment_date: now,
    }
}

pub fn comment_patch(req: UpdateCommentRequest) -> CommentPatch {
    CommentPatch {
        content: non_blank(Some(req.content)),
    }
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            content: c.content,
            comment_date: c.comment_date,
            soft_deleted: c.soft_deleted,
            deletion_date: c.deletion_date,
            post_id: c.post_id,
            user_id: c.user_id,
        }
    }
}

pub fn post_response(post: Post, comments: Vec<Comment>) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        body: post.body,
        posted_date: post.posted_date,
        updated_date: post.updated_date,
        deletion_date: post.deletion_date,
        soft_deleted: post.soft_deleted,
        created_by_id: post.created_by_id,
        updated_by_id: post.updated_by_id,
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }
}

/// Attach each comment to its post. Order of posts and of each post's
/// comments is preserved; comments for posts not in `posts` are dropped.
pub fn attach_comments(posts: Vec<Post>, comments: Vec<Comment>) -> Vec<PostResponse> {
    let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for comment in comments {
        by_post.entry(comment.post_id).or_default().push(comment);
    }

    posts
        .into_iter()
        .map(|post| {
            let own = by_post.remove(&post.id).unwrap_or_default();
            post_response(post, own)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn post(id: i64) -> Post {
        Post {
            id,
            title: Some(format!("title {}", id)),
            body: Some("body".into()),
            created_by_id: 42,
            updated_by_id: None,
            posted_date: ts(),
            updated_date: None,
            deletion_date: None,
            soft_deleted: false,
        }
    }

    fn comment(id: i64, post_id: i64) -> Comment {
        Comment {
            id,
            content: Some(format!("comment {}", id)),
            comment_date: ts(),
            user_id: 9,
            post_id,
            soft_deleted: false,
            deletion_date: None,
        }
    }

    #[test]
    fn non_blank_drops_whitespace() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" a ".into())), Some(" a ".into()));
    }

    #[test]
    fn new_post_stamps_posted_date() {
        let req = CreatePostRequest {
            title: "T".into(),
            body: "B".into(),
            created_by_id: 42,
        };
        let record = new_post(req, ts());
        assert_eq!(record.title.as_deref(), Some("T"));
        assert_eq!(record.posted_date, ts());

        let stored = record.into_post(1);
        assert_eq!(stored.id, 1);
        assert!(!stored.soft_deleted);
        assert!(stored.deletion_date.is_none());
    }

    #[test]
    fn post_patch_treats_blank_as_omitted() {
        let req = UpdatePostRequest {
            title: Some("".into()),
            body: Some("B2".into()),
            updated_by_id: 5,
        };
        let patch = post_patch(req, ts());
        assert_eq!(patch.title, None);
        assert_eq!(patch.body.as_deref(), Some("B2"));
        assert_eq!(patch.updated_by_id, 5);
        assert_eq!(patch.updated_date, ts());
    }

    #[test]
    fn attach_comments_groups_by_post() {
        let posts = vec![post(1), post(2), post(3)];
        let comments = vec![comment(10, 2), comment(11, 1), comment(12, 2), comment(13, 99)];

        let out = attach_comments(posts, comments);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(out[0].comments.len(), 1);
        assert_eq!(
            out[1].comments.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![10, 12]
        );
        assert!(out[2].comments.is_empty());
    }

    #[test]
    fn comment_response_carries_post_and_user() {
        let resp = CommentResponse::from(comment(5, 3));
        assert_eq!(resp.post_id, 3);
        assert_eq!(resp.user_id, 9);
        assert_eq!(resp.content.as_deref(), Some("comment 5"));
    }
}
