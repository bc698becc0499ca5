use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::blank_error;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_add_comment"))]
pub struct AddCommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(range(min = 1))]
    pub post_id: i64,
    #[validate(range(min = 1))]
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_comment"))]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub content: Option<String>,
    pub comment_date: DateTime<Utc>,
    pub soft_deleted: bool,
    pub deletion_date: Option<DateTime<Utc>>,
    pub post_id: i64,
    pub user_id: i64,
}

fn validate_add_comment(req: &AddCommentRequest) -> Result<(), ValidationError> {
    if req.content.trim().is_empty() {
        return Err(blank_error("content"));
    }
    Ok(())
}

fn validate_update_comment(req: &UpdateCommentRequest) -> Result<(), ValidationError> {
    if req.content.trim().is_empty() {
        return Err(blank_error("content"));
    }
    Ok(())
}
