use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{blank_error, is_blank, CommentResponse};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_post"))]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(range(min = 1))]
    pub created_by_id: i64,
}

/// Partial update; omitted, null and blank title/body keep their stored value.
/// `updatedById` is always required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_post"))]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
    #[validate(range(min = 1))]
    pub updated_by_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub posted_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub deletion_date: Option<DateTime<Utc>>,
    pub soft_deleted: bool,
    pub created_by_id: i64,
    pub updated_by_id: Option<i64>,
    pub comments: Vec<CommentResponse>,
}

fn validate_create_post(req: &CreatePostRequest) -> Result<(), ValidationError> {
    if req.title.trim().is_empty() {
        return Err(blank_error("title"));
    }
    if req.body.trim().is_empty() {
        return Err(blank_error("body"));
    }
    Ok(())
}

fn validate_update_post(req: &UpdatePostRequest) -> Result<(), ValidationError> {
    if is_blank(&req.title) && is_blank(&req.body) {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("at least one of title or body must be supplied".into());
        return Err(err);
    }
    Ok(())
}
