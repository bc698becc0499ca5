//! Wire types for the HTTP API
//!
//! Field names are camelCase on the wire. Request types carry `validator`
//! rules and are checked by the handlers before reaching the services.

pub mod comments;
pub mod posts;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

pub use comments::{AddCommentRequest, CommentResponse, UpdateCommentRequest};
pub use posts::{CreatePostRequest, PostResponse, UpdatePostRequest};

/// Acknowledgement returned by soft-delete endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

pub(crate) fn blank_error(field: &'static str) -> ValidationError {
    let mut err = ValidationError::new("blank");
    err.message = Some(format!("{} must not be blank", field).into());
    err
}
