/// Error types for Blog Service
///
/// Every failure surfaced by the service layer is one of four kinds. Storage
/// errors are classified exactly once, in `From<sqlx::Error>`.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Resource missing or soft-deleted
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate resource
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Malformed or invalid request
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::BadRequest(_) => "bad_request",
            AppError::Internal(_) => "internal",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Storage details stay in the logs
        let message = match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "message": message,
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("no matching record".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                tracing::debug!(
                    constraint = db_err.constraint().unwrap_or("unknown"),
                    "Unique constraint violated"
                );
                AppError::AlreadyExists("resource already exists".to_string())
            }
            _ => {
                tracing::error!(error = %err, "Storage operation failed");
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

impl From<actix_web::error::JsonPayloadError> for AppError {
    fn from(err: actix_web::error::JsonPayloadError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<actix_web::error::PathError> for AppError {
    fn from(err: actix_web::error::PathError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
