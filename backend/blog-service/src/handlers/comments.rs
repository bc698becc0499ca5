/// Comment handlers - HTTP endpoints for comment operations
use crate::dto::{AddCommentRequest, UpdateCommentRequest};
use crate::error::Result;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Create a new comment
pub async fn add_comment(
    service: web::Data<CommentService>,
    req: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let comment = service.add_comment(req).await?;
    Ok(HttpResponse::Created().json(comment))
}

pub async fn list_comments(service: web::Data<CommentService>) -> Result<HttpResponse> {
    let comments = service.list_comments().await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Get a single comment
pub async fn get_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comment = service.get_comment(comment_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Update comment content
pub async fn update_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let comment = service.update_comment(comment_id.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// Soft-delete a comment
pub async fn delete_comment(
    service: web::Data<CommentService>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let ack = service.soft_delete_comment(comment_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}
