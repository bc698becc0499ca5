/// Post handlers - HTTP endpoints for post operations
use crate::dto::{CreatePostRequest, UpdatePostRequest};
use crate::error::Result;
use crate::services::{CommentService, PostService};
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Create a new post
pub async fn create_post(
    service: web::Data<PostService>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let post = service.create_post(req).await?;
    Ok(HttpResponse::Created().json(post))
}

/// List all live posts with their comments
pub async fn list_posts(service: web::Data<PostService>) -> Result<HttpResponse> {
    let posts = service.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = service.get_post(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Partially update a post
pub async fn update_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    req.validate()?;

    let post = service.update_post(post_id.into_inner(), req).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Soft-delete a post
pub async fn delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let ack = service.soft_delete_post(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// Comments of a single post
pub async fn get_post_comments(
    service: web::Data<CommentService>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comments = service.list_post_comments(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}
