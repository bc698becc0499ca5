/// HTTP handlers for blog endpoints
///
/// - Posts: create, list, get, partial update, soft delete, list a post's comments
/// - Comments: create, list, get, partial update, soft delete
///
/// Request bodies are validated here; services receive well-formed input.
/// Malformed JSON and non-numeric path ids are rendered as `BadRequest`.
use crate::error::AppError;
use actix_web::web;

pub mod comments;
pub mod posts;

// Re-export handler functions at module level
pub use comments::{add_comment, delete_comment, get_comment, list_comments, update_comment};
pub use posts::{create_post, delete_post, get_post, get_post_comments, list_posts, update_post};

/// Register the `/api/v1` blog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::from(err).into()),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| AppError::from(err).into()),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(list_posts))
                            .route(web::post().to(create_post)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(get_post))
                            .route(web::patch().to(update_post))
                            .route(web::delete().to(delete_post)),
                    )
                    .route("/{post_id}/comments", web::get().to(get_post_comments)),
            )
            .service(
                web::scope("/comments")
                    .service(
                        web::resource("")
                            .route(web::get().to(list_comments))
                            .route(web::post().to(add_comment)),
                    )
                    .service(
                        web::resource("/{comment_id}")
                            .route(web::get().to(get_comment))
                            .route(web::patch().to(update_comment))
                            .route(web::delete().to(delete_comment)),
                    ),
            ),
    );
}
