/// Business logic layer for blog-service
///
/// - Post service: creation, retrieval, partial update, soft delete
/// - Comment service: the same lifecycle for comments, gated on a live post
///
/// Services are built once at startup around shared stores and hold no
/// mutable state of their own.
pub mod comments;
pub mod posts;

pub use comments::CommentService;
pub use posts::PostService;
