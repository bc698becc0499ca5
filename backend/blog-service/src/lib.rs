/// Blog Service Library
///
/// Posts and comments with soft-delete semantics, served over HTTP and
/// stored in PostgreSQL.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `dto`: Request/response wire types with validation rules
/// - `mapper`: Pure translation between wire types and records
/// - `models`: Persistence records
/// - `services`: Post and comment lifecycle rules
/// - `db`: Store traits and the PostgreSQL implementation
/// - `error`: Error types and HTTP rendering
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
