use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};
use std::time::Instant;

use crate::error::AppError;

lazy_static! {
    /// Post/comment operations by outcome (ok, not_found, already_exists, ...).
    pub static ref LIFECYCLE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_lifecycle_operations_total",
        "Post and comment lifecycle operations segmented by outcome",
        &["entity", "operation", "outcome"]
    )
    .expect("failed to register blog_lifecycle_operations_total");

    pub static ref LIFECYCLE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "blog_lifecycle_operation_duration_seconds",
        "Service-level latency of post and comment operations",
        &["entity", "operation"]
    )
    .expect("failed to register blog_lifecycle_operation_duration_seconds");
}

/// Record one service call. Returns the result untouched.
pub fn observe<T>(
    entity: &str,
    operation: &str,
    started: Instant,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };

    LIFECYCLE_OPERATIONS_TOTAL
        .with_label_values(&[entity, operation, outcome])
        .inc();
    LIFECYCLE_OPERATION_DURATION_SECONDS
        .with_label_values(&[entity, operation])
        .observe(started.elapsed().as_secs_f64());

    result
}
