//! Status Routes

use axum::{extract::State, Json};
use health::{Health, Reason, Response};
use std::sync::Arc;

/// Formatted status document
pub async fn get_health(State(health): State<Arc<Health>>) -> Json<Response> {
    Json(health.response())
}

/// Status document with the stored reasons left structured
pub async fn get_expanded(State(health): State<Arc<Health>>) -> Json<Response<Arc<Reason>>> {
    Json(health.expanded_response())
}
