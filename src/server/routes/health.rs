use crate::server::router::FoodpilotState;
use axum::{Json, Router, routing::get};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const OK: Self = Self { status: "ok" };
}

/// Liveness probe. Never touches the database or any other dependency.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::OK)
}

pub fn router() -> Router<FoodpilotState> {
    Router::new().route("/health", get(health_handler))
}
