use crate::config::CorsConfig;
use crate::db::ConnectionProvider;
use crate::error::FoodpilotError;
use crate::server::access_log::access_log;
use crate::server::cors::cors_layer;
use crate::server::routes::health;

use axum::{Router, http::StatusCode, middleware};

/// State shared by every mounted router.
#[derive(Clone)]
pub struct FoodpilotState {
    pub db: ConnectionProvider,
}

impl FoodpilotState {
    pub fn new(db: ConnectionProvider) -> Self {
        Self { db }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Assemble the routing table: mounted routers, 404 fallback, CORS, access log.
///
/// CORS sits inside the access log so preflights are logged too, and outside
/// every router so preflights are answered before routing.
pub fn foodpilot_router(
    state: FoodpilotState,
    cors: &CorsConfig,
) -> Result<Router, FoodpilotError> {
    let cors = cors_layer(cors)?;

    Ok(Router::new()
        .merge(health::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(access_log)))
}
