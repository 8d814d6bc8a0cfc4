use crate::config::CorsConfig;
use crate::error::FoodpilotError;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build the CORS middleware for the configured origin allow-list.
///
/// Wildcard methods/headers cannot be combined with credentials, so both are
/// mirrored from the request instead, which admits every method and header.
pub fn cors_layer(cfg: &CorsConfig) -> Result<CorsLayer, FoodpilotError> {
    let origins = cfg.origins()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cfg.allow_credentials))
}
