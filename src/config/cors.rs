use crate::error::FoodpilotError;
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use url::{Origin, Url};

/// Cross-origin resource sharing policy. Methods and headers are always
/// unrestricted; only origins and credentials are configurable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origins allowed to read responses, in priority order.
    /// TOML: `cors.allowed_origins`.
    /// Default: `["http://localhost:5173", "http://localhost:3000"]`.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Whether `Access-Control-Allow-Credentials: true` is sent.
    /// TOML: `cors.allow_credentials`. Default: `true`.
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: default_allow_credentials(),
        }
    }
}

impl CorsConfig {
    /// Validates the configured origins and returns them as header values in
    /// their browser serialization, first occurrence wins on duplicates.
    pub fn origins(&self) -> Result<Vec<HeaderValue>, FoodpilotError> {
        let mut seen: Vec<String> = Vec::with_capacity(self.allowed_origins.len());
        for raw in &self.allowed_origins {
            let origin = normalize_origin(raw)?;
            if !seen.contains(&origin) {
                seen.push(origin);
            }
        }

        seen.into_iter()
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| FoodpilotError::InvalidOrigin {
                    origin: origin.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

fn normalize_origin(raw: &str) -> Result<String, FoodpilotError> {
    let invalid = |reason: &str| FoodpilotError::InvalidOrigin {
        origin: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("origin must not carry credentials"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("origin must not carry a path, query or fragment"));
    }

    match url.origin() {
        origin @ Origin::Tuple(..) => Ok(origin.ascii_serialization()),
        Origin::Opaque(_) => Err(invalid("origin has no host")),
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_allow_credentials() -> bool {
    true
}
