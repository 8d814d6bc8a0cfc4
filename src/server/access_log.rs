//! Per-request access logging with `x-request-id` correlation.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use std::time::Instant;
use tracing::Level;

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const MAX_CLIENT_ID_LEN: usize = 128;

/// Correlation id for one request: the client's own, if usable, else random.
struct RequestId(HeaderValue);

impl RequestId {
    fn resolve(headers: &HeaderMap) -> Self {
        headers
            .get(&X_REQUEST_ID)
            .filter(|v| {
                !v.is_empty() && v.len() <= MAX_CLIENT_ID_LEN && v.to_str().is_ok()
            })
            .cloned()
            .map_or_else(Self::random, Self)
    }

    fn random() -> Self {
        let mut bytes = [0u8; 12];
        rand::rng().fill_bytes(&mut bytes);
        // base64url is always a valid header value.
        let encoded = URL_SAFE_NO_PAD.encode(bytes);
        Self(HeaderValue::from_str(&encoded).unwrap_or(HeaderValue::from_static("-")))
    }

    fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or("-")
    }
}

fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

macro_rules! access_event {
    ($level:expr, $($fields:tt)*) => {{
        let level: Level = $level;
        if level == Level::ERROR {
            tracing::event!(Level::ERROR, $($fields)*);
        } else if level == Level::WARN {
            tracing::event!(Level::WARN, $($fields)*);
        } else {
            tracing::event!(Level::INFO, $($fields)*);
        }
    }};
}

/// Middleware: tags the response with its request id and emits one access event.
pub async fn access_log(req: Request, next: Next) -> Response {
    let request_id = RequestId::resolve(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let version = req.version();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let start = Instant::now();
    let mut resp = next.run(req).await;
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let status = resp.status();
    access_event!(
        level_for(status),
        status = status.as_u16(),
        request_id = request_id.as_str(),
        method = %method,
        path = %path,
        version = ?version,
        latency_ms,
        user_agent = %user_agent,
        "request completed"
    );

    resp.headers_mut().insert(X_REQUEST_ID, request_id.0);
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_is_kept_when_usable() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("trace-abc"));
        assert_eq!(RequestId::resolve(&headers).as_str(), "trace-abc");
    }

    #[test]
    fn oversized_or_missing_client_id_is_replaced() {
        let mut headers = HeaderMap::new();
        let long = "x".repeat(MAX_CLIENT_ID_LEN + 1);
        headers.insert(X_REQUEST_ID, HeaderValue::from_str(&long).unwrap());

        let replaced = RequestId::resolve(&headers);
        assert_eq!(replaced.as_str().len(), 16);
        assert_eq!(RequestId::resolve(&HeaderMap::new()).as_str().len(), 16);
    }

    #[test]
    fn level_follows_status_class() {
        assert_eq!(level_for(StatusCode::OK), Level::INFO);
        assert_eq!(level_for(StatusCode::NOT_FOUND), Level::WARN);
        assert_eq!(level_for(StatusCode::INTERNAL_SERVER_ERROR), Level::ERROR);
    }
}
