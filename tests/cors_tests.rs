use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
    },
};
use axum::http::HeaderName;
use axum::response::Response;
use foodpilot::{Application, Config, FoodpilotError};
use tower::ServiceExt;

fn app(origins: &[&str]) -> Router {
    let mut cfg = Config::default();
    cfg.cors.allowed_origins = origins.iter().map(|s| (*s).to_string()).collect();
    Application::build(&cfg)
        .expect("valid cors config should build")
        .router()
}

fn header(resp: &Response, name: HeaderName) -> Option<&str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn allowed_origin_gets_permissive_headers() {
    let app = app(&["http://localhost:5173", "https://app.example.com"]);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(ORIGIN, "https://app.example.com")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("https://app.example.com")
    );
    assert_eq!(header(&resp, ACCESS_CONTROL_ALLOW_CREDENTIALS), Some("true"));
}

#[tokio::test]
async fn credentials_header_omitted_when_disabled() {
    let mut cfg = Config::default();
    cfg.cors.allowed_origins = vec!["https://app.example.com".to_string()];
    cfg.cors.allow_credentials = false;
    let app = Application::build(&cfg)
        .expect("valid cors config should build")
        .router();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(ORIGIN, "https://app.example.com")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("https://app.example.com")
    );
    assert!(header(&resp, ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
}

#[tokio::test]
async fn unknown_origin_gets_no_allow_origin_header() {
    let app = app(&["http://localhost:5173"]);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(ORIGIN, "https://evil.example.net")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    // The request itself is still served; only the browser-facing grant is withheld.
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(header(&resp, ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn preflight_mirrors_any_method_and_headers_for_allowed_origin() {
    let app = app(&["http://localhost:3000"]);

    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/health")
                .header(ORIGIN, "http://localhost:3000")
                .header(ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .header(ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom-header")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        header(&resp, ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://localhost:3000")
    );
    assert_eq!(header(&resp, ACCESS_CONTROL_ALLOW_CREDENTIALS), Some("true"));
    assert_eq!(header(&resp, ACCESS_CONTROL_ALLOW_METHODS), Some("DELETE"));
    let allow_headers = header(&resp, ACCESS_CONTROL_ALLOW_HEADERS).unwrap_or_default();
    assert!(allow_headers.contains("x-custom-header"), "{allow_headers}");
}

#[tokio::test]
async fn preflight_from_unknown_origin_is_not_granted() {
    let app = app(&["http://localhost:3000"]);

    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/health")
                .header(ORIGIN, "http://localhost:4000")
                .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert!(header(&resp, ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn normalized_origin_matches_browser_serialization() {
    // Configured with a trailing slash; browsers never send one.
    let app = app(&["http://localhost:5173/"]);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(
        header(&resp, ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://localhost:5173")
    );
}

#[test]
fn invalid_origin_aborts_bootstrap() {
    let mut cfg = Config::default();
    cfg.cors.allowed_origins = vec!["*".to_string()];

    let err = Application::build(&cfg)
        .err()
        .expect("wildcard origin must be rejected");
    assert!(matches!(err, FoodpilotError::InvalidOrigin { .. }));
}
