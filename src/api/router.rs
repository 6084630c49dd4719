use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::atoms;
use super::health;
use super::middleware::{
    CsrfPolicy, csrf_middleware, logging_middleware, metrics_middleware,
    security_headers_middleware,
};
use super::state::AppState;
use crate::config::{AppConfig, SecurityConfig};

/// Create the full router with application state
pub fn create_router_with_state(state: AppState, config: &AppConfig) -> Router {
    let csrf_policy = Arc::new(CsrfPolicy::from_config(&config.security));

    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Perception endpoints
        .nest("/atoms", atoms::create_atoms_router())
        .with_state(state)
        .layer(middleware::from_fn_with_state(csrf_policy, csrf_middleware))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware));

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Browsers on trusted origins may call the API directly
fn cors_layer(config: &SecurityConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .trusted_origins
        .iter()
        .filter_map(|origin| match origin.trim_end_matches('/').parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid trusted origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::types::form::fixtures::{Part, multipart};
    use crate::domain::engine::factory::mock::MockEngineFactory;
    use crate::domain::perception::image::fixtures::png_bytes;

    fn router_with(factory: &MockEngineFactory, config: &AppConfig) -> Router {
        create_router_with_state(AppState::new(Arc::new(factory.clone())), config)
    }

    #[tokio::test]
    async fn test_health() {
        let app = router_with(&MockEngineFactory::new(), &AppConfig::default());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_live() {
        let app = router_with(&MockEngineFactory::new(), &AppConfig::default());
        let response = app
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let app = router_with(&MockEngineFactory::new(), &AppConfig::default());
        let response = app
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
    }

    #[tokio::test]
    async fn test_get_on_atom_is_method_not_allowed() {
        let app = router_with(&MockEngineFactory::new(), &AppConfig::default());
        let response = app
            .oneshot(
                Request::get("/atoms/voice-generation/generate-voice/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_csrf_protection_enabled() {
        let mut config = AppConfig::default();
        config.security.csrf_protection = true;
        config.security.trusted_origins = vec!["https://console.example.com".to_string()];

        let factory = MockEngineFactory::new();
        let request = |origin: &str| {
            Request::post("/atoms/voice-generation/generate-voice/")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, origin)
                .body(Body::from(json!({"text": "hi"}).to_string()))
                .unwrap()
        };

        let rejected = router_with(&factory, &config)
            .oneshot(request("https://evil.example.net"))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::FORBIDDEN);
        assert_eq!(factory.constructed(), 0);

        let accepted = router_with(&factory, &config)
            .oneshot(request("https://console.example.com"))
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::OK);
        assert_eq!(factory.constructed(), 1);
    }

    #[tokio::test]
    async fn test_csrf_disabled_by_default() {
        let factory = MockEngineFactory::new();
        let response = router_with(&factory, &AppConfig::default())
            .oneshot(
                Request::post("/atoms/voice-generation/generate-voice/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ORIGIN, "https://anywhere.example.org")
                    .body(Body::from(json!({"text": "hi"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_over_body_limit() {
        let mut config = AppConfig::default();
        config.server.max_upload_bytes = 256;

        let factory = MockEngineFactory::new();
        let png = png_bytes(64, 64, [200, 10, 10]);
        let padding = vec![b'x'; 1024];
        let (content_type, body) = multipart(&[
            Part::Text("engine_configurations", std::str::from_utf8(&padding).unwrap()),
            Part::File("image", "big.png", &png),
        ]);

        let response = router_with(&factory, &config)
            .oneshot(
                Request::post("/atoms/object-detection/detect-objects/?algorithm_name=YOLO")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(factory.constructed(), 0);
    }
}
