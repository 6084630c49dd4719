//! Security middleware: response headers and cross-site request checks

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::types::ApiError;
use crate::config::SecurityConfig;

/// Middleware to add security headers to all responses
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // Prevent MIME type sniffing
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        );
    }

    response
}

/// Cross-site request policy built from [`SecurityConfig`]
#[derive(Debug, Clone)]
pub struct CsrfPolicy {
    enabled: bool,
    trusted_origins: Vec<String>,
}

impl CsrfPolicy {
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            enabled: config.csrf_protection,
            trusted_origins: config
                .trusted_origins
                .iter()
                .map(|o| o.trim_end_matches('/').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a request with this method and headers may proceed
    pub fn allows(&self, method: &Method, headers: &HeaderMap) -> bool {
        if !self.enabled || is_safe_method(method) {
            return true;
        }

        match request_origin(headers) {
            Some(origin) => self.trusted_origins.iter().any(|o| *o == origin),
            None => false,
        }
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// `scheme://host[:port]` of the Origin header, or of the Referer when Origin is absent
fn request_origin(headers: &HeaderMap) -> Option<String> {
    if let Some(origin) = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
        return Some(origin.trim_end_matches('/').to_ascii_lowercase());
    }

    let referer = headers.get(header::REFERER)?.to_str().ok()?;
    let url = reqwest::Url::parse(referer).ok()?;
    let origin = url.origin();

    origin
        .is_tuple()
        .then(|| origin.ascii_serialization().to_ascii_lowercase())
}

/// Reject unsafe cross-site requests when protection is enabled
pub async fn csrf_middleware(
    State(policy): State<Arc<CsrfPolicy>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !policy.allows(request.method(), request.headers()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request from untrusted origin"
        );
        return ApiError::forbidden("CSRF Failed: Origin checking failed.").into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(enabled: bool) -> CsrfPolicy {
        CsrfPolicy::from_config(&SecurityConfig {
            csrf_protection: enabled,
            trusted_origins: vec!["https://console.example.com/".to_string()],
        })
    }

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_disabled_allows_everything() {
        assert!(policy(false).allows(&Method::POST, &HeaderMap::new()));
    }

    #[test]
    fn test_safe_methods_always_allowed() {
        assert!(policy(true).allows(&Method::GET, &HeaderMap::new()));
        assert!(policy(true).allows(&Method::OPTIONS, &HeaderMap::new()));
    }

    #[test]
    fn test_post_without_origin_rejected() {
        assert!(!policy(true).allows(&Method::POST, &HeaderMap::new()));
    }

    #[test]
    fn test_trusted_origin_allowed() {
        let headers = headers(header::ORIGIN, "https://console.example.com");
        assert!(policy(true).allows(&Method::POST, &headers));
    }

    #[test]
    fn test_untrusted_origin_rejected() {
        let headers = headers(header::ORIGIN, "https://evil.example.net");
        assert!(!policy(true).allows(&Method::POST, &headers));
    }

    #[test]
    fn test_referer_fallback() {
        let trusted = headers(header::REFERER, "https://console.example.com/drone/panel");
        assert!(policy(true).allows(&Method::POST, &trusted));

        let untrusted = headers(header::REFERER, "https://evil.example.net/page");
        assert!(!policy(true).allows(&Method::POST, &untrusted));
    }
}
