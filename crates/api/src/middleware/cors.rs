use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. The admin UI origin comes from configuration;
/// `"*"` (the default) stays permissive for development.
pub fn cors_layer(allow_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allow_origin == "*" {
        return layer.allow_origin(Any);
    }
    match allow_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(allow_origin, "invalid CORS_ALLOW_ORIGIN, allowing any");
            layer.allow_origin(Any)
        }
    }
}
