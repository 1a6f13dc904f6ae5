//! HTTP middleware wrapped around the preview router.
//!
//! `Router::layer` wraps everything added before it, so the layers below
//! are applied innermost first. A request passes through them in the
//! reverse of the order they appear in [`with_http_layers`].

use axum::http::header::{HeaderName, CACHE_CONTROL};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::config::NetworkConfig;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Previews are read-only.
const PREVIEW_METHODS: [Method; 2] = [Method::GET, Method::HEAD];

/// Wraps `router` in the preview server's middleware.
///
/// Outermost first: request id, trace span, gzip, CORS, `no-store`,
/// timeout (408), request id echoed on the response.
#[must_use]
pub fn with_http_layers(router: Router, config: &NetworkConfig) -> Router {
    router
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        // Messages are rebuilt on every request.
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors_layer(&config.cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
}

/// `"*"` anywhere in `origins` allows every origin; otherwise only the
/// parseable entries are allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(PREVIEW_METHODS)
        .allow_headers(Any)
}
