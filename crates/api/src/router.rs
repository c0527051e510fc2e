//! Application router builders.
//!
//! Both binaries and the integration tests (`tests/common/mod.rs`) build their
//! apps through these functions, so tests exercise the production middleware
//! stack.

use std::time::Duration;

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, AUTHORIZATION, CONTENT_TYPE,
};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers::fallback;
use crate::routes;
use crate::state::{CoffeeShopState, TriviaState};

/// Value of `Access-Control-Allow-Headers` on every response.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";
/// Value of `Access-Control-Allow-Methods` on every response.
pub const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";

/// Build the trivia app with all middleware layers.
pub fn build_trivia_app(state: TriviaState, config: &ServerConfig) -> Router {
    let app = routes::trivia_routes()
        .merge(routes::health::router::<TriviaState>())
        .fallback(fallback::trivia_not_found)
        .method_not_allowed_fallback(fallback::trivia_method_not_allowed)
        .with_state(state);

    with_middleware(app, config)
}

/// Build the coffee-shop app with all middleware layers.
pub fn build_coffee_shop_app(state: CoffeeShopState, config: &ServerConfig) -> Router {
    let app = routes::coffee_shop_routes(&state)
        .merge(routes::health::router::<CoffeeShopState>())
        .fallback(fallback::coffee_shop_not_found)
        .method_not_allowed_fallback(fallback::coffee_shop_method_not_allowed)
        .with_state(state);

    with_middleware(app, config)
}

/// Apply the shared middleware stack (bottom-up):
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Allow-Headers / Allow-Methods on every response
/// 6. Request timeout
/// 7. Panic recovery
fn with_middleware(app: Router, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
}

/// Build the CORS layer from server configuration.
///
/// `*` allows any origin without credentials. An explicit origin list allows
/// credentials. Panics at startup if a configured origin is invalid.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .max_age(Duration::from_secs(3600));
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
