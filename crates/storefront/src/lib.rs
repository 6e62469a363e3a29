//! Stride storefront library.
//!
//! This crate provides the storefront JSON API as a library, allowing it to
//! be tested and reused. The binary in `main.rs` only wires configuration,
//! tracing and Sentry around [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use axum::{Router, http::HeaderValue};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::state::AppState;

/// CORS layer for a configured origin.
///
/// Credentials are allowed so the session cookie travels with cross-origin
/// cart requests.
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let origin = match HeaderValue::from_str(origin.trim_end_matches('/')) {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!(error = %e, "CORS origin is not a valid header value, CORS disabled");
            return None;
        }
    };
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

/// Build the full storefront router with its middleware stack.
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the rate limiter
/// can key requests without proxy headers.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let cors = state.config().cors_origin.as_deref().and_then(cors_layer);

    let router = Router::new()
        .merge(routes::routes())
        .layer(session_layer)
        .layer(middleware::api_rate_limiter());
    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
