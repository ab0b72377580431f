use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use session_auth::SessionAuthenticator;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::info::info;
use super::handlers::login::login;
use super::handlers::update_password::update_password;
use super::middleware::authenticate as auth_middleware;
use crate::session::ports::SessionServicePort;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionServicePort>,
    pub authenticator: Arc<SessionAuthenticator>,
    /// Principal type accepted by the protected endpoints
    pub principal_type: String,
}

pub fn create_router(
    session_service: Arc<dyn SessionServicePort>,
    authenticator: Arc<SessionAuthenticator>,
    principal_type: String,
) -> Router {
    let state = AppState {
        session_service,
        authenticator,
        principal_type,
    };

    let public_routes = Router::new().route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/info", get(info))
        .route("/api/auth/password", patch(update_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
