use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use session_auth::context::principal_id_of;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that verifies the bearer token against the configured secret
/// set and binds the subject to the request.
///
/// Every failure produces the same 401 body; the cause is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let req = state.authenticator.authenticate_request(req).map_err(|e| {
        tracing::warn!(%method, %uri, "Session authentication failed: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid or missing session token"
            })),
        )
            .into_response()
    })?;

    Ok(next.run(req).await)
}

/// Principal id of the authenticated subject, guarded by the principal type
/// this service is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentPrincipal(pub u64);

#[async_trait]
impl FromRequestParts<AppState> for CurrentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        principal_id_of(&*parts, &state.principal_type)
            .map(CurrentPrincipal)
            .map_err(|e| {
                tracing::warn!("Principal guard rejected request: {}", e);
                ApiError::from(e)
            })
    }
}
