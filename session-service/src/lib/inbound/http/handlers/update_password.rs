use axum::extract::State;
use axum::http::StatusCode;
use session_auth::UpdatePasswordRequest;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentPrincipal;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn update_password(
    State(state): State<AppState>,
    CurrentPrincipal(principal_id): CurrentPrincipal,
    ApiJson(body): ApiJson<UpdatePasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .session_service
        .update_password(principal_id, body)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::OK, ()))
}
