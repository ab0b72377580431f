use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use session_auth::AuthInfo;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentPrincipal;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn info(
    State(state): State<AppState>,
    CurrentPrincipal(principal_id): CurrentPrincipal,
) -> Result<ApiSuccess<InfoResponseData>, ApiError> {
    state
        .session_service
        .info(principal_id)
        .await
        .map_err(ApiError::from)
        .map(|auth_info| ApiSuccess::new(StatusCode::OK, InfoResponseData { auth_info }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponseData {
    pub auth_info: AuthInfo,
}
