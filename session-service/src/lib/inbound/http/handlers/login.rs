use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use session_auth::AuthInfo;
use session_auth::LoginRequest;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::models::LoginOutcome;
use crate::session::ports::SessionServicePort;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .session_service
        .login(body)
        .await
        .map_err(ApiError::from)
        .map(|outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

/// Login response: the token, its validity window in Unix seconds and the
/// principal's display info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub auth_token: String,
    pub auth_token_issued_at: i64,
    pub auth_token_expires_at: i64,
    pub auth_info: AuthInfo,
}

impl From<LoginOutcome> for LoginResponseData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            auth_token: outcome.token.access_token,
            auth_token_issued_at: outcome.token.issued_at.timestamp(),
            auth_token_expires_at: outcome.token.expires_at.timestamp(),
            auth_info: outcome.auth_info,
        }
    }
}
