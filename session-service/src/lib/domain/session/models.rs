use session_auth::AuthInfo;
use session_auth::IssuedToken;

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub auth_info: AuthInfo,
}
