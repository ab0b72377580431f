use thiserror::Error;

/// Error type for token operations.
///
/// Every verification failure is distinguishable here so callers can log it;
/// the request gate collapses them into a single rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Malformed subject: {0}")]
    MalformedSubject(String),

    #[error("Failed to sign token: {0}")]
    SigningError(String),

    #[error("Failed to encode claims: {0}")]
    EncodingError(String),
}

impl TokenError {
    /// Short stable label, suitable for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MalformedToken(_) => "malformed_token",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::TokenExpired => "token_expired",
            TokenError::TokenNotYetValid => "token_not_yet_valid",
            TokenError::MalformedSubject(_) => "malformed_subject",
            TokenError::SigningError(_) => "signing_error",
            TokenError::EncodingError(_) => "encoding_error",
        }
    }
}

/// Rejected session configuration (TTL or secret set).
///
/// Raised at startup only; request handling never produces it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid session configuration: {0}")]
pub struct ConfigInvalid(pub String);
