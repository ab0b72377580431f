use session_auth::ContextError;
use session_auth::PasswordError;
use session_auth::RequestError;
use session_auth::TokenError;
use thiserror::Error;

/// Error for collaborator (directory / password store) failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Principal not found: {0}")]
    PrincipalNotFound(u64),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Top-level error for all session operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Principal not found: {0}")]
    PrincipalNotFound(u64),

    /// Re-verification of the current password failed during a password change.
    #[error("Old password is incorrect")]
    WrongPassword,

    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ProviderError> for SessionError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidCredentials => SessionError::InvalidCredentials,
            ProviderError::PrincipalNotFound(id) => SessionError::PrincipalNotFound(id),
            ProviderError::Storage(msg) => SessionError::Storage(msg),
        }
    }
}

impl From<PasswordError> for SessionError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::PasswordMismatch => SessionError::WrongPassword,
            other => SessionError::Password(other),
        }
    }
}

impl From<tokio::task::JoinError> for SessionError {
    fn from(err: tokio::task::JoinError) -> Self {
        SessionError::Unknown(format!("Password task failed: {}", err))
    }
}
