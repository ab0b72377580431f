use async_trait::async_trait;
use session_auth::AuthInfo;
use session_auth::LoginRequest;
use session_auth::UpdatePasswordRequest;

use crate::session::errors::ProviderError;
use crate::session::errors::SessionError;
use crate::session::models::LoginOutcome;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate credentials and issue a session token.
    ///
    /// # Arguments
    /// * `request` - Raw login payload
    ///
    /// # Returns
    /// Issued token with its validity window and the principal's info
    ///
    /// # Errors
    /// * `InvalidRequest` - Missing user name or password
    /// * `InvalidCredentials` - Login provider rejected the credentials
    /// * `Token` - Token generation failed
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, SessionError>;

    /// Retrieve info for an authenticated principal.
    ///
    /// # Errors
    /// * `PrincipalNotFound` - Principal no longer exists
    /// * `Storage` - Provider failed
    async fn info(&self, principal_id: u64) -> Result<AuthInfo, SessionError>;

    /// Change a password after re-verifying the current one.
    ///
    /// # Errors
    /// * `InvalidRequest` - Missing old or new password
    /// * `WrongPassword` - Old password does not match the stored hash
    /// * `PrincipalNotFound` - Principal no longer exists
    /// * `Password` - Hashing failed or stored hash is unreadable
    /// * `Storage` - Password store failed
    async fn update_password(
        &self,
        principal_id: u64,
        request: UpdatePasswordRequest,
    ) -> Result<(), SessionError>;
}

/// Credential check supplied by the host application.
#[async_trait]
pub trait LoginProvider: Send + Sync + 'static {
    /// Resolve validated credentials to a principal.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Storage` - Lookup failed
    async fn login(&self, request: &LoginRequest) -> Result<AuthInfo, ProviderError>;
}

/// Password hash storage supplied by the host application.
#[async_trait]
pub trait PasswordStore: Send + Sync + 'static {
    /// Currently stored hash for a principal.
    ///
    /// # Errors
    /// * `PrincipalNotFound` - No such principal
    /// * `Storage` - Lookup failed
    async fn stored_hash(&self, principal_id: u64) -> Result<String, ProviderError>;

    /// Replace the stored hash for a principal.
    ///
    /// # Errors
    /// * `PrincipalNotFound` - No such principal
    /// * `Storage` - Write failed
    async fn update_hash(&self, principal_id: u64, password_hash: String)
        -> Result<(), ProviderError>;
}

/// Principal profile lookup supplied by the host application.
#[async_trait]
pub trait InfoProvider: Send + Sync + 'static {
    /// # Errors
    /// * `PrincipalNotFound` - No such principal
    async fn info(&self, principal_id: u64) -> Result<AuthInfo, ProviderError>;
}
