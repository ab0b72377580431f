use std::sync::Arc;

use async_trait::async_trait;
use session_auth::AuthInfo;
use session_auth::LoginRequest;
use session_auth::PasswordError;
use session_auth::SessionAuthenticator;
use session_auth::UpdatePasswordRequest;

use crate::session::errors::SessionError;
use crate::session::models::LoginOutcome;
use crate::session::ports::InfoProvider;
use crate::session::ports::LoginProvider;
use crate::session::ports::PasswordStore;
use crate::session::ports::SessionServicePort;

/// Domain service implementation for session operations.
///
/// Concrete implementation of SessionServicePort with the host's
/// collaborators injected.
pub struct SessionService<LP, PS, IP>
where
    LP: LoginProvider,
    PS: PasswordStore,
    IP: InfoProvider,
{
    login_provider: Arc<LP>,
    password_store: Arc<PS>,
    info_provider: Arc<IP>,
    authenticator: Arc<SessionAuthenticator>,
}

impl<LP, PS, IP> SessionService<LP, PS, IP>
where
    LP: LoginProvider,
    PS: PasswordStore,
    IP: InfoProvider,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `login_provider` - Credential check
    /// * `password_store` - Password hash storage
    /// * `info_provider` - Principal profile lookup
    /// * `authenticator` - Token issuing and password hashing
    pub fn new(
        login_provider: Arc<LP>,
        password_store: Arc<PS>,
        info_provider: Arc<IP>,
        authenticator: Arc<SessionAuthenticator>,
    ) -> Self {
        Self {
            login_provider,
            password_store,
            info_provider,
            authenticator,
        }
    }
}

#[async_trait]
impl<LP, PS, IP> SessionServicePort for SessionService<LP, PS, IP>
where
    LP: LoginProvider,
    PS: PasswordStore,
    IP: InfoProvider,
{
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, SessionError> {
        request.validate()?;

        let auth_info = self.login_provider.login(&request).await?;
        let token = self.authenticator.issue(&auth_info.subject)?;

        tracing::info!(
            namespace = auth_info.subject.namespace(),
            principal_type = auth_info.subject.principal_type(),
            principal_id = auth_info.subject.principal_id(),
            expires_at = %token.expires_at,
            "Session token issued"
        );

        Ok(LoginOutcome { token, auth_info })
    }

    async fn info(&self, principal_id: u64) -> Result<AuthInfo, SessionError> {
        Ok(self.info_provider.info(principal_id).await?)
    }

    async fn update_password(
        &self,
        principal_id: u64,
        request: UpdatePasswordRequest,
    ) -> Result<(), SessionError> {
        request.validate()?;

        let stored_hash = self.password_store.stored_hash(principal_id).await?;

        // Argon2 is deliberately slow; keep it off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let new_hash = tokio::task::spawn_blocking(move || -> Result<String, PasswordError> {
            authenticator.verify_password(&request.old_password, &stored_hash)?;
            authenticator.hash_password(&request.new_password)
        })
        .await?
        .map_err(|e| {
            if e == PasswordError::PasswordMismatch {
                tracing::warn!(principal_id, "Password change rejected: old password mismatch");
            }
            SessionError::from(e)
        })?;

        self.password_store
            .update_hash(principal_id, new_hash)
            .await?;

        tracing::info!(principal_id, "Password updated");

        Ok(())
    }
}
