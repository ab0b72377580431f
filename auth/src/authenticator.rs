use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use http::Request;

use crate::context;
use crate::jwt::ConfigInvalid;
use crate::jwt::SecretSet;
use crate::jwt::Subject;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const BEARER_PREFIX: &str = "Bearer ";

/// Session coordinator combining password hashing, token issuing and the
/// per-request verification gate.
///
/// Holds only read-only configuration after construction and can be shared
/// across request tasks behind an `Arc`.
pub struct SessionAuthenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    secrets: SecretSet,
    ttl_seconds: i64,
}

/// A freshly issued token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// No configured secret accepted the presented token. The underlying
    /// cause is logged, never returned.
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl SessionAuthenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secrets` - Accepted secrets, newest first
    /// * `ttl_seconds` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `ConfigInvalid` - Non-positive or out-of-range TTL, or invalid secret set
    pub fn new<I, S>(secrets: I, ttl_seconds: i64) -> Result<Self, ConfigInvalid>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if ttl_seconds <= 0 {
            return Err(ConfigInvalid(format!(
                "jwt ttl must be positive, got {}",
                ttl_seconds
            )));
        }
        if Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .is_none()
        {
            return Err(ConfigInvalid(format!(
                "jwt ttl of {}s is out of range",
                ttl_seconds
            )));
        }

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(),
            secrets: SecretSet::new(secrets)?,
            ttl_seconds,
        })
    }

    /// Replace the password hasher, e.g. to tune its cost.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Re-verify a password against its stored hash.
    ///
    /// # Errors
    /// * `PasswordMismatch` - Password does not match
    /// * `InvalidHash` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        self.password_hasher.check(password, stored_hash)
    }

    /// Issue a token for a subject, signed with the primary secret.
    ///
    /// # Errors
    /// * `SigningError` / `EncodingError` - Token generation failed
    pub fn issue(&self, subject: &Subject) -> Result<IssuedToken, TokenError> {
        let (access_token, claims) = self.token_service.generate(
            subject,
            self.ttl_seconds,
            self.secrets.primary(),
        )?;

        Ok(IssuedToken {
            access_token,
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        })
    }

    /// Verify a token against the secret set.
    ///
    /// Secrets are tried in declaration order and the first one that
    /// verifies wins.
    ///
    /// # Errors
    /// * `Unauthenticated` - No secret accepted the token
    pub fn authenticate(&self, token: &str) -> Result<Subject, AuthenticationError> {
        for (index, secret) in self.secrets.iter().enumerate() {
            match self.token_service.verify(token, secret) {
                Ok(subject) => return Ok(subject),
                Err(e) => {
                    tracing::debug!(secret_index = index, reason = e.kind(), "Token rejected");
                }
            }
        }

        Err(AuthenticationError::Unauthenticated)
    }

    /// Gate a request: verify its bearer token and bind the subject.
    ///
    /// Returns the bound request on success. On failure the request is
    /// dropped without any binding.
    ///
    /// # Errors
    /// * `Unauthenticated` - Missing, malformed or rejected token
    pub fn authenticate_request<B>(
        &self,
        request: Request<B>,
    ) -> Result<Request<B>, AuthenticationError> {
        let subject = self.authenticate(bearer_token(request.headers()))?;

        Ok(context::attach(request, subject))
    }
}

/// Extract the bearer token from an `Authorization` header.
///
/// A missing header, a non-ASCII value or a missing `Bearer ` prefix all yield
/// an empty token, which then fails verification like any other bad token.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .unwrap_or("")
}
