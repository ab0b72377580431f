use std::collections::HashMap;

use async_trait::async_trait;
use session_auth::AuthInfo;
use session_auth::LoginRequest;
use session_auth::PasswordHasher;
use session_auth::Subject;
use tokio::sync::RwLock;

use crate::config::AccountConfig;
use crate::session::errors::ProviderError;
use crate::session::ports::InfoProvider;
use crate::session::ports::LoginProvider;
use crate::session::ports::PasswordStore;

/// One principal known to the directory.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: u64,
    pub user_name: String,
    pub principal_type: String,
    pub password_hash: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<AccountConfig> for Account {
    fn from(config: AccountConfig) -> Self {
        Self {
            id: config.id,
            user_name: config.user_name,
            principal_type: config.principal_type,
            password_hash: config.password_hash,
            nickname: config.nickname,
            avatar_url: config.avatar_url,
        }
    }
}

/// Plaintext behind the hash checked when a login names no known account.
const DUMMY_PASSWORD: &str = "session-service-dummy-password";

/// In-memory account directory for a single namespace.
///
/// Serves as login provider, password store and info provider. Accounts are
/// seeded at startup; password changes live until the process exits.
///
/// Logins for unknown user names still run a full hash verification against
/// a dummy hash, so response time does not reveal which names exist.
pub struct InMemoryDirectory {
    namespace: String,
    accounts: RwLock<HashMap<u64, Account>>,
    password_hasher: PasswordHasher,
    dummy_hash: Option<String>,
}

impl InMemoryDirectory {
    pub fn new(
        namespace: impl Into<String>,
        accounts: impl IntoIterator<Item = Account>,
    ) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id, account))
            .collect();

        let password_hasher = PasswordHasher::new();

        Self {
            namespace: namespace.into(),
            accounts: RwLock::new(accounts),
            dummy_hash: dummy_hash(&password_hasher),
            password_hasher,
        }
    }

    /// Replace the password hasher used for login checks.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.dummy_hash = dummy_hash(&password_hasher);
        self.password_hasher = password_hasher;
        self
    }

    fn auth_info(&self, account: &Account) -> AuthInfo {
        AuthInfo {
            subject: Subject::new(
                self.namespace.clone(),
                account.principal_type.clone(),
                account.id,
            ),
            nickname: account.nickname.clone(),
            avatar_url: account.avatar_url.clone(),
        }
    }
}

fn dummy_hash(password_hasher: &PasswordHasher) -> Option<String> {
    password_hasher
        .hash(DUMMY_PASSWORD)
        .map_err(|e| tracing::warn!("Failed to prepare dummy password hash: {}", e))
        .ok()
}

#[async_trait]
impl LoginProvider for InMemoryDirectory {
    async fn login(&self, request: &LoginRequest) -> Result<AuthInfo, ProviderError> {
        let account = self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.user_name == request.user_name)
            .cloned();

        let password_hash = match &account {
            Some(account) => account.password_hash.clone(),
            None => self
                .dummy_hash
                .clone()
                .ok_or(ProviderError::InvalidCredentials)?,
        };

        let password_hasher = self.password_hasher.clone();
        let password = request.password.clone();
        let account_id = account.as_ref().map(|account| account.id);
        let matches = tokio::task::spawn_blocking(move || {
            password_hasher.verify(&password, &password_hash)
        })
        .await
        .map_err(|e| ProviderError::Storage(e.to_string()))?
        .map_err(|e| {
            tracing::error!(?account_id, "Stored password hash unreadable: {}", e);
            ProviderError::InvalidCredentials
        })?;

        match account {
            Some(account) if matches => Ok(self.auth_info(&account)),
            _ => Err(ProviderError::InvalidCredentials),
        }
    }
}

#[async_trait]
impl PasswordStore for InMemoryDirectory {
    async fn stored_hash(&self, principal_id: u64) -> Result<String, ProviderError> {
        self.accounts
            .read()
            .await
            .get(&principal_id)
            .map(|account| account.password_hash.clone())
            .ok_or(ProviderError::PrincipalNotFound(principal_id))
    }

    async fn update_hash(
        &self,
        principal_id: u64,
        password_hash: String,
    ) -> Result<(), ProviderError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&principal_id)
            .ok_or(ProviderError::PrincipalNotFound(principal_id))?;

        account.password_hash = password_hash;

        Ok(())
    }
}

#[async_trait]
impl InfoProvider for InMemoryDirectory {
    async fn info(&self, principal_id: u64) -> Result<AuthInfo, ProviderError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&principal_id)
            .ok_or(ProviderError::PrincipalNotFound(principal_id))?;

        Ok(self.auth_info(account))
    }
}
