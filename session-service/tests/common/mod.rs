use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use session_auth::AuthInfo;
use session_auth::LoginRequest;
use session_auth::PasswordHasher;
use session_auth::SessionAuthenticator;
use session_auth::Subject;
use session_service::inbound::http::router::create_router;
use session_service::session::errors::ProviderError;
use session_service::session::ports::InfoProvider;
use session_service::session::ports::LoginProvider;
use session_service::session::ports::PasswordStore;
use session_service::session::service::SessionService;

pub const CURRENT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PREVIOUS_SECRET: &str = "previous-secret-key-for-jwt-signing-32-bytes";

pub fn cheap_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(8 * 1024, 1, 1).expect("valid argon2 params")
}

/// Login collaborator that knows exactly one customer: alice / secret123.
pub struct StubLogin;

#[async_trait]
impl LoginProvider for StubLogin {
    async fn login(&self, request: &LoginRequest) -> Result<AuthInfo, ProviderError> {
        if request.user_name == "alice" && request.password == "secret123" {
            Ok(alice())
        } else {
            Err(ProviderError::InvalidCredentials)
        }
    }
}

/// Password store and info provider backed by a map.
pub struct StubAccounts {
    hashes: Mutex<HashMap<u64, String>>,
}

impl StubAccounts {
    pub fn new() -> Self {
        let mut hashes = HashMap::new();
        hashes.insert(
            42,
            cheap_hasher()
                .hash("secret123")
                .expect("Failed to hash password"),
        );

        Self {
            hashes: Mutex::new(hashes),
        }
    }

    pub fn hash_of(&self, principal_id: u64) -> Option<String> {
        self.hashes.lock().unwrap().get(&principal_id).cloned()
    }
}

#[async_trait]
impl PasswordStore for StubAccounts {
    async fn stored_hash(&self, principal_id: u64) -> Result<String, ProviderError> {
        self.hash_of(principal_id)
            .ok_or(ProviderError::PrincipalNotFound(principal_id))
    }

    async fn update_hash(
        &self,
        principal_id: u64,
        password_hash: String,
    ) -> Result<(), ProviderError> {
        self.hashes
            .lock()
            .unwrap()
            .insert(principal_id, password_hash);
        Ok(())
    }
}

#[async_trait]
impl InfoProvider for StubAccounts {
    async fn info(&self, principal_id: u64) -> Result<AuthInfo, ProviderError> {
        if principal_id == 42 {
            Ok(alice())
        } else {
            Err(ProviderError::PrincipalNotFound(principal_id))
        }
    }
}

pub fn alice() -> AuthInfo {
    AuthInfo::new(Subject::new("app", "customer", 42)).with_nickname("alice")
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub accounts: Arc<StubAccounts>,
}

impl TestApp {
    /// Spawn with secrets `[CURRENT_SECRET, PREVIOUS_SECRET]`
    pub async fn spawn() -> Self {
        Self::spawn_with_secrets(&[CURRENT_SECRET, PREVIOUS_SECRET]).await
    }

    pub async fn spawn_with_secrets(secrets: &[&str]) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            SessionAuthenticator::new(secrets.iter().copied(), 3600)
                .expect("Invalid test session configuration")
                .with_password_hasher(cheap_hasher()),
        );
        let accounts = Arc::new(StubAccounts::new());

        let session_service = Arc::new(SessionService::new(
            Arc::new(StubLogin),
            Arc::clone(&accounts),
            Arc::clone(&accounts),
            Arc::clone(&authenticator),
        ));

        let router = create_router(session_service, authenticator, "customer".to_string());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            accounts,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Log in as alice and return the token.
    pub async fn login_alice(&self) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "userName": "alice",
                "password": "secret123"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["authToken"]
            .as_str()
            .expect("Missing authToken")
            .to_string()
    }
}

/// Sign a token for any subject with an arbitrary secret.
pub fn token_for(subject: &Subject, secret: &str) -> String {
    SessionAuthenticator::new([secret], 3600)
        .expect("Invalid test session configuration")
        .issue(subject)
        .expect("Failed to issue token")
        .access_token
}
