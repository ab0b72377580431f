//! Session authentication library
//!
//! Issues and verifies signed session tokens and binds the verified identity
//! to the request that carried it:
//! - Password hashing (Argon2id)
//! - HS256 session tokens with multi-secret rotation
//! - Request-scoped subject binding with typed accessors
//! - Structural validation of login and password-change payloads
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use session_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use session_auth::{Subject, TokenService};
//!
//! let service = TokenService::new();
//! let subject = Subject::new("app", "customer", 42);
//! let (token, _claims) = service.generate(&subject, 3600, "secret").unwrap();
//! assert_eq!(service.verify(&token, "secret").unwrap(), subject);
//! ```
//!
//! ## Gating a request
//! ```
//! use session_auth::context::principal_id_of;
//! use session_auth::{SessionAuthenticator, Subject};
//!
//! let auth = SessionAuthenticator::new(["new-secret", "old-secret"], 3600).unwrap();
//! let issued = auth.issue(&Subject::new("app", "customer", 42)).unwrap();
//!
//! let request = http::Request::builder()
//!     .header("Authorization", format!("Bearer {}", issued.access_token))
//!     .body(())
//!     .unwrap();
//! let request = auth.authenticate_request(request).unwrap();
//! assert_eq!(principal_id_of(&request, "customer").unwrap(), 42);
//! ```

pub mod authenticator;
pub mod context;
pub mod jwt;
pub mod password;
pub mod requests;

// Re-export commonly used items
pub use authenticator::bearer_token;
pub use authenticator::AuthenticationError;
pub use authenticator::IssuedToken;
pub use authenticator::SessionAuthenticator;
pub use context::ContextError;
pub use jwt::AuthInfo;
pub use jwt::Claims;
pub use jwt::ConfigInvalid;
pub use jwt::SecretSet;
pub use jwt::Subject;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use requests::LoginRequest;
pub use requests::RegisterRequest;
pub use requests::RequestError;
pub use requests::UpdatePasswordRequest;
