use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use session_auth::ConfigInvalid;
use session_auth::SessionAuthenticator;

/// Default token lifetime: one day.
pub const DEFAULT_JWT_EXPIRES_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    /// Accepted secrets, newest first
    pub secrets: Vec<String>,
    #[serde(default = "default_expires_seconds")]
    pub expires_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Principal type served by the info and password endpoints
    pub principal_type: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    pub namespace: String,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub id: u64,
    pub user_name: String,
    pub principal_type: String,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

fn default_expires_seconds() -> i64 {
    DEFAULT_JWT_EXPIRES_SECONDS
}

// Secrets stay out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secrets", &self.secrets.len())
            .field("expires_seconds", &self.expires_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SERVER__HTTP_PORT, JWT__SECRETS=new,old, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRETS=new,old overrides jwt.secrets
            .add_source(
                Environment::with_prefix("")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("jwt.secrets")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Reject settings that would only fail later, at request time.
    ///
    /// # Errors
    /// * `ConfigInvalid` - Non-positive TTL, bad secret set or empty principal type
    pub fn validate(&self) -> Result<(), ConfigInvalid> {
        if self.session.principal_type.is_empty() {
            return Err(ConfigInvalid(
                "session.principal_type must not be empty".to_string(),
            ));
        }

        self.authenticator().map(|_| ())
    }

    /// Build the session authenticator described by the `jwt` section.
    pub fn authenticator(&self) -> Result<SessionAuthenticator, ConfigInvalid> {
        SessionAuthenticator::new(self.jwt.secrets.clone(), self.jwt.expires_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secrets: vec!["new-secret".to_string(), "old-secret".to_string()],
                expires_seconds: DEFAULT_JWT_EXPIRES_SECONDS,
            },
            session: SessionConfig {
                principal_type: "customer".to_string(),
            },
            directory: DirectoryConfig {
                namespace: "app".to_string(),
                accounts: vec![],
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let mut config = config();
        config.jwt.expires_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_ttl() {
        let mut config = config();
        config.jwt.expires_seconds = 10_000_000_000_000_000;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_secrets() {
        let mut config = config();
        config.jwt.secrets.clear();
        assert!(config.validate().is_err());

        config.jwt.secrets = vec!["".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_principal_type() {
        let mut config = config();
        config.session.principal_type.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("new-secret"));
    }
}
