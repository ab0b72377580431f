use std::fmt;

use super::errors::ConfigInvalid;

/// Ordered set of accepted signing secrets, newest first.
///
/// The first secret signs new tokens. Verification tries every secret in
/// declaration order, so `[new, old]` keeps old tokens valid during a rollover.
#[derive(Clone)]
pub struct SecretSet(Vec<String>);

impl SecretSet {
    /// # Errors
    /// * `ConfigInvalid` - The list is empty or contains an empty secret
    pub fn new<I, S>(secrets: I) -> Result<Self, ConfigInvalid>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let secrets: Vec<String> = secrets.into_iter().map(Into::into).collect();

        if secrets.is_empty() {
            return Err(ConfigInvalid("at least one jwt secret is required".to_string()));
        }
        if let Some(position) = secrets.iter().position(String::is_empty) {
            return Err(ConfigInvalid(format!("jwt secret #{} is empty", position)));
        }

        Ok(Self(secrets))
    }

    /// Secret used to sign new tokens.
    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

// Never print key material.
impl fmt::Debug for SecretSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSet").field("len", &self.0.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_first_declared() {
        let secrets = SecretSet::new(["new", "old"]).unwrap();

        assert_eq!(secrets.primary(), "new");
        assert_eq!(secrets.iter().collect::<Vec<_>>(), vec!["new", "old"]);
    }

    #[test]
    fn test_rejects_empty_list() {
        let result = SecretSet::new(Vec::<String>::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_secret() {
        let result = SecretSet::new(["new", ""]);
        assert_eq!(
            result.unwrap_err(),
            ConfigInvalid("jwt secret #1 is empty".to_string())
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let secrets = SecretSet::new(["super-secret"]).unwrap();
        let rendered = format!("{:?}", secrets);

        assert!(!rendered.contains("super-secret"));
    }
}
