use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::subject::Subject;

/// Signs and verifies session tokens.
///
/// Tokens are compact JWS strings (`header.claims.signature`) signed with
/// HS256. The service holds no key material; each call names the secret, so a
/// single instance serves every secret in a rotation set.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    validation: Validation,
}

impl TokenService {
    pub fn new() -> Self {
        let algorithm = Algorithm::HS256;
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "iat", "sub"]);

        Self {
            algorithm,
            validation,
        }
    }

    /// Issue a token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed
    /// * `ttl_seconds` - Token lifetime, must be positive
    /// * `secret` - Signing secret, must be non-empty
    ///
    /// # Returns
    /// The token and the claims it carries
    ///
    /// # Errors
    /// * `SigningError` - Empty secret, non-positive TTL or signing failure
    /// * `EncodingError` - Subject serialization failed or TTL out of range
    pub fn generate(
        &self,
        subject: &Subject,
        ttl_seconds: i64,
        secret: &str,
    ) -> Result<(String, Claims), TokenError> {
        if ttl_seconds <= 0 {
            return Err(TokenError::SigningError(format!(
                "ttl must be positive, got {}",
                ttl_seconds
            )));
        }

        let claims = Claims::build(subject, ttl_seconds, Utc::now)?;
        let token = self.sign(&claims, secret)?;

        Ok((token, claims))
    }

    /// Sign an already built claim set.
    ///
    /// # Errors
    /// * `SigningError` - Empty secret or encoder failure
    pub fn sign(&self, claims: &Claims, secret: &str) -> Result<String, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::SigningError("secret is empty".to_string()));
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| TokenError::SigningError(e.to_string()))
    }

    /// Verify a token under one secret and return its subject.
    ///
    /// Checks the signature first, then `nbf <= now <= exp` with no leeway.
    ///
    /// # Errors
    /// * `MalformedToken` - Token structure or claims could not be parsed
    /// * `InvalidSignature` - Signature does not match `secret`
    /// * `TokenExpired` - `now > exp`
    /// * `TokenNotYetValid` - `now < nbf`
    /// * `MalformedSubject` - Signed payload is not a subject
    pub fn verify(&self, token: &str, secret: &str) -> Result<Subject, TokenError> {
        self.decode(token, secret)?.extract()
    }

    /// Verify a token under one secret and return the raw claims.
    fn decode(&self, token: &str, secret: &str) -> Result<Claims, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSignature);
        }

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &self.validation,
        )
        .map(|token_data| token_data.claims)
        .map_err(classify)
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        _ => TokenError::MalformedToken(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration as StdDuration;

    use chrono::Duration;

    use super::*;

    const SECRET: &str = "my_secret_key_at_least_32_bytes_long!";

    fn subject() -> Subject {
        Subject::new("app", "customer", 42)
    }

    fn tamper_signature(token: &str) -> String {
        let (message, signature) = token.rsplit_once('.').unwrap();
        let mut bytes = signature.as_bytes().to_vec();
        bytes[0] = if bytes[0] == b'A' { b'B' } else { b'A' };
        format!("{}.{}", message, String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn test_generate_and_verify() {
        let service = TokenService::new();

        let (token, claims) = service.generate(&subject(), 3600, SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.nbf, claims.iat);

        let verified = service.verify(&token, SECRET).unwrap();
        assert_eq!(verified, subject());
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let service = TokenService::new();
        let (token, _) = service.generate(&subject(), 3600, SECRET).unwrap();

        let result = service.verify(&token, "secret2_at_least_32_bytes_long_key!");
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = TokenService::new();
        let (token, _) = service.generate(&subject(), 3600, SECRET).unwrap();

        let result = service.verify(&tamper_signature(&token), SECRET);
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_claims_are_rejected() {
        let service = TokenService::new();
        let (token, _) = service.generate(&subject(), 3600, SECRET).unwrap();
        let (forged, _) = service
            .generate(&Subject::new("app", "admin", 1), 3600, "attacker")
            .unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(
            service.verify(&spliced, SECRET),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_after_waiting() {
        let service = TokenService::new();
        let (token, _) = service.generate(&subject(), 1, SECRET).unwrap();

        thread::sleep(StdDuration::from_millis(2100));

        assert_eq!(service.verify(&token, SECRET), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_expired_token() {
        let service = TokenService::new();
        let claims = Claims::build(&subject(), 60, || Utc::now() - Duration::hours(2)).unwrap();
        let token = service.sign(&claims, SECRET).unwrap();

        assert_eq!(service.verify(&token, SECRET), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_token_not_yet_valid() {
        let service = TokenService::new();
        let claims = Claims::build(&subject(), 60, || Utc::now() + Duration::hours(1)).unwrap();
        let token = service.sign(&claims, SECRET).unwrap();

        assert_eq!(
            service.verify(&token, SECRET),
            Err(TokenError::TokenNotYetValid)
        );
    }

    #[test]
    fn test_malformed_token() {
        let service = TokenService::new();

        assert!(matches!(
            service.verify("invalid.token.here", SECRET),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            service.verify("", SECRET),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_malformed_subject() {
        let service = TokenService::new();
        let mut claims = Claims::build(&subject(), 60, Utc::now).unwrap();
        claims.sub = "user123".to_string();
        let token = service.sign(&claims, SECRET).unwrap();

        assert!(matches!(
            service.verify(&token, SECRET),
            Err(TokenError::MalformedSubject(_))
        ));
    }

    #[test]
    fn test_generate_rejects_empty_secret() {
        let service = TokenService::new();

        assert!(matches!(
            service.generate(&subject(), 60, ""),
            Err(TokenError::SigningError(_))
        ));
    }

    #[test]
    fn test_generate_rejects_non_positive_ttl() {
        let service = TokenService::new();

        assert!(matches!(
            service.generate(&subject(), 0, SECRET),
            Err(TokenError::SigningError(_))
        ));
    }

    #[test]
    fn test_generate_rejects_out_of_range_ttl() {
        let service = TokenService::new();

        assert!(matches!(
            service.generate(&subject(), 10_000_000_000_000_000, SECRET),
            Err(TokenError::EncodingError(_))
        ));
    }
}
