use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;
use super::subject::Subject;

/// Signed claim envelope.
///
/// Standard RFC 7519 time claims plus `sub`, which holds the JSON-serialized
/// [`Subject`]. The signature layer treats `sub` as an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issued at (Unix timestamp)
    pub(crate) iat: i64,

    /// Not before (Unix timestamp), always equal to `iat`
    pub(crate) nbf: i64,

    /// Expiration time (Unix timestamp)
    pub(crate) exp: i64,

    /// Serialized subject payload
    pub(crate) sub: String,
}

impl Claims {
    /// Build claims for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed
    /// * `ttl_seconds` - Lifetime; `exp = iat + ttl_seconds`
    /// * `now` - Clock used for `iat` and `nbf`
    ///
    /// # Errors
    /// * `EncodingError` - Subject could not be serialized, or `exp` falls
    ///   outside the representable time range
    pub fn build(
        subject: &Subject,
        ttl_seconds: i64,
        now: impl FnOnce() -> DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let payload =
            serde_json::to_string(subject).map_err(|e| TokenError::EncodingError(e.to_string()))?;
        let issued_at = now();
        let expires_at = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::EncodingError(format!("ttl of {}s is out of range", ttl_seconds))
            })?;

        Ok(Self {
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            sub: payload,
        })
    }

    /// Parse the embedded subject.
    ///
    /// # Errors
    /// * `MalformedSubject` - Payload is not a JSON subject
    pub fn extract(&self) -> Result<Subject, TokenError> {
        serde_json::from_str(&self.sub).map_err(|e| TokenError::MalformedSubject(e.to_string()))
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.nbf)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }
}

fn timestamp_to_datetime(timestamp: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
