use serde::Deserialize;
use serde::Serialize;

/// The authenticated identity carried inside a token.
///
/// Serialized as `{"namespace": .., "type": .., "id": ..}`. `principal_type`
/// and `principal_id` together identify one principal within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    namespace: String,
    #[serde(rename = "type")]
    principal_type: String,
    #[serde(rename = "id")]
    principal_id: u64,
}

impl Subject {
    pub fn new(
        namespace: impl Into<String>,
        principal_type: impl Into<String>,
        principal_id: u64,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            principal_type: principal_type.into(),
            principal_id,
        }
    }

    /// Owning application or tenant.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Identity kind, e.g. "admin" or "customer".
    pub fn principal_type(&self) -> &str {
        &self.principal_type
    }

    pub fn principal_id(&self) -> u64 {
        self.principal_id
    }
}

/// A subject plus display-only profile data.
///
/// Returned by login and info providers and echoed to clients. Only the
/// subject is ever embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    #[serde(flatten)]
    pub subject: Subject,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl AuthInfo {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            nickname: None,
            avatar_url: None,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_subject_wire_schema() {
        let subject = Subject::new("app", "customer", 42);

        let value = serde_json::to_value(&subject).unwrap();
        assert_eq!(
            value,
            json!({ "namespace": "app", "type": "customer", "id": 42 })
        );
    }

    #[test]
    fn test_auth_info_flattens_subject() {
        let info = AuthInfo::new(Subject::new("app", "admin", 7))
            .with_nickname("alice")
            .with_avatar_url("https://example.com/a.png");

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "namespace": "app",
                "type": "admin",
                "id": 7,
                "nickname": "alice",
                "avatarUrl": "https://example.com/a.png"
            })
        );
    }

    #[test]
    fn test_auth_info_omits_missing_profile() {
        let info = AuthInfo::new(Subject::new("app", "admin", 7));

        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("nickname").is_none());
        assert!(value.get("avatarUrl").is_none());
    }
}
