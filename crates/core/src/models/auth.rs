//! Login request/response models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Username/password pair submitted to `POST /login`
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Never print the password, even at trace level.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response body of `POST /login`. A missing `success` flag is a rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other fields the server attaches
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "correct-pw");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("correct-pw"));
    }

    #[test]
    fn test_login_response_keeps_extra_fields() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success": true, "user_id": 4}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, None);
        assert_eq!(resp.extra.get("user_id"), Some(&serde_json::json!(4)));
    }

    #[test]
    fn test_login_response_without_flag_is_rejection() {
        let resp: LoginResponse = serde_json::from_str(r#"{"message": "bad credentials"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("bad credentials"));
    }
}
