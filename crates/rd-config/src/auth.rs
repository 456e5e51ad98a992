//! Staff bearer tokens for the HTTP API.

use serde::{Deserialize, Serialize};

/// A staff member allowed to use the API.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StaffToken {
    pub username: String,
    pub token: String,
}

impl std::fmt::Debug for StaffToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffToken")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Empty list disables authentication (local development).
    #[serde(default)]
    pub staff: Vec<StaffToken>,
}

impl AuthConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.staff.is_empty()
    }

    /// Username owning `token`, if any.
    #[must_use]
    pub fn username_for(&self, token: &str) -> Option<&str> {
        self.staff
            .iter()
            .find(|s| !s.token.is_empty() && s.token == token)
            .map(|s| s.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_token() {
        let config = AuthConfig {
            staff: vec![StaffToken {
                username: "amina".into(),
                token: "t-123".into(),
            }],
        };
        assert!(config.is_enabled());
        assert_eq!(config.username_for("t-123"), Some("amina"));
        assert_eq!(config.username_for("t-999"), None);
        assert_eq!(config.username_for(""), None);
    }

    #[test]
    fn debug_redacts_token() {
        let token = StaffToken {
            username: "amina".into(),
            token: "secret".into(),
        };
        assert!(!format!("{token:?}").contains("secret"));
    }
}
