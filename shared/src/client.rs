//! Client-related types shared between backend and admin client
//!
//! Session and auth DTOs used in API communication.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Signed-in user as persisted in login state
///
/// Only `role` takes part in permission decisions; `id` and `username` are
/// used for attribution on mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

impl SessionUser {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            role: role.into(),
        }
    }

    /// Role, or `None` when absent/blank
    ///
    /// A non-blank role is returned as stored; rights lookups match it exactly.
    pub fn role(&self) -> Option<&str> {
        (!self.role.trim().is_empty()).then_some(self.role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_role_deserializes_as_none() {
        let user: SessionUser =
            serde_json::from_str(r#"{"id":"u1","username":"alice"}"#).unwrap();
        assert_eq!(user.role(), None);

        let blank = SessionUser::new("u2", "bob", "   ");
        assert_eq!(blank.role(), None);
    }

    #[test]
    fn test_role_is_not_trimmed() {
        let padded = SessionUser::new("u3", "carol", " EDITOR ");
        assert_eq!(padded.role(), Some(" EDITOR "));
    }

    #[test]
    fn test_login_response_shape() {
        let json = r#"{"token":"t0k","user":{"id":"7","username":"editor","role":"EDITOR"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "t0k");
        assert_eq!(resp.user.role(), Some("EDITOR"));
    }
}
