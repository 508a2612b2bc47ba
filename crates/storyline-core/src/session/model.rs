//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::user::LoginResult;

/// The locally persisted record identifying the current user.
///
/// A session whose `token` is empty is equivalent to "logged out" no matter
/// what `is_logged_in` says; [`Session::normalized`] enforces that before the
/// record is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub token: String,
    pub is_logged_in: bool,
}

impl Session {
    /// The logged-out session.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Builds the session the caller persists after a successful login.
    pub fn from_login(email: impl Into<String>, login: &LoginResult) -> Self {
        Self {
            user_id: login.user_id.clone(),
            name: login.name.clone(),
            email: email.into(),
            token: login.token.clone(),
            is_logged_in: !login.token.is_empty(),
        }
        .normalized()
    }

    /// Returns the session with `is_logged_in` cleared when there is no token.
    pub fn normalized(mut self) -> Self {
        if self.token.is_empty() {
            self.is_logged_in = false;
        }
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_logged_in && !self.token.is_empty()
    }

    /// The bearer token, if this session may be used for gated calls.
    pub fn bearer_token(&self) -> Option<&str> {
        if self.is_authenticated() {
            Some(self.token.as_str())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_result(token: &str) -> LoginResult {
        LoginResult {
            user_id: "user-1".to_string(),
            name: "Dimas".to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn test_default_is_logged_out() {
        let session = Session::logged_out();
        assert!(!session.is_logged_in);
        assert!(session.token.is_empty());
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn test_from_login() {
        let session = Session::from_login("dimas@example.com", &login_result("tok-123"));
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.name, "Dimas");
        assert_eq!(session.email, "dimas@example.com");
        assert!(session.is_logged_in);
        assert_eq!(session.bearer_token(), Some("tok-123"));
    }

    #[test]
    fn test_empty_token_never_logged_in() {
        let session = Session::from_login("dimas@example.com", &login_result(""));
        assert!(!session.is_logged_in);

        let forged = Session {
            is_logged_in: true,
            ..Session::default()
        };
        assert!(!forged.is_authenticated());
        assert!(!forged.normalized().is_logged_in);
    }

    #[test]
    fn test_token_without_flag_is_not_usable() {
        let session = Session {
            token: "tok".to_string(),
            is_logged_in: false,
            ..Session::default()
        };
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let session = Session::from_login("a@b.c", &login_result("t"));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"userId\":\"user-1\""));
        assert!(json.contains("\"isLoggedIn\":true"));
    }
}
