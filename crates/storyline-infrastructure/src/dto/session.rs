//! Session DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, MigrationError, Migrator, Versioned};

use storyline_core::session::Session;

/// Session record V1.0.0 (email and token only).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionV1_0_0 {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub is_logged_in: bool,
}

/// Session record V1.1.0 (added user identity).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct SessionV1_1_0 {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub is_logged_in: bool,
}

/// Type alias for the latest Session version.
pub type SessionDTO = SessionV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from SessionV1_0_0 to SessionV1_1_0.
impl MigratesTo<SessionV1_1_0> for SessionV1_0_0 {
    fn migrate(self) -> SessionV1_1_0 {
        SessionV1_1_0 {
            user_id: String::new(),
            name: String::new(),
            email: self.email,
            token: self.token,
            is_logged_in: self.is_logged_in,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert SessionV1_1_0 DTO to domain model.
///
/// The empty-token invariant is applied here so a hand-edited record can
/// never come back as logged in without a token.
impl IntoDomain<Session> for SessionV1_1_0 {
    fn into_domain(self) -> Session {
        Session {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            token: self.token,
            is_logged_in: self.is_logged_in,
        }
        .normalized()
    }
}

impl FromDomain<Session> for SessionV1_1_0 {
    fn from_domain(session: Session) -> Self {
        SessionV1_1_0 {
            user_id: session.user_id,
            name: session.name,
            email: session.email,
            token: session.token,
            is_logged_in: session.is_logged_in,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Entity name under which the session record is registered.
pub const SESSION_ENTITY: &str = "session";

/// Creates a Migrator for the session record.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Adds `userId` and `name` as empty strings
/// - V1.1 → Session: Converts DTO to domain model
pub fn create_session_migrator() -> Result<Migrator, MigrationError> {
    let mut migrator = Migrator::builder().build();

    let session_path = Migrator::define(SESSION_ENTITY)
        .from::<SessionV1_0_0>()
        .step::<SessionV1_1_0>()
        .into_with_save::<Session>();

    migrator.register(session_path)?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_migration_v1_0_to_domain() {
        let migrator = create_session_migrator().unwrap();

        let json = serde_json::json!({
            "version": "1.0.0",
            "email": "dimas@example.com",
            "token": "legacy-token",
            "isLoggedIn": true
        });

        let session: Session = migrator.load_flat_from(SESSION_ENTITY, json).unwrap();
        assert_eq!(session.email, "dimas@example.com");
        assert_eq!(session.token, "legacy-token");
        assert!(session.is_logged_in);
        assert!(session.user_id.is_empty());
        assert!(session.name.is_empty());
    }

    #[test]
    fn test_session_v1_1_to_domain() {
        let migrator = create_session_migrator().unwrap();

        let json = serde_json::json!({
            "version": "1.1.0",
            "userId": "user-1",
            "name": "Dimas",
            "email": "dimas@example.com",
            "token": "tok",
            "isLoggedIn": true
        });

        let session: Session = migrator.load_flat_from(SESSION_ENTITY, json).unwrap();
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.name, "Dimas");
    }

    #[test]
    fn test_empty_token_loads_logged_out() {
        let migrator = create_session_migrator().unwrap();

        let json = serde_json::json!({
            "version": "1.1.0",
            "token": "",
            "isLoggedIn": true
        });

        let session: Session = migrator.load_flat_from(SESSION_ENTITY, json).unwrap();
        assert!(!session.is_logged_in);
    }

    #[test]
    fn test_session_save_writes_latest_version() {
        let migrator = create_session_migrator().unwrap();
        let session = Session {
            user_id: "user-1".to_string(),
            name: "Dimas".to_string(),
            email: "dimas@example.com".to_string(),
            token: "tok".to_string(),
            is_logged_in: true,
        };

        let json_str = migrator.save_domain_flat(SESSION_ENTITY, session).unwrap();

        assert!(json_str.contains("\"version\":\"1.1.0\""));
        assert!(json_str.contains("\"userId\":\"user-1\""));
        assert!(json_str.contains("\"isLoggedIn\":true"));
    }
}
