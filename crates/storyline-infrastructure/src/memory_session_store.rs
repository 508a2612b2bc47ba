//! In-memory session store.

use async_trait::async_trait;

use storyline_core::error::Result;
use storyline_core::session::{Session, SessionPublisher, SessionStore, SessionSubscription};

/// Session store that keeps the session in memory only.
///
/// Used by tests and by the CLI's `--ephemeral` mode.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    publisher: SessionPublisher,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that starts out with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            publisher: SessionPublisher::new(session.normalized()),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_session(&self, session: Session) -> Result<()> {
        self.publisher.publish(session.normalized());
        Ok(())
    }

    async fn get_session(&self) -> SessionSubscription {
        self.publisher.subscribe()
    }

    async fn clear_session(&self) -> Result<()> {
        self.publisher.publish(Session::logged_out());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_logged_out() {
        let store = InMemorySessionStore::new();
        assert!(!store.current_session().await.is_logged_in);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemorySessionStore::new();
        for token in ["a", "b", "c"] {
            let session = Session {
                token: token.to_string(),
                is_logged_in: true,
                ..Session::default()
            };
            store.save_session(session).await.unwrap();
        }

        assert_eq!(store.current_session().await.bearer_token(), Some("c"));
    }

    #[tokio::test]
    async fn test_with_session_normalizes() {
        let store = InMemorySessionStore::with_session(Session {
            is_logged_in: true,
            ..Session::default()
        });
        assert!(!store.current_session().await.is_logged_in);
    }
}
