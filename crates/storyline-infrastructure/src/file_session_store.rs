//! File-backed session store.
//!
//! Persists the session as one versioned JSON record
//! (`~/.config/storyline/session.json`), loaded lazily on first access and
//! cached in memory afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use version_migrate::Migrator;

use storyline_core::error::{Result, StoryError};
use storyline_core::session::{Session, SessionPublisher, SessionStore, SessionSubscription};

use crate::dto::{SESSION_ENTITY, create_session_migrator};
use crate::paths::StoryPaths;
use crate::storage::AtomicFile;

/// Session store backed by a single file.
///
/// Writers are serialized by an in-process mutex and by a file lock across
/// processes. A write that fails leaves both the file and the cached session
/// untouched.
pub struct FileSessionStore {
    file: Arc<AtomicFile>,
    migrator: Arc<Migrator>,
    /// Initialised from disk on first access.
    publisher: OnceCell<SessionPublisher>,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store for the record at `path`. Nothing is read yet.
    pub fn new(path: PathBuf) -> Result<Self> {
        let migrator = create_session_migrator().map_err(|e| {
            StoryError::storage(format!("Failed to register session migrator: {}", e))
        })?;

        Ok(Self {
            file: Arc::new(AtomicFile::new(path)),
            migrator: Arc::new(migrator),
            publisher: OnceCell::new(),
            write_lock: Mutex::new(()),
        })
    }

    /// Creates a store at the default session path.
    pub fn from_paths(paths: &StoryPaths) -> Result<Self> {
        let path = paths
            .session_file()
            .map_err(|e| StoryError::storage(e.to_string()))?;
        Self::new(path)
    }

    async fn publisher(&self) -> &SessionPublisher {
        self.publisher
            .get_or_init(|| async { SessionPublisher::new(self.load_or_default().await) })
            .await
    }

    /// Reads the persisted record; unreadable data counts as no session.
    async fn load_or_default(&self) -> Session {
        let file = self.file.clone();
        let migrator = self.migrator.clone();

        match tokio::task::spawn_blocking(move || read_session(&file, &migrator)).await {
            Ok(Ok(Some(session))) => {
                tracing::debug!(
                    "[SessionStore] Loaded session: is_logged_in={}",
                    session.is_logged_in
                );
                session
            }
            Ok(Ok(None)) => Session::logged_out(),
            Ok(Err(e)) => {
                tracing::warn!("[SessionStore] Ignoring unreadable session record: {}", e);
                Session::logged_out()
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Session load task failed: {}", e);
                Session::logged_out()
            }
        }
    }
}

fn read_session(file: &AtomicFile, migrator: &Migrator) -> Result<Option<Session>> {
    let Some(content) = file.load().map_err(|e| {
        StoryError::storage(format!(
            "Failed to read session file '{}': {}",
            file.path().display(),
            e
        ))
    })?
    else {
        return Ok(None);
    };

    let json_value: serde_json::Value = serde_json::from_str(&content)?;
    let session: Session = migrator
        .load_flat_from(SESSION_ENTITY, json_value)
        .map_err(|e| StoryError::decode(format!("Failed to migrate session record: {}", e)))?;

    Ok(Some(session))
}

fn write_session(file: &AtomicFile, migrator: &Migrator, session: Session) -> Result<()> {
    let json_str = migrator
        .save_domain_flat(SESSION_ENTITY, session)
        .map_err(|e| StoryError::storage(format!("Failed to serialize session: {}", e)))?;

    file.save(&json_str).map_err(|e| {
        StoryError::storage(format!(
            "Failed to write session file '{}': {}",
            file.path().display(),
            e
        ))
    })
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save_session(&self, session: Session) -> Result<()> {
        let session = session.normalized();
        let publisher = self.publisher().await;
        let _guard = self.write_lock.lock().await;

        let file = self.file.clone();
        let migrator = self.migrator.clone();
        let to_write = session.clone();
        tokio::task::spawn_blocking(move || write_session(&file, &migrator, to_write))
            .await
            .map_err(|e| StoryError::storage(format!("Failed to join task: {}", e)))?
            .inspect_err(|e| tracing::error!("[SessionStore] Save failed: {}", e))?;

        tracing::info!(
            "[SessionStore] Session saved: user_id={}, is_logged_in={}",
            session.user_id,
            session.is_logged_in
        );
        publisher.publish(session);
        Ok(())
    }

    async fn get_session(&self) -> SessionSubscription {
        self.publisher().await.subscribe()
    }

    async fn clear_session(&self) -> Result<()> {
        let publisher = self.publisher().await;
        let _guard = self.write_lock.lock().await;

        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| StoryError::storage(format!("Failed to join task: {}", e)))?
            .map_err(|e| {
                tracing::error!("[SessionStore] Clear failed: {}", e);
                StoryError::storage(format!("Failed to remove session file: {}", e))
            })?;

        tracing::info!("[SessionStore] Session cleared");
        publisher.publish(Session::logged_out());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            user_id: "user-yj5pc_LARC_AgK61".to_string(),
            name: "Arif Faizin".to_string(),
            email: "arif@example.com".to_string(),
            token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9".to_string(),
            is_logged_in: true,
        }
    }

    #[tokio::test]
    async fn test_empty_store_yields_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json")).unwrap();

        let mut subscription = store.get_session().await;
        assert_eq!(subscription.next().await.unwrap(), Session::logged_out());
    }

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json")).unwrap();

        store.save_session(sample_session()).await.unwrap();

        let mut subscription = store.get_session().await;
        assert_eq!(subscription.next().await.unwrap(), sample_session());
    }

    #[tokio::test]
    async fn test_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        {
            let store = FileSessionStore::new(path.clone()).unwrap();
            store.save_session(sample_session()).await.unwrap();
        }

        let reopened = FileSessionStore::new(path).unwrap();
        assert_eq!(reopened.current_session().await, sample_session());
    }

    #[tokio::test]
    async fn test_save_normalizes_empty_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json")).unwrap();

        let session = Session {
            token: String::new(),
            ..sample_session()
        };
        store.save_session(session).await.unwrap();

        assert!(!store.current_session().await.is_logged_in);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_no_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "{ this is not json").unwrap();

        let store = FileSessionStore::new(path).unwrap();
        assert_eq!(store.current_session().await, Session::logged_out());
    }

    #[tokio::test]
    async fn test_legacy_record_is_migrated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(
            &path,
            r#"{"version":"1.0.0","email":"old@example.com","token":"old","isLoggedIn":true}"#,
        )
        .unwrap();

        let store = FileSessionStore::new(path).unwrap();
        let session = store.current_session().await;
        assert_eq!(session.email, "old@example.com");
        assert_eq!(session.bearer_token(), Some("old"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent_and_published() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = FileSessionStore::new(path.clone()).unwrap();
        store.save_session(sample_session()).await.unwrap();

        let mut subscription = store.get_session().await;
        assert!(subscription.next().await.unwrap().is_logged_in);

        store.clear_session().await.unwrap();
        store.clear_session().await.unwrap();

        assert_eq!(subscription.next().await.unwrap(), Session::logged_out());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_session() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        // Parent of the record is a regular file, so every write fails
        let store = FileSessionStore::new(blocker.join("session.json")).unwrap();
        let err = store.save_session(sample_session()).await.unwrap_err();

        assert!(matches!(err, StoryError::Storage(_)));
        assert_eq!(store.current_session().await, Session::logged_out());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_whole_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json")).unwrap();

        store.save_session(sample_session()).await.unwrap();
        let second = Session {
            user_id: "user-2".to_string(),
            name: "Second".to_string(),
            email: "second@example.com".to_string(),
            token: "tok-2".to_string(),
            is_logged_in: true,
        };
        store.save_session(second.clone()).await.unwrap();

        let reopened = FileSessionStore::new(temp_dir.path().join("session.json")).unwrap();
        assert_eq!(reopened.current_session().await, second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_keep_one_whole_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = Arc::new(FileSessionStore::new(path.clone()).unwrap());

        let written: Vec<Session> = (0..16)
            .map(|i| Session {
                user_id: format!("user-{i}"),
                name: format!("User {i}"),
                email: format!("user{i}@example.com"),
                token: format!("token-{i}"),
                is_logged_in: true,
            })
            .collect();

        let handles: Vec<_> = written
            .iter()
            .cloned()
            .map(|session| {
                let store = store.clone();
                tokio::spawn(async move { store.save_session(session).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = FileSessionStore::new(path).unwrap();
        let persisted = reopened.current_session().await;
        assert!(written.contains(&persisted));
        assert_eq!(store.current_session().await, persisted);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_save_and_clear_agree() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = Arc::new(FileSessionStore::new(path.clone()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    if i % 2 == 0 {
                        store.save_session(sample_session()).await
                    } else {
                        store.clear_session().await
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = FileSessionStore::new(path).unwrap();
        assert_eq!(
            store.current_session().await,
            reopened.current_session().await
        );
    }
}
