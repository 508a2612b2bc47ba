//! Session store trait and change subscription.

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::watch;

use super::model::Session;
use crate::error::Result;

/// Single source of truth for the current session.
///
/// Implementations serialize concurrent writers (last write wins) and
/// publish every accepted write to all subscriptions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists `session`, fully replacing the prior record.
    ///
    /// On failure the previous session stays current and nothing is published.
    async fn save_session(&self, session: Session) -> Result<()>;

    /// Subscribes to the current session and every later change.
    ///
    /// Never fails: missing or unreadable data yields the logged-out session.
    async fn get_session(&self) -> SessionSubscription;

    /// Resets to the logged-out session. Idempotent.
    async fn clear_session(&self) -> Result<()>;

    /// Reads the current session once.
    async fn current_session(&self) -> Session {
        self.get_session().await.current()
    }
}

/// Broadcasts the latest session value to subscribers.
///
/// Shared by store implementations so that every store has the same
/// replay-latest semantics.
#[derive(Debug)]
pub struct SessionPublisher {
    tx: watch::Sender<Session>,
}

impl SessionPublisher {
    pub fn new(initial: Session) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replaces the current value and wakes every subscriber.
    pub fn publish(&self, session: Session) {
        self.tx.send_replace(session);
    }

    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.tx.subscribe())
    }
}

impl Default for SessionPublisher {
    fn default() -> Self {
        Self::new(Session::logged_out())
    }
}

/// A continuously-updating view of the current session.
///
/// The first call to [`next`](Self::next) yields the value current at
/// subscription time; later calls wait for a change. Intermediate values
/// written between two polls are collapsed into the latest one.
#[derive(Debug, Clone)]
pub struct SessionSubscription {
    rx: watch::Receiver<Session>,
    replayed: bool,
}

impl SessionSubscription {
    fn new(rx: watch::Receiver<Session>) -> Self {
        Self {
            rx,
            replayed: false,
        }
    }

    /// The latest session, without waiting.
    pub fn current(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// Waits for the next emission.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<Session> {
        if !self.replayed {
            self.replayed = true;
            return Some(self.rx.borrow_and_update().clone());
        }

        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn into_stream(self) -> impl Stream<Item = Session> + Send {
        futures::stream::unfold(self, |mut subscription| async move {
            let session = subscription.next().await?;
            Some((session, subscription))
        })
    }
}
