//! User repository: registration, login, and session pass-through.

use std::sync::Arc;

use storyline_core::api::StoryApi;
use storyline_core::error::Result;
use storyline_core::session::{Session, SessionStore, SessionSubscription};
use storyline_core::user::{Credentials, LoginResponse, Registration};

use crate::result_stream::{ResultStream, result_stream};

/// Account operations over the remote API and the session store.
///
/// `login` never persists the session on its own; the caller inspects the
/// response and then calls [`save_session`](Self::save_session).
#[derive(Clone)]
pub struct UserRepository {
    api: Arc<dyn StoryApi>,
    session_store: Arc<dyn SessionStore>,
}

impl UserRepository {
    pub fn new(api: Arc<dyn StoryApi>, session_store: Arc<dyn SessionStore>) -> Self {
        Self { api, session_store }
    }

    /// Creates an account and returns the server's confirmation message.
    ///
    /// A rejection surfaces the server message unchanged, e.g.
    /// `"email already exists"`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let registration = Registration::new(name, email, password);
        let message = self
            .api
            .register(&registration)
            .await
            .inspect_err(|e| tracing::warn!("[UserRepository] Registration failed: {}", e))?;

        tracing::info!("[UserRepository] Registered {}", email);
        Ok(message)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .api
            .login(&Credentials::new(email, password))
            .await
            .inspect_err(|e| tracing::warn!("[UserRepository] Login failed: {}", e))?;

        tracing::info!(
            "[UserRepository] Logged in as user_id={}",
            response.login_result.user_id
        );
        Ok(response)
    }

    pub async fn save_session(&self, session: Session) -> Result<()> {
        self.session_store.save_session(session).await
    }

    pub async fn get_session(&self) -> SessionSubscription {
        self.session_store.get_session().await
    }

    pub async fn current_session(&self) -> Session {
        self.session_store.current_session().await
    }

    /// Clears the stored session.
    pub async fn logout(&self) -> Result<()> {
        self.session_store.clear_session().await?;
        tracing::info!("[UserRepository] Logged out");
        Ok(())
    }

    pub fn register_stream<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> ResultStream<'a, String> {
        result_stream(self.register(name, email, password))
    }

    pub fn login_stream<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> ResultStream<'a, LoginResponse> {
        result_stream(self.login(email, password))
    }

    pub fn logout_stream(&self) -> ResultStream<'_, ()> {
        result_stream(self.logout())
    }
}
