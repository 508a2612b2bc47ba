//! Composition root.
//!
//! Builds the session store, the API client, and both repositories once and
//! hands out shared references.

use std::sync::Arc;

use storyline_core::api::StoryApi;
use storyline_core::config::ClientConfig;
use storyline_core::error::Result;
use storyline_core::session::SessionStore;
use storyline_infrastructure::{ConfigService, FileSessionStore, InMemorySessionStore, StoryPaths};
use storyline_interaction::HttpStoryApi;

use crate::router::SessionRouter;
use crate::story_repository::StoryRepository;
use crate::user_repository::UserRepository;

/// Every long-lived component of the client.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session_store: Arc<dyn SessionStore>,
    pub api: Arc<dyn StoryApi>,
    pub users: UserRepository,
    pub stories: StoryRepository,
}

impl AppContext {
    /// Wires the repositories over the given collaborators.
    pub fn new(
        config: ClientConfig,
        api: Arc<dyn StoryApi>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        let users = UserRepository::new(api.clone(), session_store.clone());
        let stories = StoryRepository::new(api.clone(), session_store.clone(), &config);

        Self {
            config,
            session_store,
            api,
            users,
            stories,
        }
    }

    /// Production wiring: `config.toml` and `session.json` under `paths`,
    /// HTTP client against the configured base URL.
    pub fn from_paths(paths: &StoryPaths) -> Result<Self> {
        let config = ConfigService::from_paths(paths)?.load()?;
        let session_store = Arc::new(FileSessionStore::from_paths(paths)?);
        let api = Arc::new(HttpStoryApi::from_config(&config)?);

        tracing::debug!("[AppContext] Using service at {}", config.base_url);
        Ok(Self::new(config, api, session_store))
    }

    /// Like [`from_paths`](Self::from_paths), but the session lives in memory
    /// only and is lost on exit.
    pub fn ephemeral(paths: &StoryPaths) -> Result<Self> {
        let config = ConfigService::from_paths(paths)?.load()?;
        let api = Arc::new(HttpStoryApi::from_config(&config)?);
        Ok(Self::new(config, api, Arc::new(InMemorySessionStore::new())))
    }

    /// Subscribes a router to the session.
    pub async fn router(&self) -> SessionRouter {
        SessionRouter::new(self.session_store.get_session().await)
    }
}
