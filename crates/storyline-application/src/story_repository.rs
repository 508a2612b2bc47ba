//! Story repository: feed, detail, upload, and the incremental pager.

use std::sync::Arc;

use storyline_core::api::StoryApi;
use storyline_core::config::ClientConfig;
use storyline_core::error::{Result, StoryError};
use storyline_core::session::SessionStore;
use storyline_core::story::{LocationFilter, NewStory, StoryDetail, StoryQuery, StorySummary};

use crate::paging::{Pager, StoryPagingSource};
use crate::require_token;
use crate::result_stream::{ResultStream, result_stream};

/// Story operations over the remote API.
///
/// Gated operations read the bearer token from the session store right before
/// each call and fail with [`StoryError::AuthenticationRequired`] without
/// touching the network when there is none.
#[derive(Clone)]
pub struct StoryRepository {
    api: Arc<dyn StoryApi>,
    session_store: Arc<dyn SessionStore>,
    page_size: u32,
    location: LocationFilter,
}

impl StoryRepository {
    pub fn new(
        api: Arc<dyn StoryApi>,
        session_store: Arc<dyn SessionStore>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            api,
            session_store,
            page_size: config.page_size,
            location: config.location,
        }
    }

    /// Fetches a single, non-paged listing with an explicit token.
    pub async fn list_stories(&self, token: &str) -> Result<Vec<StorySummary>> {
        if token.is_empty() {
            return Err(StoryError::AuthenticationRequired);
        }

        let query = StoryQuery {
            location: self.location,
            ..StoryQuery::default()
        };
        self.api.list_stories(token, &query).await
    }

    /// Like [`list_stories`](Self::list_stories), with the stored token.
    pub async fn fetch_all_stories(&self) -> Result<Vec<StorySummary>> {
        let token = require_token(self.session_store.as_ref()).await?;
        self.list_stories(&token).await
    }

    /// Fetches one story; an unknown id is a 404 remote error.
    pub async fn story_detail(&self, id: &str) -> Result<StoryDetail> {
        let token = require_token(self.session_store.as_ref()).await?;
        self.api.story_detail(&token, id).await
    }

    /// Uploads a story as the logged-in user.
    ///
    /// The photo is forwarded as given.
    pub async fn upload_story(&self, story: NewStory) -> Result<String> {
        let token = require_token(self.session_store.as_ref()).await?;
        let message = self
            .api
            .upload_story(&token, story)
            .await
            .inspect_err(|e| tracing::warn!("[StoryRepository] Upload failed: {}", e))?;

        tracing::info!("[StoryRepository] Story uploaded");
        Ok(message)
    }

    /// Uploads a story without authentication.
    pub async fn upload_guest_story(&self, story: NewStory) -> Result<String> {
        let message = self
            .api
            .upload_guest_story(story)
            .await
            .inspect_err(|e| tracing::warn!("[StoryRepository] Guest upload failed: {}", e))?;

        tracing::info!("[StoryRepository] Guest story uploaded");
        Ok(message)
    }

    /// Returns a fresh pager over the story feed.
    pub fn paged_stories(&self) -> Pager<StorySummary> {
        let source = StoryPagingSource::new(
            self.api.clone(),
            self.session_store.clone(),
            self.location,
        );
        Pager::new(Arc::new(source), self.page_size)
    }

    pub fn list_stories_stream<'a>(&'a self, token: &'a str) -> ResultStream<'a, Vec<StorySummary>> {
        result_stream(self.list_stories(token))
    }

    pub fn fetch_all_stories_stream(&self) -> ResultStream<'_, Vec<StorySummary>> {
        result_stream(self.fetch_all_stories())
    }

    pub fn story_detail_stream<'a>(&'a self, id: &'a str) -> ResultStream<'a, StoryDetail> {
        result_stream(self.story_detail(id))
    }

    pub fn upload_story_stream(&self, story: NewStory) -> ResultStream<'_, String> {
        result_stream(self.upload_story(story))
    }

    pub fn upload_guest_story_stream(&self, story: NewStory) -> ResultStream<'_, String> {
        result_stream(self.upload_guest_story(story))
    }
}
