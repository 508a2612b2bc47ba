//! Paging source for the story feed.

use std::sync::Arc;

use async_trait::async_trait;

use storyline_core::api::StoryApi;
use storyline_core::error::Result;
use storyline_core::paging::{LoadParams, Page, PagingSource};
use storyline_core::session::SessionStore;
use storyline_core::story::{LocationFilter, StoryQuery, StorySummary};

use crate::require_token;

/// Loads feed pages from `GET /stories`.
///
/// The bearer token is read from the session store on every load, so a
/// logout between two pages makes the next load fail with
/// `AuthenticationRequired`.
pub struct StoryPagingSource {
    api: Arc<dyn StoryApi>,
    session_store: Arc<dyn SessionStore>,
    location: LocationFilter,
}

impl StoryPagingSource {
    pub fn new(
        api: Arc<dyn StoryApi>,
        session_store: Arc<dyn SessionStore>,
        location: LocationFilter,
    ) -> Self {
        Self {
            api,
            session_store,
            location,
        }
    }
}

#[async_trait]
impl PagingSource<StorySummary> for StoryPagingSource {
    async fn load(&self, params: LoadParams) -> Result<Page<StorySummary>> {
        let token = require_token(self.session_store.as_ref()).await?;
        let page_index = params.page_index();
        let query = StoryQuery::page(page_index, params.load_size).with_location(self.location);

        let items = self.api.list_stories(&token, &query).await?;
        tracing::debug!(
            "[StoryPagingSource] Page {} loaded with {} stories",
            page_index,
            items.len()
        );

        Ok(Page::fetched(page_index, items))
    }
}
