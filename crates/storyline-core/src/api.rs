//! Remote story service trait.
//!
//! Defines one operation per endpoint, decoupling repositories from the
//! HTTP transport.

use async_trait::async_trait;

use crate::error::Result;
use crate::story::{NewStory, StoryDetail, StoryQuery, StorySummary};
use crate::user::{Credentials, LoginResponse, Registration};

/// Gateway to the remote story service.
///
/// Every method except `register`, `login` and `upload_guest_story` takes the
/// raw bearer token; the implementation formats the `Authorization` header.
/// Implementations never retry.
///
/// # Errors
///
/// - `StoryError::Network` on transport failure
/// - `StoryError::Remote` on a non-2xx status or an `"error": true` body
/// - `StoryError::Decode` when the body has an unexpected shape
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// Creates an account; returns the server message.
    async fn register(&self, registration: &Registration) -> Result<String>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    async fn list_stories(&self, token: &str, query: &StoryQuery) -> Result<Vec<StorySummary>>;

    async fn story_detail(&self, token: &str, id: &str) -> Result<StoryDetail>;

    /// Submits a story as the authenticated user; returns the server message.
    async fn upload_story(&self, token: &str, story: NewStory) -> Result<String>;

    /// Submits a story without authentication; returns the server message.
    async fn upload_guest_story(&self, story: NewStory) -> Result<String>;
}
