//! HttpStoryApi - REST client for the story service.
//!
//! One method per endpoint. Authenticated calls carry
//! `Authorization: Bearer <token>`; nothing here retries.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use storyline_core::api::StoryApi;
use storyline_core::config::ClientConfig;
use storyline_core::error::{Result, StoryError};
use storyline_core::story::{NewStory, StoryDetail, StoryQuery, StorySummary};
use storyline_core::user::{Credentials, LoginResponse, Registration};

use crate::response::{
    Envelope, LoginBody, MessageBody, StoryDetailBody, StoryListBody, map_http_error,
    parse_success,
};

/// [`StoryApi`] implementation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStoryApi {
    client: Client,
    base_url: Url,
}

impl HttpStoryApi {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.base_url)
    }

    /// Uses a caller-provided [`Client`] (custom timeouts, proxies).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoryError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoryError::config(format!(
                "Base URL '{}' cannot hold endpoint paths",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn register_request(&self, registration: &Registration) -> RequestBuilder {
        self.client
            .post(self.endpoint(&["register"]))
            .form(registration)
    }

    fn login_request(&self, credentials: &Credentials) -> RequestBuilder {
        self.client.post(self.endpoint(&["login"])).form(credentials)
    }

    fn list_stories_request(&self, token: &str, query: &StoryQuery) -> RequestBuilder {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(3);
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = query.size {
            params.push(("size", size.to_string()));
        }
        params.push(("location", query.location.as_query_value().to_string()));

        self.client
            .get(self.endpoint(&["stories"]))
            .bearer_auth(token)
            .query(&params)
    }

    fn story_detail_request(&self, token: &str, id: &str) -> RequestBuilder {
        self.client
            .get(self.endpoint(&["stories", id]))
            .bearer_auth(token)
    }

    fn upload_request(&self, token: Option<&str>, story: NewStory) -> Result<RequestBuilder> {
        let form = build_story_form(story)?;
        let request = match token {
            Some(token) => self
                .client
                .post(self.endpoint(&["stories"]))
                .bearer_auth(token),
            None => self.client.post(self.endpoint(&["stories", "guest"])),
        };

        Ok(request.multipart(form))
    }

    /// Sends `request` and decodes a successful body.
    async fn execute<B>(&self, operation: &str, request: RequestBuilder) -> Result<B>
    where
        B: DeserializeOwned + Envelope,
    {
        let response = request.send().await.map_err(|err| {
            tracing::warn!("[StoryApi] {} failed to send: {}", operation, err);
            StoryError::network(format!("{} request failed: {}", operation, err))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            StoryError::network(format!("Failed to read {} response: {}", operation, err))
        })?;
        tracing::debug!(
            "[StoryApi] {} -> {} ({} bytes)",
            operation,
            status,
            body.len()
        );

        if !status.is_success() {
            return Err(map_http_error(status, &body));
        }

        parse_success(status, &body).inspect_err(|e| {
            if let StoryError::Decode(msg) = e {
                tracing::warn!("[StoryApi] {} returned an unexpected body: {}", operation, msg);
            }
        })
    }
}

/// Builds the multipart body shared by both upload endpoints.
fn build_story_form(story: NewStory) -> Result<Form> {
    let NewStory {
        photo,
        description,
        lat,
        lon,
    } = story;

    let photo_part = Part::bytes(photo.bytes)
        .file_name(photo.file_name)
        .mime_str(&photo.content_type)
        .map_err(|e| {
            StoryError::config(format!(
                "Invalid photo content type '{}': {}",
                photo.content_type, e
            ))
        })?;

    let mut form = Form::new()
        .part("photo", photo_part)
        .text("description", description);
    if let Some(lat) = lat {
        form = form.text("lat", lat.to_string());
    }
    if let Some(lon) = lon {
        form = form.text("lon", lon.to_string());
    }

    Ok(form)
}

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn register(&self, registration: &Registration) -> Result<String> {
        tracing::debug!("[StoryApi] POST /register email={}", registration.email);
        let body: MessageBody = self
            .execute("register", self.register_request(registration))
            .await?;
        Ok(body.message)
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        tracing::debug!("[StoryApi] POST /login email={}", credentials.email);
        let body: LoginBody = self
            .execute("login", self.login_request(credentials))
            .await?;

        let login_result = body
            .login_result
            .ok_or_else(|| StoryError::decode("Login response is missing loginResult"))?;

        Ok(LoginResponse {
            message: body.message,
            login_result,
        })
    }

    async fn list_stories(&self, token: &str, query: &StoryQuery) -> Result<Vec<StorySummary>> {
        tracing::debug!(
            "[StoryApi] GET /stories page={:?} size={:?} location={} has_token={}",
            query.page,
            query.size,
            query.location.as_query_value(),
            !token.is_empty()
        );
        let body: StoryListBody = self
            .execute("list stories", self.list_stories_request(token, query))
            .await?;
        Ok(body.into_stories())
    }

    async fn story_detail(&self, token: &str, id: &str) -> Result<StoryDetail> {
        tracing::debug!("[StoryApi] GET /stories/{}", id);
        let body: StoryDetailBody = self
            .execute("story detail", self.story_detail_request(token, id))
            .await?;

        body.story
            .ok_or_else(|| StoryError::decode("Story detail response is missing story"))
    }

    async fn upload_story(&self, token: &str, story: NewStory) -> Result<String> {
        tracing::debug!(
            "[StoryApi] POST /stories photo_bytes={} has_location={}",
            story.photo.bytes.len(),
            story.lat.is_some()
        );
        let request = self.upload_request(Some(token), story)?;
        let body: MessageBody = self.execute("upload story", request).await?;
        Ok(body.message)
    }

    async fn upload_guest_story(&self, story: NewStory) -> Result<String> {
        tracing::debug!(
            "[StoryApi] POST /stories/guest photo_bytes={}",
            story.photo.bytes.len()
        );
        let request = self.upload_request(None, story)?;
        let body: MessageBody = self.execute("upload guest story", request).await?;
        Ok(body.message)
    }
}
