//! Wire bodies returned by the story service.
//!
//! Every endpoint answers with `{ "error": bool, "message": string, ... }`;
//! the payload field depends on the endpoint.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use storyline_core::error::{Result, StoryError};
use storyline_core::story::{StoryDetail, StorySummary};
use storyline_core::user::LoginResult;

/// Common part of every response body.
pub(crate) trait Envelope {
    fn error(&self) -> bool;
    fn message(&self) -> &str;
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub login_result: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoryListBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    /// The service may omit the list or put nulls in it.
    #[serde(default)]
    pub list_story: Option<Vec<Option<StorySummary>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoryDetailBody {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub story: Option<StoryDetail>,
}

macro_rules! impl_envelope {
    ($($body:ty),*) => {
        $(impl Envelope for $body {
            fn error(&self) -> bool {
                self.error
            }

            fn message(&self) -> &str {
                &self.message
            }
        })*
    };
}

impl_envelope!(MessageBody, LoginBody, StoryListBody, StoryDetailBody);

impl StoryListBody {
    /// The listed stories with null entries dropped.
    pub fn into_stories(self) -> Vec<StorySummary> {
        self.list_story
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Decodes a 2xx body, turning `"error": true` into a remote error.
pub(crate) fn parse_success<B>(status: StatusCode, body: &str) -> Result<B>
where
    B: DeserializeOwned + Envelope,
{
    let parsed: B = serde_json::from_str(body)
        .map_err(|e| StoryError::decode(format!("Unexpected response body: {}", e)))?;

    if parsed.error() {
        return Err(StoryError::remote(
            status.as_u16(),
            message_or_reason(parsed.message(), status),
        ));
    }

    Ok(parsed)
}

/// Maps a non-2xx response to [`StoryError::Remote`].
///
/// Uses the `message` of a structured error body when present, else the
/// canonical reason of the status code.
pub(crate) fn map_http_error(status: StatusCode, body: &str) -> StoryError {
    let message = serde_json::from_str::<MessageBody>(body)
        .map(|parsed| message_or_reason(&parsed.message, status))
        .unwrap_or_else(|_| message_or_reason("", status));

    StoryError::remote(status.as_u16(), message)
}

fn message_or_reason(message: &str, status: StatusCode) -> String {
    if !message.trim().is_empty() {
        return message.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("Request failed: {} {}", status.as_u16(), reason),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}
