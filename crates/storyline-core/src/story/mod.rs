//! Story domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the story feed.
///
/// Immutable once fetched; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// A single story fetched by id.
///
/// Carries every summary field; it is not cached beyond the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDetail {
    #[serde(flatten)]
    pub summary: StorySummary,
}

impl StoryDetail {
    pub fn id(&self) -> &str {
        &self.summary.id
    }
}

impl From<StoryDetail> for StorySummary {
    fn from(detail: StoryDetail) -> Self {
        detail.summary
    }
}

/// Whether the listing endpoint should only return stories with a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFilter {
    #[default]
    Any,
    WithLocation,
}

impl LocationFilter {
    /// Value of the `location` query parameter.
    pub fn as_query_value(self) -> u8 {
        match self {
            LocationFilter::Any => 0,
            LocationFilter::WithLocation => 1,
        }
    }
}

/// Query parameters of `GET /stories`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoryQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub location: LocationFilter,
}

impl StoryQuery {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            location: LocationFilter::Any,
        }
    }

    pub fn with_location(mut self, location: LocationFilter) -> Self {
        self.location = location;
        self
    }
}

/// Binary photo payload produced by the image-preparation collaborator.
///
/// Format and size constraints are that collaborator's concern; the client
/// forwards the bytes unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPayload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// A story submission for `POST /stories` and `POST /stories/guest`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStory {
    pub photo: PhotoPayload,
    pub description: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl NewStory {
    pub fn new(photo: PhotoPayload, description: impl Into<String>) -> Self {
        Self {
            photo,
            description: description.into(),
            lat: None,
            lon: None,
        }
    }

    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }
}
