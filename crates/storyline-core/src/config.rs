//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::story::LocationFilter;

/// Base URL of the story service.
pub const DEFAULT_BASE_URL: &str = "https://story-api.dicoding.dev/v1";

/// Page size requested by the feed pager.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Root of `config.toml`.
///
/// Every field has a default, so an empty or partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub location: LocationFilter,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            location: LocationFilter::default(),
        }
    }
}
