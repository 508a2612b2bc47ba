//! Interaction layer for Storyline.
//!
//! HTTP client for the remote story service.

pub mod http_story_api;
mod response;

pub use crate::http_story_api::HttpStoryApi;
