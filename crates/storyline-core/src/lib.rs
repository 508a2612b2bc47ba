//! Domain layer for Storyline.
//!
//! Holds the data model shared by every other crate (sessions, stories,
//! pages), the error taxonomy, and the traits that sit at the seams between
//! the application layer and its collaborators.

pub mod api;
pub mod config;
pub mod error;
pub mod paging;
pub mod result;
pub mod session;
pub mod story;
pub mod user;

// Re-export common error type
pub use error::{Result, StoryError};
