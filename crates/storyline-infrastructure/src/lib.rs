//! Infrastructure layer for Storyline.
//!
//! Local persistence (the session record and `config.toml`) and path
//! resolution. Nothing in here talks to the network.

pub mod config_service;
pub mod dto;
pub mod file_session_store;
pub mod memory_session_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_session_store::FileSessionStore;
pub use crate::memory_session_store::InMemorySessionStore;
pub use crate::paths::StoryPaths;
