//! Unified path management for storyline files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/storyline/         # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! ├── session.json             # Persisted session record
//! └── session.lock             # Writer lock for session.json
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR_NAME: &str = "storyline";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform configuration directory could not be determined.
    #[error("Cannot find configuration directory")]
    ConfigDirNotFound,
}

/// Path resolution for storyline.
///
/// With a base directory every file lives directly under it (used by
/// `--data-dir` and by tests); otherwise the platform config directory is used.
#[derive(Debug, Clone, Default)]
pub struct StoryPaths {
    base_dir: Option<PathBuf>,
}

impl StoryPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the storyline configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/storyline/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the session record.
    ///
    /// # Security Note
    ///
    /// The record holds a bearer token; the store restricts it to the owner
    /// (600) on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.json"))
    }
}
