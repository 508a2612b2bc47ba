//! Configuration service.
//!
//! Loads the client configuration from `~/.config/storyline/config.toml`
//! and caches it for the lifetime of the service.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use storyline_core::config::ClientConfig;
use storyline_core::error::{Result, StoryError};

use crate::paths::StoryPaths;
use crate::storage::AtomicFile;

const CONFIG_TEMPLATE: &str = r#"# Storyline client configuration

# Base URL of the story service
base_url = "https://story-api.dicoding.dev/v1"

# Stories requested per page by the feed
page_size = 20

# "any" lists every story, "with_location" only stories carrying coordinates
location = "any"
"#;

/// Loads and caches [`ClientConfig`].
///
/// A missing file means defaults. A file that exists but does not parse is
/// reported as [`StoryError::Config`] rather than silently ignored.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service for the default `config.toml`.
    pub fn from_paths(paths: &StoryPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| StoryError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, reading the file on first access.
    pub fn load(&self) -> Result<ClientConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.read_from_disk()?;
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces the next [`load`](Self::load) to re-read the file.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    /// Writes a commented template if no config file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_config_file(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        AtomicFile::new(self.path.clone())
            .save(CONFIG_TEMPLATE)
            .map_err(|e| {
                StoryError::config(format!(
                    "Failed to write config file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        tracing::info!("[ConfigService] Created {}", self.path.display());
        Ok(true)
    }

    fn read_from_disk(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                self.path.display()
            );
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            StoryError::config(format!(
                "Failed to parse config file '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}
