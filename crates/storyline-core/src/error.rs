//! Error types for Storyline.

use thiserror::Error;

/// A shared error type for the whole client.
///
/// Every repository operation either succeeds or fails with exactly one of
/// these variants. Callers decide retry policy; nothing in the client retries
/// on its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoryError {
    /// Transport failure (no connectivity, timeout, connection reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a rejection.
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// No valid bearer token was available at call time.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Local persistence failed; the previous session is retained.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoryError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Remote error
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the server reported that the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { status: 404, .. })
    }

    /// Check if re-triggering the same call may succeed without user changes.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Remote { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if the caller should be sent back to the unauthenticated entry point.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired | Self::Remote { status: 401, .. }
        )
    }

    /// Returns the text shown to the end user for this error.
    ///
    /// Remote messages are passed through verbatim; decode failures are
    /// reported as unknown errors.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error occurred".to_string(),
            Self::Remote { message, .. } => message.clone(),
            Self::Decode(_) => "An unknown error occurred".to_string(),
            Self::AuthenticationRequired => "Please log in to continue".to_string(),
            Self::Storage(message) => format!("Failed to access local storage: {}", message),
            Self::Config(message) => message.clone(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for StoryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, StoryError>`.
pub type Result<T> = std::result::Result<T, StoryError>;
