//! Tri-state result emitted by every asynchronous repository operation.

use crate::error::StoryError;

/// Progress of a single logical operation as seen by the presentation layer.
///
/// Zero or more `Loading` notifications are followed by exactly one terminal
/// `Success` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResult<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> NetworkResult<T> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NetworkResult::Loading)
    }

    pub fn success(self) -> Option<T> {
        match self {
            NetworkResult::Success(value) => Some(value),
            NetworkResult::Loading | NetworkResult::Error(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> NetworkResult<U> {
        match self {
            NetworkResult::Loading => NetworkResult::Loading,
            NetworkResult::Success(value) => NetworkResult::Success(f(value)),
            NetworkResult::Error(message) => NetworkResult::Error(message),
        }
    }
}

impl<T> From<Result<T, StoryError>> for NetworkResult<T> {
    fn from(result: Result<T, StoryError>) -> Self {
        match result {
            Ok(value) => NetworkResult::Success(value),
            Err(err) => NetworkResult::Error(err.user_message()),
        }
    }
}
