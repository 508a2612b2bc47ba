pub mod account;
pub mod config;
pub mod photo;
pub mod stories;

use anyhow::{Result, anyhow};
use colored::Colorize;
use futures::{Stream, StreamExt};

use storyline_application::Destination;
use storyline_core::error::StoryError;
use storyline_core::result::NetworkResult;

/// Drives a result stream to its terminal state, printing progress.
pub async fn drive<T>(
    label: &str,
    stream: impl Stream<Item = NetworkResult<T>>,
) -> Result<T> {
    let mut stream = std::pin::pin!(stream);
    while let Some(state) = stream.next().await {
        match state {
            NetworkResult::Loading => eprintln!("{}", format!("{}...", label).dimmed()),
            NetworkResult::Success(value) => return Ok(value),
            NetworkResult::Error(message) => return Err(anyhow!(message)),
        }
    }
    Err(anyhow!("{} ended without a result", label))
}

/// Converts a repository error, pointing the user to `login` when needed.
pub fn report(err: StoryError) -> anyhow::Error {
    if Destination::for_error(&err) == Some(Destination::Welcome) {
        eprintln!(
            "{}",
            "Not logged in. Run `storyline login --email <EMAIL> --password <PASSWORD>`.".yellow()
        );
    }
    anyhow!(err.user_message())
}
