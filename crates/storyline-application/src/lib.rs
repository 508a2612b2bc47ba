//! Application layer for Storyline.
//!
//! Repositories that combine the session store with the remote API, the
//! incremental pager, and the composition root that wires them together.

pub mod context;
pub mod paging;
pub mod result_stream;
pub mod router;
pub mod story_repository;
pub mod user_repository;

pub use context::AppContext;
pub use paging::{LoadOutcome, Pager, PagerStatus, StoryPagingSource};
pub use result_stream::{ResultStream, result_stream};
pub use router::{Destination, SessionRouter};
pub use story_repository::StoryRepository;
pub use user_repository::UserRepository;

use storyline_core::error::{Result, StoryError};
use storyline_core::session::SessionStore;

/// Reads the bearer token from `store` right before a gated call.
///
/// Fails with [`StoryError::AuthenticationRequired`] when the current session
/// is logged out, so no unauthenticated request is ever issued.
pub(crate) async fn require_token(store: &dyn SessionStore) -> Result<String> {
    store
        .current_session()
        .await
        .bearer_token()
        .map(str::to_string)
        .ok_or(StoryError::AuthenticationRequired)
}
