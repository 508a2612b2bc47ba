//! Incremental loading over a [`PagingSource`](storyline_core::paging::PagingSource).

mod pager;
mod story_source;

pub use pager::{LoadOutcome, Pager, PagerStatus};
pub use story_source::StoryPagingSource;
