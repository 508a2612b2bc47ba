//! Paging primitives shared by every incremental loader.
//!
//! Page keys are 1-based page indices. The rules for deriving neighbouring
//! keys live here so that every source computes them the same way.

use async_trait::async_trait;

use crate::error::Result;

/// Index of the first page.
pub const START_PAGE_INDEX: u32 = 1;

/// One fetched page plus the keys of its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Absent only for the first page.
    pub prev_key: Option<u32>,
    /// Absent only when this page came back empty (end of data).
    pub next_key: Option<u32>,
}

impl<T> Page<T> {
    /// Builds the page fetched at `page_index`, deriving both neighbour keys.
    pub fn fetched(page_index: u32, items: Vec<T>) -> Self {
        let prev_key = if page_index <= START_PAGE_INDEX {
            None
        } else {
            Some(page_index - 1)
        };
        let next_key = if items.is_empty() {
            None
        } else {
            Some(page_index + 1)
        };

        Self {
            items,
            prev_key,
            next_key,
        }
    }

    /// The index this page was fetched with, recovered from its keys.
    pub fn page_index(&self) -> Option<u32> {
        self.prev_key
            .map(|key| key + 1)
            .or_else(|| self.next_key.map(|key| key - 1))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Parameters of a single page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    /// Page to fetch; `None` means the first page.
    pub key: Option<u32>,
    pub load_size: u32,
}

impl LoadParams {
    pub fn page_index(&self) -> u32 {
        self.key.unwrap_or(START_PAGE_INDEX)
    }
}

/// Snapshot of the loaded pages used to recompute a refresh key.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingState<T> {
    pub pages: Vec<Page<T>>,
    /// Index of the item that anchors the visible position, across all pages.
    pub anchor_position: Option<usize>,
}

impl<T> PagingState<T> {
    /// Finds the page that contains `position`, or the nearest one.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page<T>> {
        let mut offset = 0;
        for page in &self.pages {
            offset += page.len();
            if position < offset {
                return Some(page);
            }
        }
        self.pages.last()
    }
}

/// A source of pages keyed by 1-based index.
#[async_trait]
pub trait PagingSource<T>: Send + Sync {
    /// Loads the page described by `params`.
    async fn load(&self, params: LoadParams) -> Result<Page<T>>;

    /// Key to reload from after an external invalidation.
    ///
    /// Picks the key of the page anchoring the visible position: `prev_key + 1`
    /// when it has a previous page, otherwise `next_key - 1`.
    fn refresh_key(&self, state: &PagingState<T>) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|key| key + 1)
            .or_else(|| page.next_key.map(|key| key - 1))
    }
}
