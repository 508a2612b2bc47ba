//! Generic incremental pager.
//!
//! State machine: `Idle -> LoadingInitial -> Idle(has data) ->
//! LoadingNext | LoadingPrevious -> Idle(has data) -> ... -> Idle(exhausted)`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storyline_core::error::Result;
use storyline_core::paging::{LoadParams, Page, PagingSource, PagingState};

/// What the pager is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStatus {
    Idle,
    LoadingInitial,
    LoadingNext,
    LoadingPrevious,
}

/// Result of a single load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A non-empty page was added.
    Loaded { count: usize },
    /// There is nothing more in this direction.
    EndOfData,
    /// The request was a no-op: a load in the same direction was in flight,
    /// or the list was replaced while this load ran.
    Skipped,
}

impl LoadOutcome {
    fn of<T>(page: &Page<T>) -> Self {
        if page.is_empty() {
            LoadOutcome::EndOfData
        } else {
            LoadOutcome::Loaded { count: page.len() }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailedLoad {
    Initial(Option<u32>),
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Next,
    Previous,
}

enum Plan {
    Skip,
    LoadInitial,
    EndOfData,
    Load { key: u32, generation: u64 },
}

struct State<T> {
    pages: Vec<Page<T>>,
    anchor_position: Option<usize>,
    initial_in_flight: bool,
    next_in_flight: bool,
    previous_in_flight: bool,
    /// Bumped whenever the whole list is replaced.
    generation: u64,
    failed: Option<FailedLoad>,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            anchor_position: None,
            initial_in_flight: false,
            next_in_flight: false,
            previous_in_flight: false,
            generation: 0,
            failed: None,
        }
    }
}

/// Loads pages from a [`PagingSource`] on demand.
///
/// At most one load per direction is in flight; a request arriving while one
/// runs returns [`LoadOutcome::Skipped`]. A failed load keeps every page
/// loaded so far and can be re-issued with [`retry`](Self::retry).
///
/// The internal lock is never held across an `.await`.
pub struct Pager<T> {
    source: Arc<dyn PagingSource<T>>,
    page_size: u32,
    state: Mutex<State<T>>,
}

impl<T> Pager<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn PagingSource<T>>, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the first page, replacing anything loaded before.
    pub async fn load_initial(&self) -> Result<LoadOutcome> {
        self.load_from(None).await
    }

    /// Reloads from the page anchoring the visible position.
    ///
    /// Falls back to the first page when no anchor is set.
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        let key = {
            let state = self.lock();
            let snapshot = PagingState {
                pages: state.pages.clone(),
                anchor_position: state.anchor_position,
            };
            self.source.refresh_key(&snapshot)
        };
        tracing::debug!("[Pager] Refreshing from key {:?}", key);
        self.load_from(key).await
    }

    /// Appends the page after the last loaded one.
    pub async fn load_next(&self) -> Result<LoadOutcome> {
        self.load_edge(Edge::Next).await
    }

    /// Prepends the page before the first loaded one.
    pub async fn load_previous(&self) -> Result<LoadOutcome> {
        self.load_edge(Edge::Previous).await
    }

    /// Re-issues the most recent failed load, if any.
    pub async fn retry(&self) -> Result<LoadOutcome> {
        let failed = self.lock().failed;
        match failed {
            None => Ok(LoadOutcome::Skipped),
            Some(FailedLoad::Initial(key)) => self.load_from(key).await,
            Some(FailedLoad::Next) => self.load_next().await,
            Some(FailedLoad::Previous) => self.load_previous().await,
        }
    }

    /// Records the item index currently anchoring the visible position.
    pub fn set_anchor(&self, position: usize) {
        self.lock().anchor_position = Some(position);
    }

    /// Every loaded item, in order.
    pub fn items(&self) -> Vec<T> {
        self.lock()
            .pages
            .iter()
            .flat_map(|page| page.items.iter().cloned())
            .collect()
    }

    pub fn pages(&self) -> Vec<Page<T>> {
        self.lock().pages.clone()
    }

    pub fn status(&self) -> PagerStatus {
        let state = self.lock();
        if state.initial_in_flight {
            PagerStatus::LoadingInitial
        } else if state.next_in_flight {
            PagerStatus::LoadingNext
        } else if state.previous_in_flight {
            PagerStatus::LoadingPrevious
        } else {
            PagerStatus::Idle
        }
    }

    /// True once the last loaded page came back empty.
    pub fn is_exhausted(&self) -> bool {
        self.lock()
            .pages
            .last()
            .is_some_and(|page| page.next_key.is_none())
    }

    /// True when the last load failed and has not been retried successfully.
    pub fn has_pending_retry(&self) -> bool {
        self.lock().failed.is_some()
    }

    async fn load_from(&self, key: Option<u32>) -> Result<LoadOutcome> {
        {
            let mut state = self.lock();
            if state.initial_in_flight {
                return Ok(LoadOutcome::Skipped);
            }
            state.initial_in_flight = true;
        }

        let result = self
            .source
            .load(LoadParams {
                key,
                load_size: self.page_size,
            })
            .await;

        let mut state = self.lock();
        state.initial_in_flight = false;
        match result {
            Ok(page) => {
                let outcome = LoadOutcome::of(&page);
                state.pages = vec![page];
                state.anchor_position = None;
                state.generation += 1;
                state.failed = None;
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("[Pager] Load of page {:?} failed: {}", key, e);
                state.failed = Some(FailedLoad::Initial(key));
                Err(e)
            }
        }
    }

    fn plan(&self, edge: Edge) -> Plan {
        let mut state = self.lock();
        let in_flight = match edge {
            Edge::Next => state.next_in_flight,
            Edge::Previous => state.previous_in_flight,
        };
        if state.initial_in_flight || in_flight {
            return Plan::Skip;
        }

        let key = match edge {
            Edge::Next => match state.pages.last() {
                Some(page) => page.next_key,
                None => return Plan::LoadInitial,
            },
            Edge::Previous => match state.pages.first() {
                Some(page) => page.prev_key,
                None => return Plan::LoadInitial,
            },
        };
        let Some(key) = key else {
            return Plan::EndOfData;
        };

        match edge {
            Edge::Next => state.next_in_flight = true,
            Edge::Previous => state.previous_in_flight = true,
        }
        Plan::Load {
            key,
            generation: state.generation,
        }
    }

    async fn load_edge(&self, edge: Edge) -> Result<LoadOutcome> {
        let (key, generation) = match self.plan(edge) {
            Plan::Skip => return Ok(LoadOutcome::Skipped),
            Plan::EndOfData => return Ok(LoadOutcome::EndOfData),
            Plan::LoadInitial => return self.load_initial().await,
            Plan::Load { key, generation } => (key, generation),
        };

        let result = self
            .source
            .load(LoadParams {
                key: Some(key),
                load_size: self.page_size,
            })
            .await;

        let mut state = self.lock();
        match edge {
            Edge::Next => state.next_in_flight = false,
            Edge::Previous => state.previous_in_flight = false,
        }
        if state.generation != generation {
            // The list was replaced meanwhile; there is nothing to retry against
            return match result {
                Ok(_) => {
                    tracing::debug!("[Pager] Discarding page {} loaded before a refresh", key);
                    Ok(LoadOutcome::Skipped)
                }
                Err(e) => {
                    tracing::warn!("[Pager] Load of page {} failed during a refresh: {}", key, e);
                    Err(e)
                }
            };
        }

        match result {
            Ok(page) => {
                let outcome = LoadOutcome::of(&page);
                match edge {
                    Edge::Next => state.pages.push(page),
                    Edge::Previous => {
                        let added = page.len();
                        state.pages.insert(0, page);
                        if let Some(anchor) = state.anchor_position.as_mut() {
                            *anchor += added;
                        }
                    }
                }
                state.failed = None;
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!("[Pager] Load of page {} failed: {}", key, e);
                state.failed = Some(match edge {
                    Edge::Next => FailedLoad::Next,
                    Edge::Previous => FailedLoad::Previous,
                });
                Err(e)
            }
        }
    }
}
