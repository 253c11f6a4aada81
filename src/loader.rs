// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated movie list loader.
//!
//! Items only ever grow. A page that comes back empty ends the list, after
//! which further page requests are no-ops.

use crate::models::Movie;
use crate::services::{MovieList, MovieService};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Observable state of one list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Next page to request (1-based)
    pub next_page: u32,
    /// Everything loaded so far, in page order
    pub items: Vec<Movie>,
    /// False once a page returned no items
    pub has_more: bool,
    /// True while a page request is in flight
    pub loading: bool,
    /// Inline error from the last failed page
    pub error: Option<String>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            next_page: 1,
            items: Vec::new(),
            has_more: true,
            loading: false,
            error: None,
        }
    }
}

/// Result of asking a loader for its next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page appended (`count` may be zero, which ends the list)
    Loaded { page: u32, count: usize },
    /// List already ended; nothing requested
    Exhausted,
    /// A request is already in flight; nothing requested
    Busy,
    /// Request failed; error slot set
    Failed,
    /// Session could not be renewed; the user must log in again
    RedirectToLogin,
    /// Owning view closed before the response arrived; state untouched
    Cancelled,
}

impl LoadOutcome {
    pub fn requires_login(self) -> bool {
        self == LoadOutcome::RedirectToLogin
    }
}

/// Loader for one paginated list, bound to its view's lifetime.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct PaginatedLoader {
    list: MovieList,
    movies: MovieService,
    state: Arc<Mutex<ListState>>,
    cancel: CancellationToken,
}

impl PaginatedLoader {
    pub fn new(list: MovieList, movies: MovieService, cancel: CancellationToken) -> Self {
        Self {
            list,
            movies,
            state: Arc::new(Mutex::new(ListState::default())),
            cancel,
        }
    }

    pub fn list(&self) -> MovieList {
        self.list
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ListState {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Request the next page and fold the result into the state.
    pub async fn load_next(&self) -> LoadOutcome {
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelled;
        }

        let page = {
            let mut state = self.lock();
            if !state.has_more {
                return LoadOutcome::Exhausted;
            }
            if state.loading {
                return LoadOutcome::Busy;
            }
            state.loading = true;
            state.error = None;
            state.next_page
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            r = self.movies.page(self.list, page) => Some(r),
        };

        let mut state = self.lock();
        state.loading = false;

        match result {
            None => {
                tracing::debug!(list = ?self.list, page, "Page load cancelled");
                LoadOutcome::Cancelled
            }
            Some(Ok(movies)) => {
                let count = movies.len();
                state.has_more = count > 0;
                if count > 0 {
                    state.items.extend(movies);
                    state.next_page += 1;
                }
                tracing::info!(list = ?self.list, page, count, total = state.items.len(), "Page loaded");
                LoadOutcome::Loaded { page, count }
            }
            Some(Err(e)) => {
                tracing::warn!(list = ?self.list, page, error = %e, "Page load failed");
                state.error = Some(e.inline_message(self.list.error_message()));
                if e.requires_login() {
                    LoadOutcome::RedirectToLogin
                } else {
                    LoadOutcome::Failed
                }
            }
        }
    }
}
