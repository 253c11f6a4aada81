// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Home page: now-playing carousel and popular grid.

use crate::loader::{LoadOutcome, PaginatedLoader};
use crate::models::user::header_name;
use crate::models::User;
use crate::services::{MovieList, MovieService};
use tokio_util::sync::CancellationToken;

pub struct HomeView {
    user: Option<User>,
    now_playing: PaginatedLoader,
    popular: PaginatedLoader,
    cancel: CancellationToken,
}

impl HomeView {
    /// Open the page. Nothing is fetched until [`HomeView::load_initial`].
    pub fn open(movies: &MovieService) -> Self {
        let cancel = CancellationToken::new();
        let user = match movies.auth().session().user() {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read user profile");
                None
            }
        };

        Self {
            user,
            now_playing: PaginatedLoader::new(
                MovieList::NowPlaying,
                movies.clone(),
                cancel.child_token(),
            ),
            popular: PaginatedLoader::new(MovieList::Popular, movies.clone(), cancel.child_token()),
            cancel,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Name for the header, or the placeholder when no profile is stored.
    pub fn header_name(&self) -> String {
        header_name(self.user.as_ref())
    }

    pub fn now_playing(&self) -> &PaginatedLoader {
        &self.now_playing
    }

    pub fn popular(&self) -> &PaginatedLoader {
        &self.popular
    }

    /// Load the first page of both lists concurrently.
    pub async fn load_initial(&self) -> (LoadOutcome, LoadOutcome) {
        tokio::join!(self.now_playing.load_next(), self.popular.load_next())
    }

    /// Carousel moved to slide `index`. Reaching the last slide loads the
    /// next page of now-playing movies.
    pub async fn on_slide_changed(&self, index: usize) -> Option<LoadOutcome> {
        let len = self.now_playing.len();
        if len == 0 || index != len - 1 || !self.now_playing.has_more() {
            return None;
        }
        Some(self.now_playing.load_next().await)
    }

    /// Popular grid scrolled to the bottom.
    pub async fn on_scroll_bottom(&self) -> Option<LoadOutcome> {
        if !self.popular.has_more() || self.popular.is_loading() {
            return None;
        }
        Some(self.popular.load_next().await)
    }

    /// Close the page, abandoning any in-flight page loads.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for HomeView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
