// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Movie details page: the handed-over movie plus its cast.

use crate::error::ClientError;
use crate::loader::LoadOutcome;
use crate::models::user::header_name;
use crate::models::{Actor, Movie, User};
use crate::services::movies::ACTORS_ERROR_MESSAGE;
use crate::services::MovieService;
use tokio_util::sync::CancellationToken;

/// Shown when the details page is opened without movie data.
pub const MISSING_MOVIE_MESSAGE: &str = "Error: No se encontraron datos de la película.";

/// Shown when the cast is requested without a stored access token.
pub const NO_SESSION_TOKEN_MESSAGE: &str = "No se encontró el token de autenticación.";

pub struct MovieDetailsView {
    movie: Movie,
    user: Option<User>,
    actors: Vec<Actor>,
    loading: bool,
    error: Option<String>,
    movies: MovieService,
    cancel: CancellationToken,
}

impl MovieDetailsView {
    /// Open the page for a movie handed over by the navigator.
    pub fn open(movie: Movie, movies: &MovieService) -> Self {
        let user = movies.auth().session().user().ok().flatten();
        Self {
            movie,
            user,
            actors: Vec::new(),
            loading: true,
            error: None,
            movies: movies.clone(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn header_name(&self) -> String {
        header_name(self.user.as_ref())
    }

    /// Fetch the cast list.
    pub async fn load_actors(&mut self) -> LoadOutcome {
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelled;
        }

        self.loading = true;
        self.error = None;

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            r = self.movies.actors(self.movie.id) => Some(r),
        };

        self.loading = false;
        match result {
            None => LoadOutcome::Cancelled,
            Some(Ok(actors)) => {
                let count = actors.len();
                self.actors = actors;
                LoadOutcome::Loaded { page: 1, count }
            }
            Some(Err(e)) => {
                tracing::warn!(movie_id = self.movie.id, error = %e, "Cast load failed");
                self.error = Some(match e {
                    ClientError::MissingToken => NO_SESSION_TOKEN_MESSAGE.to_string(),
                    _ => e.inline_message(ACTORS_ERROR_MESSAGE),
                });
                if e.requires_login() {
                    LoadOutcome::RedirectToLogin
                } else {
                    LoadOutcome::Failed
                }
            }
        }
    }

    /// Token that closes this page; cancelling it abandons the cast request.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for MovieDetailsView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
