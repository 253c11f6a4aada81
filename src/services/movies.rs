// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Movie catalogue calls on top of the authenticated request.

use crate::error::Result;
use crate::models::{Actor, ActorRecord, ListResponse, Movie, MovieRecord};
use crate::services::auth::AuthService;

/// The two paginated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    NowPlaying,
    Popular,
}

impl MovieList {
    pub fn path(self) -> &'static str {
        match self {
            MovieList::NowPlaying => "/api/movies/now_playing",
            MovieList::Popular => "/api/movies/popular",
        }
    }

    /// Inline message shown when a page of this list fails to load.
    pub fn error_message(self) -> &'static str {
        match self {
            MovieList::NowPlaying => "Error al obtener películas en estreno.",
            MovieList::Popular => "Error al obtener películas populares.",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MovieList::NowPlaying => "Películas en estreno",
            MovieList::Popular => "Películas más populares",
        }
    }
}

/// Inline message shown when the cast list fails to load.
pub const ACTORS_ERROR_MESSAGE: &str = "Error al obtener los datos de los actores.";

#[derive(Clone)]
pub struct MovieService {
    auth: AuthService,
}

impl MovieService {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Fetch one page (1-based) of a movie list.
    pub async fn page(&self, list: MovieList, page: u32) -> Result<Vec<Movie>> {
        let response: ListResponse<MovieRecord> = self
            .auth
            .get_json(list.path(), &[("page", page.to_string())])
            .await?;

        let movies = response.into_movies();
        tracing::debug!(list = ?list, page, count = movies.len(), "Fetched movie page");
        Ok(movies)
    }

    pub async fn now_playing(&self, page: u32) -> Result<Vec<Movie>> {
        self.page(MovieList::NowPlaying, page).await
    }

    pub async fn popular(&self, page: u32) -> Result<Vec<Movie>> {
        self.page(MovieList::Popular, page).await
    }

    /// Cast of a movie.
    pub async fn actors(&self, movie_id: u64) -> Result<Vec<Actor>> {
        let path = format!("/api/movies/{}/actors", movie_id);
        let response: ListResponse<ActorRecord> = self.auth.get_json(&path, &[]).await?;

        let actors = response.into_actors();
        tracing::debug!(movie_id, count = actors.len(), "Fetched cast");
        Ok(actors)
    }
}
