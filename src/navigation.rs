// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side routes, the auth guard, and the movie handoff.
//!
//! Movie data travels to the details page in memory; the route itself only
//! carries the id.

use crate::models::Movie;
use crate::session::Session;
use std::fmt;
use std::sync::Arc;

/// Client-side route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, always forwards to the login page
    Root,
    Login,
    Home,
    Movie(u64),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),

    #[error("Invalid movie id: {0}")]
    InvalidMovieId(String),
}

impl Route {
    /// Parse a path such as `/movie/42`. Query strings and trailing slashes
    /// are ignored.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Root),
            ["login"] => Ok(Route::Login),
            ["home"] => Ok(Route::Home),
            ["movie", id] => {
                let decoded = urlencoding::decode(id)
                    .map_err(|_| RouteError::InvalidMovieId(id.to_string()))?;
                decoded
                    .parse()
                    .map(Route::Movie)
                    .map_err(|_| RouteError::InvalidMovieId(decoded.into_owned()))
            }
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Home | Route::Movie(_))
    }

    /// Where a navigation to this route actually lands for the given session.
    pub fn guard(self, session: &Session) -> Route {
        match self {
            Route::Root => Route::Login,
            r if r.requires_auth() && !session.is_authenticated() => {
                tracing::debug!(route = %r, "Not authenticated, redirecting to login");
                Route::Login
            }
            r => r,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Home => write!(f, "/home"),
            Route::Movie(id) => write!(f, "/movie/{}", id),
        }
    }
}

/// Current route plus the movie handed to the details page.
#[derive(Debug)]
pub struct Navigator {
    session: Arc<Session>,
    current: Route,
    handoff: Option<Movie>,
}

impl Navigator {
    /// Start at `/`, which lands on the login page.
    pub fn new(session: Arc<Session>) -> Self {
        let current = Route::Root.guard(&session);
        Self {
            session,
            current,
            handoff: None,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Navigate, applying the auth guard. Returns where we landed.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.current = route.guard(&self.session);
        if !matches!(self.current, Route::Movie(_)) {
            self.handoff = None;
        }
        self.current
    }

    /// Parse and navigate to `path`.
    pub fn navigate_path(&mut self, path: &str) -> Result<Route, RouteError> {
        Ok(self.navigate(Route::parse(path)?))
    }

    /// Open the details page for `movie`, handing the data over in memory.
    pub fn open_movie(&mut self, movie: Movie) -> Route {
        let id = movie.id;
        self.handoff = Some(movie);
        let landed = self.navigate(Route::Movie(id));
        if landed != Route::Movie(id) {
            self.handoff = None;
        }
        landed
    }

    /// Take the handed-over movie if it belongs to the current route.
    pub fn take_movie(&mut self) -> Option<Movie> {
        match self.current {
            Route::Movie(id) if self.handoff.as_ref().is_some_and(|m| m.id == id) => {
                self.handoff.take()
            }
            _ => None,
        }
    }

    pub fn redirect_to_login(&mut self) -> Route {
        self.navigate(Route::Login)
    }
}
