// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! AgileMovies client: browse now-playing and popular movies
//!
//! This crate provides the session, authenticated API access and page
//! state for the AgileMovies catalogue API.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;
pub mod views;

use config::Config;
use error::Result;
use services::{ApiClient, AuthService, MovieService};
use session::Session;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: AuthService,
    pub movies: MovieService,
}

impl AppState {
    /// Wire the services around an existing session.
    pub fn new(config: Config, session: Session) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        let auth = AuthService::new(client, Arc::new(session));
        let movies = MovieService::new(auth.clone());
        Ok(Self {
            config,
            auth,
            movies,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        self.auth.session()
    }
}
