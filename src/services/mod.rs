// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and session logic.

pub mod api;
pub mod auth;
pub mod movies;

pub use api::ApiClient;
pub use auth::AuthService;
pub use movies::{MovieList, MovieService};
