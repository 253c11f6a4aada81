// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod auth;
pub mod movie;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshResponse, TokenPair};
pub use movie::{Actor, ActorRecord, ListResponse, Movie, MovieRecord};
pub use user::User;
