// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types for the login and refresh endpoints.

use super::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Response of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub payload: TokenPair,
    pub user: User,
}

/// Access and refresh tokens issued at login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Error body the login endpoint may send with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/auth/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response of `POST /api/auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub payload: RefreshedToken,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub token: String,
}
