// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login form.

use crate::error::ClientError;
use crate::navigation::Route;
use crate::services::AuthService;

#[derive(Debug, Default)]
pub struct LoginView {
    username: String,
    password: String,
    error: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editing either field clears the error banner.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.error = None;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form. Returns the route to go to on success.
    pub async fn submit(&mut self, auth: &AuthService) -> Option<Route> {
        match auth.login(&self.username, &self.password).await {
            Ok(_) => {
                self.error = None;
                Some(Route::Home)
            }
            Err(e) => {
                self.error = Some(match e {
                    ClientError::Transport(_) => ClientError::LOGIN_NETWORK_MESSAGE.to_string(),
                    ClientError::InvalidCredentials(msg) | ClientError::Validation(msg) => msg,
                    _ => ClientError::LOGIN_REJECTED_MESSAGE.to_string(),
                });
                None
            }
        }
    }
}
