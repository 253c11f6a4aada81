// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login session: the token pair and cached user profile.
//!
//! The session is the only owner of credentials. Request code receives it
//! by reference (`Arc<Session>`) and never touches the store directly.

pub mod store;

pub use store::{FileStore, MemoryStore, SessionStore};

use crate::error::Result;
use crate::models::{TokenPair, User};

/// Storage key of the access token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key of the serialized user profile.
pub const USER_KEY: &str = "user";

/// Credentials and profile for the logged-in user.
pub struct Session {
    store: Box<dyn SessionStore>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Session backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn access_token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Result<Option<String>> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// Cached profile. An unreadable entry is treated as absent.
    pub fn user(&self) -> Result<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user profile is unreadable, ignoring");
                Ok(None)
            }
        }
    }

    /// True when an access token is stored (what the route guard checks).
    pub fn is_authenticated(&self) -> bool {
        matches!(self.access_token(), Ok(Some(_)))
    }

    /// Store everything returned by a successful login, as one write.
    pub fn store_login(&self, tokens: &TokenPair, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user).map_err(anyhow::Error::from)?;
        self.store.set_many(&[
            (TOKEN_KEY, tokens.token.as_str()),
            (REFRESH_TOKEN_KEY, tokens.refresh_token.as_str()),
            (USER_KEY, user_json.as_str()),
        ])
    }

    /// Overwrite the access token after a refresh.
    pub fn set_access_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Remove the token pair and profile.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print token values.
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
