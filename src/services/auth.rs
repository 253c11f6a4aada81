// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-aware authentication service.
//!
//! Handles:
//! - Login and logout
//! - Token refresh, coalesced so concurrent 401s renew only once
//! - Bearer-authenticated requests with a single refresh-and-retry

use crate::error::{ClientError, Result};
use crate::models::{LoginRequest, User};
use crate::services::api::ApiClient;
use crate::session::Session;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use validator::Validate;

/// Outcome of the most recent refresh, kept under the refresh lock.
#[derive(Debug, Default)]
struct RefreshState {
    /// The last completed refresh failed. Only shared with callers that
    /// observed an older generation, i.e. were already waiting on it.
    last_failed: bool,
}

/// High-level service that owns the session and issues authenticated calls.
///
/// Cloning is cheap; clones share the session and the refresh lock.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    session: Arc<Session>,
    /// Serializes refresh operations for this session.
    refresh_lock: Arc<Mutex<RefreshState>>,
    /// Number of completed refresh attempts. Written under `refresh_lock`.
    refresh_generation: Arc<AtomicU64>,
}

impl AuthService {
    pub fn new(client: ApiClient, session: Arc<Session>) -> Self {
        Self {
            client,
            session,
            refresh_lock: Arc::new(Mutex::new(RefreshState::default())),
            refresh_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Current refresh generation. Read it before sending a request and pass
    /// it to [`AuthService::refresh_after_rejection`] if the request gets a 401.
    pub fn refresh_generation(&self) -> u64 {
        self.refresh_generation.load(Ordering::Acquire)
    }

    // ─── Login / Logout ──────────────────────────────────────────────────────

    /// Log in and store the token pair and profile in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let response = self.client.login(&request).await?;
        let data = response.data;
        let session = self.session.clone();
        let user = data.user.clone();
        tokio::task::spawn_blocking(move || session.store_login(&data.payload, &data.user))
            .await
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("session write panicked: {}", e)))??;

        self.refresh_lock.lock().await.last_failed = false;

        tracing::info!(email = %user.email, "Logged in");
        Ok(user)
    }

    /// Forget the token pair and profile.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    // ─── Token Refresh ───────────────────────────────────────────────────────

    /// Renew the access token using the stored refresh token.
    ///
    /// On success the new token is in the session; callers re-read it.
    pub async fn refresh_token(&self) -> Result<()> {
        let mut state = self.refresh_lock.lock().await;
        self.renew_locked(&mut state).await
    }

    /// Renew the access token after the server rejected `rejected`.
    ///
    /// `seen_generation` is [`AuthService::refresh_generation`] as read before
    /// the rejected request was sent. Only one refresh runs at a time:
    /// - a caller that waited while another caller renewed sees a different
    ///   stored token and returns without contacting the server;
    /// - a caller that waited while another caller's refresh failed gets
    ///   that failure without a second renewal request.
    ///
    /// A request sent after a failed refresh observes the new generation and
    /// attempts its own renewal.
    pub async fn refresh_after_rejection(
        &self,
        rejected: &str,
        seen_generation: u64,
    ) -> Result<()> {
        let mut state = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token()? {
            if current != rejected {
                tracing::debug!("Access token already renewed by another request");
                return Ok(());
            }
        }

        if state.last_failed && self.refresh_generation() != seen_generation {
            return Err(ClientError::RefreshFailed(
                "concurrent renewal for this token failed".to_string(),
            ));
        }

        self.renew_locked(&mut state).await
    }

    /// One renewal round-trip, recording its outcome in `state`.
    async fn renew_locked(&self, state: &mut RefreshState) -> Result<()> {
        let result = self.renew().await;
        state.last_failed = matches!(result, Err(ClientError::RefreshFailed(_)));
        self.refresh_generation.fetch_add(1, Ordering::AcqRel);
        result
    }

    /// Caller must hold the refresh lock.
    async fn renew(&self) -> Result<()> {
        let refresh_token = self
            .session
            .refresh_token()?
            .ok_or(ClientError::MissingRefreshToken)?;

        let response = self.client.refresh(&refresh_token).await.map_err(|e| {
            tracing::warn!(error = %e, "Token refresh failed");
            ClientError::RefreshFailed(e.to_string())
        })?;

        // The file-backed store does blocking I/O.
        let session = self.session.clone();
        let token = response.payload.token;
        tokio::task::spawn_blocking(move || session.set_access_token(&token))
            .await
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("session write panicked: {}", e)))??;

        tracing::info!("Access token refreshed");
        Ok(())
    }

    // ─── Authenticated Requests ──────────────────────────────────────────────

    /// GET `path` with the session's bearer token.
    ///
    /// A 401 triggers one (coalesced) refresh and one retry. A missing
    /// access token fails before any network contact.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut retried = false;
        loop {
            let token = self
                .session
                .access_token()?
                .ok_or(ClientError::MissingToken)?;
            let generation = self.refresh_generation();

            match self.client.get_json(path, query, &token).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_unauthorized() && !retried => {
                    tracing::info!(path, "Access token rejected, refreshing");
                    self.refresh_after_rejection(&token, generation).await?;
                    retried = true;
                }
                Err(e) => {
                    tracing::debug!(path, retried, error = %e, "Authenticated request failed");
                    return Err(e);
                }
            }
        }
    }
}
