// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Low-level AgileMovies API client.
//!
//! Knows the endpoints and status mapping only. Credentials are passed in
//! per call; the session and the refresh-and-retry policy live in
//! [`crate::services::auth`].

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::auth::{LoginErrorBody, RefreshRequest};
use crate::models::{LoginRequest, LoginResponse, RefreshResponse};
use serde::de::DeserializeOwned;

/// AgileMovies API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured server.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a token pair and profile.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Login request failed");
                ClientError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body: LoginErrorBody = response.json().await.unwrap_or_default();
            tracing::info!(status = %status, "Login rejected");
            return Err(ClientError::InvalidCredentials(body.message.unwrap_or_else(
                || ClientError::LOGIN_REJECTED_MESSAGE.to_string(),
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("login response: {}", e)))
    }

    /// Mint a new access token from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let response = self
            .http
            .post(self.url("/api/auth/refresh"))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Bearer-authenticated GET with JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        access_token: &str,
    ) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        // Unauthorized - token may be expired
        if status.as_u16() == 401 {
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
