// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types and the login-redirect policy.

/// Error type for every client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("No authorization token available")]
    MissingToken,

    #[error("No refresh token stored in the session")]
    MissingRefreshToken,

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Login rejected: {0}")]
    InvalidCredentials(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Message shown when a list is requested without a stored access token.
    pub const NO_TOKEN_MESSAGE: &'static str = "No hay token de autorización disponible.";

    /// Message shown when the login request cannot reach the server.
    pub const LOGIN_NETWORK_MESSAGE: &'static str = "Error de red al intentar iniciar sesión";

    /// Fallback message when the login endpoint rejects without a message.
    pub const LOGIN_REJECTED_MESSAGE: &'static str = "Error de autenticación";

    /// True when the session can no longer be renewed and the user must log in again.
    ///
    /// Every other failure is reported inline by the view that triggered it,
    /// whether it happened on the first attempt or on the retry.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::MissingRefreshToken | ClientError::RefreshFailed(_)
        )
    }

    /// True when the server rejected the access token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// User-facing message for an inline error slot.
    ///
    /// `context` is the call site's own wording for a failed fetch.
    pub fn inline_message(&self, context: &str) -> String {
        match self {
            ClientError::MissingToken => Self::NO_TOKEN_MESSAGE.to_string(),
            ClientError::InvalidCredentials(msg) | ClientError::Validation(msg) => msg.clone(),
            _ => context.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
