// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User profile model cached in the session.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Name shown in the header when no profile is stored.
pub const PLACEHOLDER_NAME: &str = "Nombre Apellido";

/// Profile returned by the login endpoint and stored under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Email address
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
}

impl User {
    /// "First Last", as shown next to the avatar.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Header name for an optional profile.
pub fn header_name(user: Option<&User>) -> String {
    user.map(User::display_name)
        .unwrap_or_else(|| PLACEHOLDER_NAME.to_string())
}
