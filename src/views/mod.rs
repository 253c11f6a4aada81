// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page state machines: login, home and movie details.
//!
//! Views hold no presentation data. A renderer reads their state and feeds
//! them user events; each view cancels its in-flight requests when closed.

pub mod details;
pub mod home;
pub mod login;

pub use details::MovieDetailsView;
pub use home::HomeView;
pub use login::LoginView;
