// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Movie and actor models.
//!
//! List endpoints return relative image paths plus a shared `imageBaseUrl`;
//! the display models carry the concatenated URL.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Envelope shared by every movie-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub image_base_url: String,
    pub data: Vec<T>,
}

/// Raw movie entry from `now_playing` / `popular`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
}

/// Raw cast entry from `/movies/{id}/actors`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Movie summary shown in carousels, grids and the details page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Movie {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub title: String,
    /// Backdrop image URL
    pub image: String,
    /// Poster image URL
    pub poster_image: String,
    pub overview: String,
}

/// Cast member shown on the details page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Actor {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    /// Profile picture URL
    pub image: String,
}

/// Join a base URL with an optional relative path (missing path joins as empty).
pub fn image_url(base: &str, path: Option<&str>) -> String {
    format!("{}{}", base, path.unwrap_or_default())
}

impl Movie {
    pub fn from_record(base: &str, record: MovieRecord) -> Self {
        Self {
            id: record.id,
            image: image_url(base, record.backdrop_path.as_deref()),
            poster_image: image_url(base, record.poster_path.as_deref()),
            title: record.title,
            overview: record.overview,
        }
    }
}

impl Actor {
    pub fn from_record(base: &str, record: ActorRecord) -> Self {
        Self {
            id: record.id,
            image: image_url(base, record.profile_path.as_deref()),
            name: record.name,
        }
    }
}

impl ListResponse<MovieRecord> {
    pub fn into_movies(self) -> Vec<Movie> {
        let base = self.image_base_url;
        self.data
            .into_iter()
            .map(|r| Movie::from_record(&base, r))
            .collect()
    }
}

impl ListResponse<ActorRecord> {
    pub fn into_actors(self) -> Vec<Actor> {
        let base = self.image_base_url;
        self.data
            .into_iter()
            .map(|r| Actor::from_record(&base, r))
            .collect()
    }
}
