// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the AgileMovies API.

use agile_movies::config::Config;
use agile_movies::models::{TokenPair, User};
use agile_movies::session::Session;
use agile_movies::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub const IMAGE_BASE_URL: &str = "https://image.test/t/p/w500";
#[allow(dead_code)]
pub const VALID_PASSWORD: &str = "secret";
#[allow(dead_code)]
pub const INITIAL_ACCESS_TOKEN: &str = "access-0";
#[allow(dead_code)]
pub const REFRESH_TOKEN: &str = "refresh-0";

/// Server-side state of the mock.
pub struct MockState {
    /// Access token the server currently accepts
    pub access_token: Mutex<String>,
    /// Pages of now-playing movies (index 0 is page 1)
    pub now_playing: Vec<Vec<Value>>,
    /// Pages of popular movies
    pub popular: Vec<Vec<Value>>,
    pub actors: Vec<Value>,
    /// Refresh endpoint answers 401
    pub refresh_fails: AtomicBool,
    /// Movie endpoints answer 401 even for the current token
    pub reject_all: AtomicBool,
    /// Status forced on movie endpoints
    pub list_status: Mutex<Option<StatusCode>>,
    pub refresh_delay: Duration,
    pub list_delay: Duration,
    /// Stall applied after a request passes the bearer check
    pub authorized_delay: Duration,
    pub issued: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub movie_calls: AtomicUsize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            access_token: Mutex::new(INITIAL_ACCESS_TOKEN.to_string()),
            now_playing: vec![movie_page(1..=3), movie_page(4..=5)],
            popular: vec![movie_page(100..=103)],
            actors: vec![
                json!({"id": 1, "name": "Zendaya", "profile_path": "/zendaya.jpg"}),
                json!({"id": 2, "name": "Unknown Extra", "profile_path": null}),
            ],
            refresh_fails: AtomicBool::new(false),
            reject_all: AtomicBool::new(false),
            list_status: Mutex::new(None),
            refresh_delay: Duration::ZERO,
            list_delay: Duration::ZERO,
            authorized_delay: Duration::ZERO,
            issued: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            movie_calls: AtomicUsize::new(0),
        }
    }
}

#[allow(dead_code)]
impl MockState {
    /// Invalidate the current access token so the next request gets a 401.
    pub fn expire_access_token(&self) {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        *self.access_token.lock().unwrap() = format!("expired-{}", n);
    }

    pub fn current_access_token(&self) -> String {
        self.access_token.lock().unwrap().clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn movie_count(&self) -> usize {
        self.movie_calls.load(Ordering::SeqCst)
    }

    pub fn login_count(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn set_list_status(&self, status: Option<StatusCode>) {
        *self.list_status.lock().unwrap() = status;
    }
}

/// Movie records for `ids`, with image paths derived from the id.
pub fn movie_page(ids: std::ops::RangeInclusive<u64>) -> Vec<Value> {
    ids.map(|id| {
        json!({
            "id": id,
            "title": format!("Movie {}", id),
            "backdrop_path": format!("/backdrop-{}.jpg", id),
            "poster_path": format!("/poster-{}.jpg", id),
            "overview": format!("Overview of movie {}", id),
        })
    })
    .collect()
}

/// Running mock server.
pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockApi {
    pub async fn start(state: MockState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/refresh", post(refresh))
            .route("/api/movies/now_playing", get(now_playing))
            .route("/api/movies/popular", get(popular))
            .route("/api/movies/{id}/actors", get(actors))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config::with_api_url(self.base_url.clone())
    }

    /// Client state with an empty session.
    #[allow(dead_code)]
    pub fn logged_out_app(&self) -> AppState {
        AppState::new(self.config(), Session::in_memory()).expect("Failed to build app state")
    }

    /// Client state whose session holds the server's initial tokens.
    #[allow(dead_code)]
    pub fn logged_in_app(&self) -> AppState {
        self.logged_in_app_with(self.config(), Session::in_memory())
    }

    /// Like `logged_in_app`, with a custom configuration and session store.
    #[allow(dead_code)]
    pub fn logged_in_app_with(&self, config: Config, session: Session) -> AppState {
        session
            .store_login(
                &TokenPair {
                    token: INITIAL_ACCESS_TOKEN.to_string(),
                    refresh_token: REFRESH_TOKEN.to_string(),
                },
                &test_user(),
            )
            .unwrap();
        AppState::new(config, session).expect("Failed to build app state")
    }
}

pub fn test_user() -> User {
    User {
        email: "ana@example.com".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Rojas".to_string(),
    }
}

// ─── Handlers ────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<LoginBody>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body.password != VALID_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": format!("Credenciales inválidas para {}", body.username)})),
        )
            .into_response();
    }

    let user = test_user();
    Json(json!({
        "data": {
            "payload": {
                "token": state.current_access_token(),
                "refresh_token": REFRESH_TOKEN,
            },
            "user": {
                "email": user.email,
                "firstName": user.first_name,
                "lastName": user.last_name,
            },
        }
    }))
    .into_response()
}

#[derive(Deserialize)]
struct RefreshBody {
    refresh_token: String,
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<RefreshBody>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if !state.refresh_delay.is_zero() {
        tokio::time::sleep(state.refresh_delay).await;
    }

    if state.refresh_fails.load(Ordering::SeqCst) || body.refresh_token != REFRESH_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid refresh token"})),
        )
            .into_response();
    }

    let n = state.issued.fetch_add(1, Ordering::SeqCst) + 1;
    let token = format!("access-{}", n);
    *state.access_token.lock().unwrap() = token.clone();
    Json(json!({"payload": {"token": token}})).into_response()
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

/// Shared bearer check and forced-status handling for movie endpoints.
async fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    state.movie_calls.fetch_add(1, Ordering::SeqCst);
    if !state.list_delay.is_zero() {
        tokio::time::sleep(state.list_delay).await;
    }

    let expected = format!("Bearer {}", state.current_access_token());
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    if state.reject_all.load(Ordering::SeqCst) || presented != Some(expected.as_str()) {
        return Err(StatusCode::UNAUTHORIZED.into_response());
    }

    if !state.authorized_delay.is_zero() {
        tokio::time::sleep(state.authorized_delay).await;
    }

    if let Some(status) = *state.list_status.lock().unwrap() {
        return Err((status, "forced failure").into_response());
    }
    Ok(())
}

fn page_response(pages: &[Vec<Value>], page: Option<usize>) -> Response {
    let index = page.unwrap_or(1).saturating_sub(1);
    let data = pages.get(index).cloned().unwrap_or_default();
    Json(json!({"imageBaseUrl": IMAGE_BASE_URL, "data": data})).into_response()
}

async fn now_playing(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    page_response(&state.now_playing, query.page)
}

async fn popular(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    page_response(&state.popular, query.page)
}

async fn actors(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_id): Path<u64>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    Json(json!({"imageBaseUrl": IMAGE_BASE_URL, "data": state.actors})).into_response()
}
