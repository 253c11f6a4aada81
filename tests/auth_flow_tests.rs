// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, refresh and retry behaviour against the mock API.

use agile_movies::error::ClientError;
use agile_movies::navigation::Route;
use agile_movies::session::Session;
use agile_movies::services::MovieList;
use agile_movies::views::LoginView;
use std::sync::atomic::Ordering;
use std::time::Duration;

mod common;
use common::{MockApi, MockState, IMAGE_BASE_URL, INITIAL_ACCESS_TOKEN, REFRESH_TOKEN, VALID_PASSWORD};

#[tokio::test]
async fn test_login_stores_tokens_and_user() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_out_app();

    let user = app.auth.login("ana", VALID_PASSWORD).await.unwrap();

    assert_eq!(user, common::test_user());
    let session = app.session();
    assert_eq!(
        session.access_token().unwrap().as_deref(),
        Some(INITIAL_ACCESS_TOKEN)
    );
    assert_eq!(
        session.refresh_token().unwrap().as_deref(),
        Some(REFRESH_TOKEN)
    );
    assert_eq!(session.user().unwrap(), Some(common::test_user()));
}

#[tokio::test]
async fn test_login_then_now_playing_builds_image_urls() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_out_app();

    app.auth.login("ana", VALID_PASSWORD).await.unwrap();
    let movies = app.movies.now_playing(1).await.unwrap();

    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0].id, 1);
    assert_eq!(
        movies[0].image,
        format!("{}/backdrop-1.jpg", IMAGE_BASE_URL)
    );
    assert_eq!(
        movies[0].poster_image,
        format!("{}/poster-1.jpg", IMAGE_BASE_URL)
    );
    assert_eq!(api.state.refresh_count(), 0);
}

#[tokio::test]
async fn test_login_rejected_shows_server_message() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_out_app();

    let mut view = LoginView::new();
    view.set_username("ana");
    view.set_password("wrong");
    let route = view.submit(&app.auth).await;

    assert_eq!(route, None);
    assert_eq!(view.error(), Some("Credenciales inválidas para ana"));
    assert!(!app.session().is_authenticated());

    // Editing a field clears the banner
    view.set_password(VALID_PASSWORD);
    assert_eq!(view.error(), None);
    assert_eq!(view.submit(&app.auth).await, Some(Route::Home));
}

#[tokio::test]
async fn test_login_validation_skips_network() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_out_app();

    let result = app.auth.login("", VALID_PASSWORD).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(api.state.login_count(), 0);
}

#[tokio::test]
async fn test_login_network_failure_message() {
    // Nothing listens on port 9 of localhost.
    let app = agile_movies::AppState::new(
        agile_movies::config::Config::with_api_url("http://127.0.0.1:9"),
        agile_movies::session::Session::in_memory(),
    )
    .unwrap();

    let mut view = LoginView::new();
    view.set_username("ana");
    view.set_password(VALID_PASSWORD);

    assert_eq!(view.submit(&app.auth).await, None);
    assert_eq!(view.error(), Some(ClientError::LOGIN_NETWORK_MESSAGE));
}

#[tokio::test]
async fn test_missing_token_never_reaches_network() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_out_app();

    let result = app.movies.now_playing(1).await;
    assert!(matches!(result, Err(ClientError::MissingToken)));

    let result = app.movies.actors(42).await;
    assert!(matches!(result, Err(ClientError::MissingToken)));

    assert_eq!(api.state.movie_count(), 0);
    assert_eq!(api.state.refresh_count(), 0);
}

#[tokio::test]
async fn test_unauthorized_refreshes_once_and_retries() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_in_app();
    api.state.expire_access_token();

    let movies = app.movies.page(MovieList::Popular, 1).await.unwrap();

    assert_eq!(movies.len(), 4);
    assert_eq!(api.state.refresh_count(), 1);
    // First attempt plus the retry
    assert_eq!(api.state.movie_count(), 2);
    assert_eq!(
        app.session().access_token().unwrap(),
        Some(api.state.current_access_token())
    );
}

#[tokio::test]
async fn test_refresh_failure_requires_login() {
    let api = MockApi::start(MockState::default()).await;
    api.state.refresh_fails.store(true, Ordering::SeqCst);
    let app = api.logged_in_app();
    api.state.expire_access_token();

    let err = app.movies.actors(7).await.unwrap_err();

    assert!(matches!(err, ClientError::RefreshFailed(_)));
    assert!(err.requires_login());
    assert_eq!(api.state.refresh_count(), 1);
    assert_eq!(api.state.movie_count(), 1);
}

#[tokio::test]
async fn test_missing_refresh_token_requires_login() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_in_app();
    app.session().clear().unwrap();
    app.session().set_access_token("stale").unwrap();

    let err = app.movies.now_playing(1).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingRefreshToken));
    assert!(err.requires_login());
    assert_eq!(api.state.refresh_count(), 0);
}

#[tokio::test]
async fn test_second_unauthorized_is_inline_error() {
    let api = MockApi::start(MockState::default()).await;
    api.state.reject_all.store(true, Ordering::SeqCst);
    let app = api.logged_in_app();

    let err = app.movies.now_playing(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
    assert!(!err.requires_login());
    assert_eq!(api.state.refresh_count(), 1);
    assert_eq!(api.state.movie_count(), 2);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let api = MockApi::start(MockState::default()).await;
    api.state
        .set_list_status(Some(axum::http::StatusCode::INTERNAL_SERVER_ERROR));
    let app = api.logged_in_app();

    let err = app.movies.popular(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert!(!err.requires_login());
    assert_eq!(api.state.refresh_count(), 0);
    assert_eq!(api.state.movie_count(), 1);
}

#[tokio::test]
async fn test_actors_map_profile_images() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_in_app();

    let actors = app.movies.actors(42).await.unwrap();

    assert_eq!(actors.len(), 2);
    assert_eq!(actors[0].name, "Zendaya");
    assert_eq!(actors[0].image, format!("{}/zendaya.jpg", IMAGE_BASE_URL));
    assert_eq!(actors[1].image, IMAGE_BASE_URL);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let api = MockApi::start(MockState::default()).await;
    let app = api.logged_in_app();

    app.auth.logout().unwrap();

    assert!(!app.session().is_authenticated());
    assert_eq!(app.session().refresh_token().unwrap(), None);
    assert_eq!(app.session().user().unwrap(), None);
    assert_eq!(Route::Home.guard(app.session()), Route::Login);
}

#[tokio::test]
async fn test_transport_failure_on_retry_is_inline_error() {
    let api = MockApi::start(MockState {
        authorized_delay: Duration::from_secs(2),
        ..MockState::default()
    })
    .await;
    let mut config = api.config();
    config.request_timeout = Duration::from_millis(200);
    let app = api.logged_in_app_with(config, Session::in_memory());
    api.state.expire_access_token();

    // First attempt gets a 401, the refresh succeeds, the retry stalls.
    let err = app.movies.now_playing(1).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)), "got {:?}", err);
    assert!(!err.requires_login());
    assert_eq!(
        err.inline_message(MovieList::NowPlaying.error_message()),
        MovieList::NowPlaying.error_message()
    );
    assert_eq!(api.state.refresh_count(), 1);
    assert!(app.session().is_authenticated());
}
