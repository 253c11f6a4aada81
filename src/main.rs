// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AgileMovies command-line client
//!
//! Logs in against the AgileMovies API, keeps the session in a local file,
//! and prints movie lists and cast information.

use agile_movies::{
    config::{Config, LogFormat, DEFAULT_LOG_FILTER},
    loader::LoadOutcome,
    models::{Actor, Movie},
    navigation::{Navigator, Route},
    services::MovieList,
    session::{FileStore, Session},
    views::{details::MISSING_MOVIE_MESSAGE, HomeView, LoginView, MovieDetailsView},
    AppState,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "agile-movies")]
#[command(author, version, about = "Browse the AgileMovies catalogue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long, env = "AGILE_MOVIES_USERNAME")]
        username: String,
        #[arg(short, long, env = "AGILE_MOVIES_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List one page of now-playing movies
    NowPlaying {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List one page of popular movies
    Popular {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// List the cast of a movie
    Actors { movie_id: u64 },
    /// Open the home page, optionally paging further and opening a movie
    Browse {
        /// Extra pages to load in each list after the first
        #[arg(long, default_value_t = 0)]
        more: u32,
        /// Open the details page of this movie once the lists are loaded
        #[arg(long)]
        movie: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_format);

    let store = FileStore::open(&config.session_file).context("Failed to open session file")?;
    tracing::debug!(path = %store.path().display(), api = %config.api_url, "Starting client");

    let state = AppState::new(config, Session::new(store))?;

    match cli.command {
        Command::Login { username, password } => login(&state, username, password).await,
        Command::Logout => {
            state.auth.logout()?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            match state.session().user()? {
                Some(user) => println!("{} <{}>", user.display_name(), user.email),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Command::NowPlaying { page } => list_page(&state, MovieList::NowPlaying, page).await,
        Command::Popular { page } => list_page(&state, MovieList::Popular, page).await,
        Command::Actors { movie_id } => {
            require_route(&state, Route::Movie(movie_id))?;
            let actors = state.movies.actors(movie_id).await.map_err(login_hint)?;
            print_actors(&actors);
            Ok(())
        }
        Command::Browse { more, movie } => browse(&state, more, movie).await,
    }
}

async fn login(state: &AppState, username: String, password: String) -> anyhow::Result<()> {
    let mut view = LoginView::new();
    view.set_username(username);
    view.set_password(password);

    match view.submit(&state.auth).await {
        Some(route) => {
            let name = state
                .session()
                .user()?
                .map(|u| u.display_name())
                .unwrap_or_default();
            println!("Welcome, {}. Continue at {}.", name, route);
            Ok(())
        }
        None => anyhow::bail!(view.error().unwrap_or_default().to_string()),
    }
}

async fn list_page(state: &AppState, list: MovieList, page: u32) -> anyhow::Result<()> {
    require_route(state, Route::Home)?;
    let movies = state.movies.page(list, page).await.map_err(login_hint)?;
    println!("{} (page {})", list.title(), page);
    print_movies(&movies);
    Ok(())
}

async fn browse(state: &AppState, more: u32, open: Option<u64>) -> anyhow::Result<()> {
    let mut nav = Navigator::new(state.session().clone());
    if nav.navigate(Route::Home) != Route::Home {
        anyhow::bail!("Not logged in. Run `agile-movies login` first.");
    }

    let home = HomeView::open(&state.movies);
    println!("AgileMovies · {}", home.header_name());

    let (now_playing, popular) = home.load_initial().await;
    if now_playing.requires_login() || popular.requires_login() {
        nav.redirect_to_login();
        anyhow::bail!("Session expired. Run `agile-movies login` again.");
    }

    for _ in 0..more {
        // Advancing the carousel to its last slide and scrolling the grid to
        // the bottom are what request the next pages.
        let last_slide = home.now_playing().len().saturating_sub(1);
        let outcomes = [
            home.on_slide_changed(last_slide).await,
            home.on_scroll_bottom().await,
        ];
        if outcomes.iter().flatten().any(|o| o.requires_login()) {
            nav.redirect_to_login();
            anyhow::bail!("Session expired. Run `agile-movies login` again.");
        }
        if outcomes.iter().all(Option::is_none) {
            break;
        }
    }

    for loader in [home.now_playing(), home.popular()] {
        let list = loader.state();
        println!();
        println!("{} ({} loaded)", loader.list().title(), list.items.len());
        if let Some(error) = &list.error {
            println!("  ! {}", error);
        }
        print_movies(&list.items);
    }

    let Some(movie_id) = open else {
        return Ok(());
    };
    let selected = home
        .now_playing()
        .state()
        .items
        .into_iter()
        .chain(home.popular().state().items)
        .find(|m| m.id == movie_id);
    home.close();

    if let Some(movie) = selected {
        nav.open_movie(movie);
    } else {
        nav.navigate(Route::Movie(movie_id));
    }
    let Some(movie) = nav.take_movie() else {
        anyhow::bail!(MISSING_MOVIE_MESSAGE);
    };

    let mut details = MovieDetailsView::open(movie, &state.movies);
    if details.load_actors().await == LoadOutcome::RedirectToLogin {
        nav.redirect_to_login();
        anyhow::bail!("Session expired. Run `agile-movies login` again.");
    }

    let movie = details.movie();
    println!();
    println!("{} [{}]", movie.title, nav.current());
    println!("  {}", movie.poster_image);
    println!("  {}", movie.overview);
    match details.error() {
        Some(error) => println!("  ! {}", error),
        None => {
            println!("Reparto");
            print_actors(details.actors());
        }
    }
    Ok(())
}

/// Refuse to run a command whose page would be guarded away.
fn require_route(state: &AppState, route: Route) -> anyhow::Result<()> {
    if route.guard(state.session()) != route {
        anyhow::bail!("Not logged in. Run `agile-movies login` first.");
    }
    Ok(())
}

fn login_hint(e: agile_movies::error::ClientError) -> anyhow::Error {
    if e.requires_login() {
        anyhow::anyhow!("{}. Run `agile-movies login` again.", e)
    } else {
        e.into()
    }
}

fn print_movies(movies: &[Movie]) {
    for movie in movies {
        println!("  {:>8}  {}", movie.id, movie.title);
    }
}

fn print_actors(actors: &[Actor]) {
    for actor in actors {
        println!("  {:>8}  {}", actor.id, actor.name);
    }
}

/// Initialize logging: JSON for log collectors, compact text otherwise.
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
