//! Read-only fixture server for the explorer API.
//!
//! Serves the same routes as the public demo API plus a reverse-geocode
//! endpoint, from deterministic in-memory data. Every request is counted per
//! path so tests can assert how many round trips a client made.

pub mod fixtures;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub use fixtures::{Album, Comment, Fixtures, Post, Todo, User};

/// Reverse-geocode answer; only the country code is modelled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Geocode {
    pub country_code: String,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    data: Arc<Fixtures>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far for `path` (without query string).
    pub fn hits(&self, path: &str) -> usize {
        let hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);
        hits.get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        let hits = self.hits.lock().unwrap_or_else(PoisonError::into_inner);
        hits.values().sum()
    }

    pub fn data(&self) -> &Fixtures {
        &self.data
    }
}

pub fn app() -> Router {
    app_with_state(AppState::new())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/todos", get(list_todos))
        .route("/albums", get(list_albums))
        .route("/comments", get(list_comments))
        .route("/geocode/{coords}", get(geocode))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app_with_state(state)).await
}

async fn count_hits(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    {
        let mut hits = state.hits.lock().unwrap_or_else(PoisonError::into_inner);
        *hits.entry(path.clone()).or_default() += 1;
    }
    debug!(%path, "request counted");
    next.run(request).await
}

async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.data.posts.clone())
}

async fn get_post(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<Post>, StatusCode> {
    state
        .data
        .posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.data.users.clone())
}

async fn get_user(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<User>, StatusCode> {
    state
        .data
        .users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.data.todos.clone())
}

async fn list_albums(State(state): State<AppState>) -> Json<Vec<Album>> {
    Json(state.data.albums.clone())
}

async fn list_comments(State(state): State<AppState>) -> Json<Vec<Comment>> {
    Json(state.data.comments.clone())
}

/// `{lat},{lng}` to a country by hemisphere quadrant.
async fn geocode(Path(coords): Path<String>) -> Result<Json<Geocode>, StatusCode> {
    let (lat, lng) = parse_coords(&coords).ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    Ok(Json(Geocode {
        country_code: country_for(lat, lng).to_string(),
    }))
}

fn parse_coords(coords: &str) -> Option<(f64, f64)> {
    let (lat, lng) = coords.split_once(',')?;
    Some((lat.trim().parse().ok()?, lng.trim().parse().ok()?))
}

pub fn country_for(lat: f64, lng: f64) -> &'static str {
    match (lat >= 0.0, lng >= 0.0) {
        (true, false) => "US",
        (true, true) => "DE",
        (false, true) => "AU",
        (false, false) => "BR",
    }
}
