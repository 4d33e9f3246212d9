use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{Location, MovieId, ViewState},
    services::render_cycle::fetch_catalog,
    views::CatalogPage,
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistForm {
    #[serde(default)]
    pub return_to: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Render the catalog for whatever the address bar describes
pub async fn catalog_page(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let location = Location::from_pairs(params);
    let view = ViewState::from_location(&location);

    tracing::info!(
        mode = ?view.mode(),
        movie_id = ?view.selected_movie_id(),
        query = %view.search_query(),
        "Rendering catalog"
    );

    let watchlist = state.watchlist.read().await.ids().to_vec();
    let content = fetch_catalog(&state.catalog, &view, &watchlist).await;
    let notice = state.catalog.take_credential_notice();

    let page = CatalogPage::build(content, &view, &location, notice);
    Ok(Html(page.render()?))
}

/// Apply a submitted search and send the browser to the resulting location
pub async fn search(Query(params): Query<SearchParams>) -> Redirect {
    let mut view = ViewState::new();
    let mut location = Location::new();
    view.set_search_query(&params.q, &mut location);
    Redirect::to(&location.href())
}

/// Add a movie to the watchlist; it is on disk before the redirect goes out
pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Form(form): Form<WatchlistForm>,
) -> Redirect {
    let added = state.watchlist.write().await.add(id);
    tracing::info!(movie_id = id, added, "Watchlist add");
    Redirect::to(&safe_return_to(form.return_to.as_deref()))
}

/// Remove a movie from the watchlist
pub async fn remove_from_watchlist(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    Form(form): Form<WatchlistForm>,
) -> Redirect {
    let removed = state.watchlist.write().await.remove(id);
    tracing::info!(movie_id = id, removed, "Watchlist remove");
    Redirect::to(&safe_return_to(form.return_to.as_deref()))
}

/// Current watchlist ids, oldest first
pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<MovieId>> {
    Json(state.watchlist.read().await.ids().to_vec())
}

/// Only same-site relative paths are followed
fn safe_return_to(raw: Option<&str>) -> String {
    match raw {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
