//! HTML views for the catalog
//!
//! Turns fetched catalog content into display models and renders them with
//! Askama. Every link on the page is produced by applying a `ViewState`
//! operation to a copy of the current state and location, so clicking it
//! replays that operation on the next request.

use askama::Template;

use crate::{
    models::{Location, Movie, MovieId, ViewMode, ViewState},
    services::render_cycle::{CatalogContent, CatalogRow, DetailPanel},
};

const NOT_AVAILABLE: &str = "N/A";
const NO_OVERVIEW: &str = "No description available.";

#[derive(Template)]
#[template(path = "catalog.html")]
pub struct CatalogPage {
    pub notice: Option<String>,
    pub search_query: String,
    pub home_href: String,
    pub my_list_href: String,
    pub my_list_active: bool,
    pub rows: Vec<RowView>,
    pub empty_message: Option<String>,
    pub overlay: Option<OverlayView>,
}

/// A labelled, horizontally scrolling row of cards
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub label: String,
    pub cards: Vec<CardView>,
    pub show_more_href: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: MovieId,
    pub title: String,
    pub caption: String,
    pub poster_url: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub id: MovieId,
    pub title: String,
    pub backdrop_url: String,
    pub poster_url: String,
    pub release_date: String,
    pub rating: String,
    pub genres: String,
    pub overview: String,
    pub in_watchlist: bool,
    /// Form target toggling watchlist membership
    pub watchlist_action: String,
    /// Where the watchlist form returns to
    pub return_to: String,
    pub close_href: String,
    pub recommendations: Vec<CardView>,
}

impl CatalogPage {
    pub fn build(
        content: CatalogContent,
        state: &ViewState,
        location: &Location,
        notice: Option<&str>,
    ) -> Self {
        let rows = content
            .rows
            .into_iter()
            .map(|row| RowView::build(row, state, location))
            .collect();

        let overlay = content
            .detail
            .map(|detail| OverlayView::build(detail, state, location));

        let mut home = (state.clone(), location.clone());
        home.0.switch_to_browse(&mut home.1);
        let mut my_list = (state.clone(), location.clone());
        my_list.0.switch_to_my_list(&mut my_list.1);

        Self {
            notice: notice.map(str::to_string),
            search_query: state.search_query().to_string(),
            home_href: home.1.href(),
            my_list_href: my_list.1.href(),
            my_list_active: state.base_mode() == ViewMode::MyList,
            rows,
            empty_message: content.empty_message.map(str::to_string),
            overlay,
        }
    }
}

impl RowView {
    pub fn build(row: CatalogRow, state: &ViewState, location: &Location) -> Self {
        let total = row.movies.len();
        let shown = if row.paginated {
            state.page_limit().min(total)
        } else {
            total
        };

        let show_more_href = (row.paginated && shown < total).then(|| {
            let mut next_state = state.clone();
            let mut next = location.clone();
            next_state.grow_page_limit(&mut next);
            next.href()
        });

        Self {
            label: row.label,
            cards: row
                .movies
                .iter()
                .take(shown)
                .map(|movie| CardView::build(movie, state, location))
                .collect(),
            show_more_href,
        }
    }
}

impl CardView {
    pub fn build(movie: &Movie, state: &ViewState, location: &Location) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            caption: caption(movie),
            poster_url: movie.poster_url(),
            href: select_href(movie.id, state, location),
        }
    }
}

impl OverlayView {
    pub fn build(detail: DetailPanel, state: &ViewState, location: &Location) -> Self {
        let DetailPanel {
            movie,
            recommendations,
            in_watchlist,
        } = detail;

        let mut closed_state = state.clone();
        let mut closed = location.clone();
        closed_state.clear_selection(&mut closed);

        let watchlist_action = if in_watchlist {
            format!("/watchlist/{}/remove", movie.id)
        } else {
            format!("/watchlist/{}", movie.id)
        };

        Self {
            id: movie.id,
            title: movie.title.clone(),
            backdrop_url: movie.backdrop_url(),
            poster_url: movie.poster_url(),
            release_date: movie
                .release_date
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            rating: rating(movie.vote_average),
            genres: movie
                .genre_names()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            overview: if movie.overview.trim().is_empty() {
                NO_OVERVIEW.to_string()
            } else {
                movie.overview.clone()
            },
            in_watchlist,
            watchlist_action,
            return_to: location.href(),
            close_href: closed.href(),
            recommendations: recommendations
                .iter()
                .map(|rec| CardView::build(rec, state, location))
                .collect(),
        }
    }
}

fn select_href(id: MovieId, state: &ViewState, location: &Location) -> String {
    let mut next_state = state.clone();
    let mut next = location.clone();
    next_state.select_movie(id, &mut next);
    next.href()
}

/// "Title (YYYY)", with N/A when the year is unknown
fn caption(movie: &Movie) -> String {
    match movie.release_year() {
        Some(year) => format!("{} ({})", movie.title, year),
        None => format!("{} ({})", movie.title, NOT_AVAILABLE),
    }
}

fn rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(score) => format!("{:.1}", score),
        None => NOT_AVAILABLE.to_string(),
    }
}
