/// One render cycle: decide what the current view needs and fetch it
///
/// The result is plain data in a fixed order. Browse rows are fetched
/// concurrently but always come back as Trending, Popular, Top Rated.
use crate::{
    models::{Movie, MovieId, ViewMode, ViewState},
    services::catalog::CatalogClient,
};

/// Recommendations shown under the detail overlay
pub const MAX_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub label: String,
    pub movies: Vec<Movie>,
    /// Whether the row honours the page limit and offers "show more"
    pub paginated: bool,
}

impl CatalogRow {
    fn new(label: impl Into<String>, movies: Vec<Movie>) -> Self {
        Self {
            label: label.into(),
            movies,
            paginated: false,
        }
    }

    fn paginated(mut self) -> Self {
        self.paginated = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub movie: Movie,
    pub recommendations: Vec<Movie>,
    pub in_watchlist: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogContent {
    pub rows: Vec<CatalogRow>,
    pub detail: Option<DetailPanel>,
    /// Shown instead of rows when there is nothing to list
    pub empty_message: Option<&'static str>,
}

/// Fetch everything the current view state needs
pub async fn fetch_catalog(
    client: &CatalogClient,
    state: &ViewState,
    watchlist: &[MovieId],
) -> CatalogContent {
    let (rows, empty_message) = match state.base_mode() {
        ViewMode::Search => search_rows(client, state.search_query()).await,
        ViewMode::MyList => my_list_rows(client, watchlist).await,
        ViewMode::Browse | ViewMode::Detail => (browse_rows(client).await, None),
    };

    let detail = match state.selected_movie_id() {
        Some(id) => detail_panel(client, id, watchlist).await,
        None => None,
    };

    CatalogContent {
        rows,
        detail,
        empty_message,
    }
}

async fn browse_rows(client: &CatalogClient) -> Vec<CatalogRow> {
    let (trending, popular, top_rated) = tokio::join!(
        client.get_trending(),
        client.get_popular(),
        client.get_top_rated()
    );

    vec![
        CatalogRow::new("Trending Now", trending),
        CatalogRow::new("Popular", popular),
        CatalogRow::new("Top Rated", top_rated),
    ]
}

async fn search_rows(
    client: &CatalogClient,
    query: &str,
) -> (Vec<CatalogRow>, Option<&'static str>) {
    let results = client.search_movies(query).await;
    if results.is_empty() {
        return (Vec::new(), Some("No movies found."));
    }

    let label = format!("Results for \u{201c}{}\u{201d}", query);
    (vec![CatalogRow::new(label, results).paginated()], None)
}

async fn my_list_rows(
    client: &CatalogClient,
    watchlist: &[MovieId],
) -> (Vec<CatalogRow>, Option<&'static str>) {
    if watchlist.is_empty() {
        return (Vec::new(), Some("Your list is empty."));
    }

    // Sequential so the row keeps insertion order
    let mut movies = Vec::with_capacity(watchlist.len());
    for id in watchlist {
        match client.get_movie_details(*id).await {
            Some(movie) => movies.push(movie),
            None => tracing::debug!(movie_id = *id, "Skipping watchlist entry without details"),
        }
    }

    (vec![CatalogRow::new("My List", movies)], None)
}

async fn detail_panel(
    client: &CatalogClient,
    id: MovieId,
    watchlist: &[MovieId],
) -> Option<DetailPanel> {
    let (movie, mut recommendations) =
        tokio::join!(client.get_movie_details(id), client.get_recommendations(id));

    let movie = movie?;
    recommendations.truncate(MAX_RECOMMENDATIONS);

    Some(DetailPanel {
        movie,
        recommendations,
        in_watchlist: watchlist.contains(&id),
    })
}
