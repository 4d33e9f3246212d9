/// Movie metadata provider abstraction
///
/// Providers report every failure as an `AppError` so callers and tests can
/// tell causes apart. Collapsing failures to empty results happens one level
/// up, in `CatalogClient`.
use crate::{
    error::AppResult,
    models::{Movie, MovieId},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search movies by title, first page, in relevance order
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Full details for a single movie, including genres
    async fn movie_details(&self, id: MovieId) -> AppResult<Movie>;

    /// Movies recommended alongside `id`
    async fn recommendations(&self, id: MovieId) -> AppResult<Vec<Movie>>;

    /// Today's trending movies
    async fn trending(&self) -> AppResult<Vec<Movie>>;

    async fn popular(&self) -> AppResult<Vec<Movie>>;

    async fn top_rated(&self) -> AppResult<Vec<Movie>>;

    /// Whether requests can be issued at all (a credential is configured)
    fn is_configured(&self) -> bool;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
