/// Public catalog client
///
/// Wraps a `MovieProvider` and applies one policy to every operation: validate
/// the input, call the provider at most once, and turn any failure into an
/// empty list or `None`. Callers never see an error from here.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId},
    services::providers::MovieProvider,
};

/// Shown once when the client runs without an API key
pub const MISSING_CREDENTIAL_NOTICE: &str =
    "TMDB_API_KEY is not configured, so no movie data can be loaded.";

pub struct CatalogClient {
    provider: Arc<dyn MovieProvider>,
    notice_pending: AtomicBool,
}

impl CatalogClient {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        let degraded = !provider.is_configured();
        if degraded {
            tracing::warn!(
                provider = provider.name(),
                "API key not configured - catalog will return empty results"
            );
        }

        Self {
            provider,
            notice_pending: AtomicBool::new(degraded),
        }
    }

    /// True when no credential is configured and every call returns empty
    pub fn is_degraded(&self) -> bool {
        !self.provider.is_configured()
    }

    /// The missing-credential notice, handed out only the first time it is asked for
    pub fn take_credential_notice(&self) -> Option<&'static str> {
        self.notice_pending
            .swap(false, Ordering::AcqRel)
            .then_some(MISSING_CREDENTIAL_NOTICE)
    }

    pub async fn search_movies(&self, query: &str) -> Vec<Movie> {
        let query = query.trim();
        if query.is_empty() || self.is_degraded() {
            return Vec::new();
        }
        let result = self.provider.search_movies(query).await;
        collapse_list("search_movies", result)
    }

    /// Details for `id`; zero means "no movie" and is answered without a request
    pub async fn get_movie_details(&self, id: MovieId) -> Option<Movie> {
        if id == 0 || self.is_degraded() {
            return None;
        }
        match self.provider.movie_details(id).await {
            Ok(movie) => Some(movie),
            Err(e) => {
                log_degraded("get_movie_details", &e);
                None
            }
        }
    }

    pub async fn get_recommendations(&self, id: MovieId) -> Vec<Movie> {
        if id == 0 || self.is_degraded() {
            return Vec::new();
        }
        let result = self.provider.recommendations(id).await;
        collapse_list("get_recommendations", result)
    }

    pub async fn get_trending(&self) -> Vec<Movie> {
        if self.is_degraded() {
            return Vec::new();
        }
        collapse_list("get_trending", self.provider.trending().await)
    }

    pub async fn get_popular(&self) -> Vec<Movie> {
        if self.is_degraded() {
            return Vec::new();
        }
        collapse_list("get_popular", self.provider.popular().await)
    }

    pub async fn get_top_rated(&self) -> Vec<Movie> {
        if self.is_degraded() {
            return Vec::new();
        }
        collapse_list("get_top_rated", self.provider.top_rated().await)
    }
}

fn collapse_list(operation: &'static str, result: AppResult<Vec<Movie>>) -> Vec<Movie> {
    result.unwrap_or_else(|e| {
        log_degraded(operation, &e);
        Vec::new()
    })
}

fn log_degraded(operation: &'static str, error: &AppError) {
    match error {
        // Already reported once at startup
        AppError::MissingCredential => {
            tracing::debug!(operation, "Skipped call without API key")
        }
        _ => tracing::warn!(operation, error = %error, "Catalog call degraded to empty result"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMovieProvider;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            release_date: None,
            vote_average: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            genres: Vec::new(),
        }
    }

    fn configured_mock() -> MockMovieProvider {
        let mut mock = MockMovieProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_name().return_const("mock");
        mock
    }

    #[tokio::test]
    async fn test_search_passes_trimmed_query() {
        let mut mock = configured_mock();
        mock.expect_search_movies().times(1).returning(|query| {
            assert_eq!(query, "Matrix");
            Ok(vec![movie(603, "The Matrix")])
        });

        let client = CatalogClient::new(Arc::new(mock));
        let results = client.search_movies("  Matrix ").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix");
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let mut mock = configured_mock();
        mock.expect_search_movies().times(0);

        let client = CatalogClient::new(Arc::new(mock));
        assert!(client.search_movies("").await.is_empty());
        assert!(client.search_movies("   ").await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_id_makes_no_request() {
        let mut mock = configured_mock();
        mock.expect_movie_details().times(0);
        mock.expect_recommendations().times(0);

        let client = CatalogClient::new(Arc::new(mock));
        assert_eq!(client.get_movie_details(0).await, None);
        assert!(client.get_recommendations(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_failures_collapse_to_empty() {
        let mut mock = configured_mock();
        mock.expect_search_movies()
            .returning(|_| Err(AppError::ExternalApi("status 500".to_string())));
        mock.expect_movie_details()
            .returning(|_| Err(AppError::Decode("bad json".to_string())));
        mock.expect_recommendations()
            .returning(|_| Err(AppError::NotFound("gone".to_string())));
        mock.expect_trending()
            .returning(|| Err(AppError::Internal("boom".to_string())));
        mock.expect_popular()
            .returning(|| Err(AppError::ExternalApi("status 401".to_string())));
        mock.expect_top_rated()
            .returning(|| Err(AppError::Decode("truncated".to_string())));

        let client = CatalogClient::new(Arc::new(mock));
        assert!(client.search_movies("matrix").await.is_empty());
        assert_eq!(client.get_movie_details(603).await, None);
        assert!(client.get_recommendations(603).await.is_empty());
        assert!(client.get_trending().await.is_empty());
        assert!(client.get_popular().await.is_empty());
        assert!(client.get_top_rated().await.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_never_called() {
        let mut mock = MockMovieProvider::new();
        mock.expect_is_configured().return_const(false);
        mock.expect_name().return_const("mock");
        mock.expect_search_movies().times(0);
        mock.expect_movie_details().times(0);
        mock.expect_recommendations().times(0);
        mock.expect_trending().times(0);
        mock.expect_popular().times(0);
        mock.expect_top_rated().times(0);

        let client = CatalogClient::new(Arc::new(mock));
        assert!(client.is_degraded());
        assert!(client.search_movies("matrix").await.is_empty());
        assert_eq!(client.get_movie_details(603).await, None);
        assert!(client.get_recommendations(603).await.is_empty());
        assert!(client.get_trending().await.is_empty());
        assert!(client.get_popular().await.is_empty());
        assert!(client.get_top_rated().await.is_empty());
    }

    #[test]
    fn test_credential_notice_is_given_once() {
        let mut mock = MockMovieProvider::new();
        mock.expect_is_configured().return_const(false);
        mock.expect_name().return_const("mock");

        let client = CatalogClient::new(Arc::new(mock));
        assert_eq!(
            client.take_credential_notice(),
            Some(MISSING_CREDENTIAL_NOTICE)
        );
        assert_eq!(client.take_credential_notice(), None);
    }

    #[test]
    fn test_no_notice_when_configured() {
        let client = CatalogClient::new(Arc::new(configured_mock()));
        assert_eq!(client.take_credential_notice(), None);
    }
}
