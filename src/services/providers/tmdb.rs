/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Lists: /search/movie, /trending/movie/day, /movie/popular, /movie/top_rated,
///    /movie/{id}/recommendations → `{"results": [...]}`
/// 2. Details: /movie/{id} → flat movie object with genres
///
/// Every request carries `api_key` and `language=en-US`. Without a key no
/// request is sent at all.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Movie, MovieId, TmdbListResponse},
    services::providers::MovieProvider,
};

const LANGUAGE: &str = "en-US";
const FIRST_PAGE: &str = "1";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    /// Requests actually dispatched to the network
    requests_sent: Arc<AtomicUsize>,
}

impl TmdbProvider {
    /// Creates a provider; a `None` or blank key yields one that never hits the network
    pub fn new(api_key: Option<String>, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            requests_sent: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_key().map(str::to_string),
            config.tmdb_api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Number of HTTP requests sent so far
    pub fn requests_sent(&self) -> usize {
        self.requests_sent.load(Ordering::Relaxed)
    }

    /// GET `path` with the credential and language attached, decoding the JSON body
    async fn get_json<T>(&self, path: &str, params: &[(&str, &str)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingCredential)?;
        let url = format!("{}{}", self.api_url, path);

        let mut query: Vec<(&str, &str)> = vec![("api_key", api_key), ("language", LANGUAGE)];
        query.extend_from_slice(params);

        self.requests_sent.fetch_add(1, Ordering::Relaxed);
        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB API {} returned status {}",
                path, status
            )));
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::debug!(path = %path, error = %e, "Failed to deserialize TMDB response");
            AppError::Decode(format!("Failed to parse TMDB response from {}: {}", path, e))
        })
    }

    async fn get_list(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Vec<Movie>> {
        let response: TmdbListResponse = self.get_json(path, params).await?;
        let movies = response.into_movies();

        tracing::debug!(
            path = %path,
            results = movies.len(),
            provider = "tmdb",
            "List fetched"
        );

        Ok(movies)
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let movies = self
            .get_list(
                "/search/movie",
                &[
                    ("query", query),
                    ("page", FIRST_PAGE),
                    ("include_adult", "false"),
                ],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<Movie> {
        if id == 0 {
            return Err(AppError::InvalidInput("Movie id must be positive".to_string()));
        }

        let movie: Movie = self.get_json(&format!("/movie/{}", id), &[]).await?;
        if !movie.is_well_formed() {
            return Err(AppError::Decode(format!(
                "TMDB details for movie {} lack an id or title",
                id
            )));
        }

        Ok(movie)
    }

    async fn recommendations(&self, id: MovieId) -> AppResult<Vec<Movie>> {
        if id == 0 {
            return Err(AppError::InvalidInput("Movie id must be positive".to_string()));
        }

        self.get_list(
            &format!("/movie/{}/recommendations", id),
            &[("page", FIRST_PAGE)],
        )
        .await
    }

    async fn trending(&self) -> AppResult<Vec<Movie>> {
        self.get_list("/trending/movie/day", &[]).await
    }

    async fn popular(&self) -> AppResult<Vec<Movie>> {
        self.get_list("/movie/popular", &[("page", FIRST_PAGE)]).await
    }

    async fn top_rated(&self) -> AppResult<Vec<Movie>> {
        self.get_list("/movie/top_rated", &[("page", FIRST_PAGE)])
            .await
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
