use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// TMDB movie identifier
pub type MovieId = u64;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "original";

/// Shown wherever the API gave no image path
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://www.themoviedb.org/assets/2/v4/logos/stacked-blue-2b2b2b9ef3c2a132.png";

/// A genre attached to a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// A movie as returned by the metadata API. Never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

impl Movie {
    /// A record is usable only with a real id and a title to show
    pub fn is_well_formed(&self) -> bool {
        self.id > 0 && !self.title.trim().is_empty()
    }

    /// Poster image URL (w500), or the placeholder
    pub fn poster_url(&self) -> String {
        image_url(self.poster_path.as_deref(), POSTER_SIZE)
    }

    /// Backdrop image URL (original size), or the placeholder
    pub fn backdrop_url(&self) -> String {
        image_url(self.backdrop_path.as_deref(), BACKDROP_SIZE)
    }

    /// Release year parsed from `YYYY-MM-DD`
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    /// Genre names joined for display
    pub fn genre_names(&self) -> Option<String> {
        if self.genres.is_empty() {
            return None;
        }
        Some(
            self.genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Join an API image path onto the sized image base URL
pub fn image_url(path: Option<&str>, size: &str) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) if path.starts_with('/') => format!("{}/{}{}", IMAGE_BASE_URL, size, path),
        Some(path) => format!("{}/{}/{}", IMAGE_BASE_URL, size, path),
        None => PLACEHOLDER_IMAGE_URL.to_string(),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// List payload shared by search, trending, popular, top-rated and recommendations
#[derive(Debug, Deserialize)]
pub struct TmdbListResponse {
    pub results: Vec<serde_json::Value>,
}

impl TmdbListResponse {
    /// Decode each entry independently, dropping the ones that are malformed
    pub fn into_movies(self) -> Vec<Movie> {
        self.results
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<Movie>(entry).ok())
            .filter(Movie::is_well_formed)
            .collect()
    }
}
