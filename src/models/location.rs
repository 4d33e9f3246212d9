//! The browser address bar, reduced to an ordered set of query parameters.

use super::MovieId;

/// Query parameter carrying the selected movie id
pub const MOVIE_PARAM: &str = "movie";
/// Query parameter carrying the search query
pub const QUERY_PARAM: &str = "q";
/// Query parameter carrying the base view (`mylist`)
pub const VIEW_PARAM: &str = "view";
/// Query parameter carrying the "show more" page limit
pub const LIMIT_PARAM: &str = "limit";

/// Path every catalog location points at
const CATALOG_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    params: Vec<(String, String)>,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded query pairs, keeping the first value of repeated keys
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut location = Self::new();
        for (key, value) in pairs {
            if location.get(&key).is_none() {
                location.params.push((key, value));
            }
        }
        location
    }

    /// Single value for `key`; repeated keys already collapsed on construction
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing any previous value in place
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// Raw movie id parameter, if any
    pub fn movie_param(&self) -> Option<&str> {
        self.get(MOVIE_PARAM)
    }

    pub fn set_movie_id(&mut self, id: MovieId) {
        self.set(MOVIE_PARAM, id.to_string());
    }

    pub fn clear_movie_id(&mut self) {
        self.remove(MOVIE_PARAM);
    }

    /// Encoded query string without the leading `?`
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Relative URL suitable for an `href`
    pub fn href(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            CATALOG_PATH.to_string()
        } else {
            format!("{}?{}", CATALOG_PATH, query)
        }
    }
}

/// Parse a movie id parameter; only positive integers count as a selection
pub fn parse_movie_id(raw: &str) -> Option<MovieId> {
    raw.trim().parse::<MovieId>().ok().filter(|id| *id > 0)
}
