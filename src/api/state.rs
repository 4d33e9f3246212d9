use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        catalog::CatalogClient,
        providers::TmdbProvider,
        watchlist::{Watchlist, WatchlistStore},
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    /// The only mutable state shared between requests
    pub watchlist: Arc<RwLock<Watchlist>>,
}

impl AppState {
    pub fn new(catalog: CatalogClient, watchlist: Watchlist) -> Self {
        Self {
            catalog: Arc::new(catalog),
            watchlist: Arc::new(RwLock::new(watchlist)),
        }
    }

    /// Builds the TMDB-backed client and loads the watchlist once
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let provider = TmdbProvider::from_config(config)?;
        let catalog = CatalogClient::new(Arc::new(provider));
        let watchlist = Watchlist::load(WatchlistStore::new(config.watchlist_path.clone()));
        Ok(Self::new(catalog, watchlist))
    }
}
