pub mod catalog;
pub mod providers;
pub mod render_cycle;
pub mod watchlist;

pub use catalog::CatalogClient;
pub use providers::{MovieProvider, TmdbProvider};
pub use watchlist::{Watchlist, WatchlistStore};
