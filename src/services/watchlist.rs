/// Persisted personal watchlist
///
/// The store is a JSON array of movie ids at a fixed path, rewritten wholesale
/// on every change. Reads fall back to an empty list and failed writes are
/// logged and dropped; the watchlist is never a reason to fail a request.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{error::AppResult, models::MovieId};

/// File-backed store for the watchlist ids
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored ids; missing, unreadable or corrupt files give an empty list
    pub fn load(&self) -> Vec<MovieId> {
        match self.try_load() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Watchlist store unreadable, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Rewrite the store with `ids`; errors are logged, never returned
    pub fn save(&self, ids: &[MovieId]) {
        if let Err(e) = self.try_save(ids) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to persist watchlist"
            );
        }
    }

    fn try_load(&self) -> AppResult<Vec<MovieId>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let stored: Vec<MovieId> = serde_json::from_str(&raw)?;

        let mut seen = HashSet::new();
        Ok(stored
            .into_iter()
            .filter(|id| *id > 0 && seen.insert(*id))
            .collect())
    }

    /// Temp file + rename so a crash mid-write leaves the old file intact
    fn try_save(&self, ids: &[MovieId]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec_pretty(ids)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, payload)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = ids.len(), "Watchlist saved");
        Ok(())
    }
}

/// In-memory watchlist kept in step with its store
#[derive(Debug)]
pub struct Watchlist {
    ids: Vec<MovieId>,
    store: WatchlistStore,
}

impl Watchlist {
    /// Load the list once from `store`
    pub fn load(store: WatchlistStore) -> Self {
        let ids = store.load();
        tracing::info!(
            path = %store.path().display(),
            count = ids.len(),
            "Watchlist loaded"
        );
        Self { ids, store }
    }

    /// Ids in insertion order, oldest first
    pub fn ids(&self) -> &[MovieId] {
        &self.ids
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    /// Append `id` and persist; returns false when it was already present
    pub fn add(&mut self, id: MovieId) -> bool {
        if id == 0 || self.contains(id) {
            return false;
        }
        self.ids.push(id);
        self.store.save(&self.ids);
        true
    }

    /// Drop `id` and persist
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.store.save(&self.ids);
        self.ids.len() != before
    }
}
