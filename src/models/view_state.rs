//! Navigation state for one browsing session.
//!
//! The address bar is the source of truth for the detail overlay: the selected
//! movie is always re-read from the location, and the location's movie
//! parameter is only written when the user explicitly selects or closes a
//! movie. The remaining parameters (`q`, `view`, `limit`) carry the base mode
//! between requests so the server keeps no per-session storage.

use serde::Serialize;

use super::location::{parse_movie_id, Location, LIMIT_PARAM, QUERY_PARAM, VIEW_PARAM};
use super::MovieId;

/// Smallest number of cards shown in a paginated row
pub const MIN_PAGE_LIMIT: usize = 5;
/// How many more cards "show more" reveals
pub const PAGE_LIMIT_STEP: usize = 5;

const VIEW_MY_LIST: &str = "mylist";
const VIEW_BROWSE: &str = "browse";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Browse,
    Search,
    Detail,
    MyList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    /// Mode to return to when the overlay closes; never `Detail`
    base_mode: ViewMode,
    selected_movie_id: Option<MovieId>,
    search_query: String,
    page_limit: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Fresh session state in Browse mode
    pub fn new() -> Self {
        Self {
            mode: ViewMode::Browse,
            base_mode: ViewMode::Browse,
            selected_movie_id: None,
            search_query: String::new(),
            page_limit: MIN_PAGE_LIMIT,
        }
    }

    /// Restore a session from the location it was last written to
    pub fn from_location(location: &Location) -> Self {
        let search_query = location
            .get(QUERY_PARAM)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let base_mode = match location.get(VIEW_PARAM) {
            Some(VIEW_MY_LIST) => ViewMode::MyList,
            Some(VIEW_BROWSE) => ViewMode::Browse,
            _ if !search_query.is_empty() => ViewMode::Search,
            _ => ViewMode::Browse,
        };

        let page_limit = location
            .get(LIMIT_PARAM)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map_or(MIN_PAGE_LIMIT, |limit| limit.max(MIN_PAGE_LIMIT));

        let mut state = Self {
            mode: base_mode,
            base_mode,
            selected_movie_id: None,
            search_query,
            page_limit,
        };
        state.reconcile_from_location(location);
        state
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The mode shown underneath the overlay, or the current mode when none is open
    pub fn base_mode(&self) -> ViewMode {
        self.base_mode
    }

    pub fn selected_movie_id(&self) -> Option<MovieId> {
        self.selected_movie_id
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn page_limit(&self) -> usize {
        self.page_limit
    }

    /// Overwrite the selection from the location's movie parameter.
    ///
    /// A positive integer opens the overlay; anything else closes it and
    /// falls back to the base mode, which is how back-navigation closes it.
    pub fn reconcile_from_location(&mut self, location: &Location) {
        match location.movie_param().and_then(parse_movie_id) {
            Some(id) => self.enter_detail(id),
            None => {
                if let Some(raw) = location.movie_param() {
                    tracing::debug!(movie_param = %raw, "Ignoring unparsable movie parameter");
                }
                self.leave_detail();
            }
        }
    }

    /// Open the overlay for `id` and record it in the location
    pub fn select_movie(&mut self, id: MovieId, location: &mut Location) {
        if id == 0 {
            return;
        }
        self.enter_detail(id);
        location.set_movie_id(id);
    }

    /// Close the overlay and drop the movie parameter from the location
    pub fn clear_selection(&mut self, location: &mut Location) {
        self.leave_detail();
        location.clear_movie_id();
    }

    /// Store the trimmed query; non-blank means Search, blank means Browse
    pub fn set_search_query(&mut self, query: &str, location: &mut Location) {
        let query = query.trim();
        if query != self.search_query {
            self.page_limit = MIN_PAGE_LIMIT;
            location.remove(LIMIT_PARAM);
        }
        self.search_query = query.to_string();

        let mode = if query.is_empty() {
            ViewMode::Browse
        } else {
            ViewMode::Search
        };
        self.switch_base(mode, location);

        if query.is_empty() {
            location.remove(QUERY_PARAM);
        } else {
            location.set(QUERY_PARAM, query);
        }
        location.remove(VIEW_PARAM);
    }

    pub fn switch_to_my_list(&mut self, location: &mut Location) {
        self.switch_base(ViewMode::MyList, location);
        location.set(VIEW_PARAM, VIEW_MY_LIST);
    }

    /// Go to the browse rows; a stored query is kept but not shown
    pub fn switch_to_browse(&mut self, location: &mut Location) {
        self.switch_base(ViewMode::Browse, location);
        if self.search_query.is_empty() {
            location.remove(VIEW_PARAM);
        } else {
            location.set(VIEW_PARAM, VIEW_BROWSE);
        }
    }

    /// Reveal another step of already-fetched results
    pub fn grow_page_limit(&mut self, location: &mut Location) {
        self.page_limit += PAGE_LIMIT_STEP;
        location.set(LIMIT_PARAM, self.page_limit.to_string());
    }

    fn enter_detail(&mut self, id: MovieId) {
        if self.mode != ViewMode::Detail {
            self.base_mode = self.mode;
        }
        self.mode = ViewMode::Detail;
        self.selected_movie_id = Some(id);
    }

    fn leave_detail(&mut self) {
        self.selected_movie_id = None;
        if self.mode == ViewMode::Detail {
            self.mode = self.base_mode;
        }
    }

    fn switch_base(&mut self, mode: ViewMode, location: &mut Location) {
        self.base_mode = mode;
        self.mode = mode;
        self.selected_movie_id = None;
        location.clear_movie_id();
    }
}
