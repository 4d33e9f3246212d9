pub mod location;
pub mod movie;
pub mod view_state;

pub use location::Location;
pub use movie::{Genre, Movie, MovieId, TmdbListResponse};
pub use view_state::{ViewMode, ViewState};
