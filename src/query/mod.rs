//! Search, genre, sort and page state, and the pipeline that turns it into
//! the visible page of shows.

mod params;
mod pipeline;
mod state;
mod store;

pub use params::SearchParams;
pub use pipeline::{PAGE_SIZE, PageView, clamp_page, derive, page_count, sort_shows};
pub use state::{
    DEFAULT_PAGE, GENRE_KEY, GenreFilter, PAGE_KEY, QueryState, SORT_KEY, SortMode, TERM_KEY,
};
pub use store::{ParamStore, QueryStore};
