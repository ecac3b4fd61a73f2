pub mod cancel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod genres;
pub mod http;
pub mod loader;
pub mod present;
pub mod progress;
pub mod query;
pub mod routes;

// Re-export main types for convenience
pub use cancel::{CancelToken, RequestSlot, RequestTicket};
pub use catalog::{
    Episode, GenreTag, Season, ShowDetail, ShowPreview, fetch_all_previews, fetch_show_detail,
};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::{CatalogError, FetchError, UnknownSortMode};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use loader::{LoadState, Loader};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use query::{GenreFilter, PageView, QueryState, QueryStore, SearchParams, SortMode, derive};
pub use routes::{History, Location, Route};
