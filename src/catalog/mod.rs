mod fetch;
mod model;

pub use fetch::{fetch_all_previews, fetch_show_detail};
pub use model::{Episode, GenreTag, Season, ShowDetail, ShowPreview};
