use std::fmt;
use std::str::FromStr;

use crate::catalog::ShowPreview;
use crate::error::UnknownSortMode;
use crate::genres::genre_label;

use super::params::SearchParams;

pub const TERM_KEY: &str = "q";
pub const GENRE_KEY: &str = "genre";
pub const SORT_KEY: &str = "sort";
pub const PAGE_KEY: &str = "page";

/// First page; pages are numbered from one
pub const DEFAULT_PAGE: i64 = 1;

/// Literal used for the "every genre" filter
const ALL_GENRES: &str = "all";

/// Ordering applied to the filtered show list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Catalogue order
    #[default]
    Default,
    /// Title, A to Z
    Az,
    /// Title, Z to A
    Za,
    /// Most seasons first
    Seasons,
    /// Most recently updated first
    Updated,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Default,
        SortMode::Az,
        SortMode::Za,
        SortMode::Seasons,
        SortMode::Updated,
    ];

    /// Value used in the `sort` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Az => "az",
            Self::Za => "za",
            Self::Seasons => "seasons",
            Self::Updated => "updated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Az => "A–Z",
            Self::Za => "Z–A",
            Self::Seasons => "Most Seasons",
            Self::Updated => "Recently Updated",
        }
    }

    /// Lenient parse used for query parameters: anything unknown is `Default`
    pub fn from_param(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genre restriction applied to the show list
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(u32),
    /// A `genre` value that is not a genre id; it matches no show
    Unrecognized(String),
}

impl GenreFilter {
    pub fn from_param(value: &str) -> Self {
        if value == ALL_GENRES {
            return Self::All;
        }
        value
            .trim()
            .parse()
            .map(Self::Genre)
            .unwrap_or_else(|_| Self::Unrecognized(value.to_string()))
    }

    /// Value used in the `genre` query parameter
    pub fn to_param(&self) -> String {
        match self {
            Self::All => ALL_GENRES.to_string(),
            Self::Genre(id) => id.to_string(),
            Self::Unrecognized(raw) => raw.clone(),
        }
    }

    pub fn admits(&self, show: &ShowPreview) -> bool {
        match self {
            Self::All => true,
            Self::Genre(id) => show.has_genre(*id),
            Self::Unrecognized(_) => false,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "All Genres".to_string(),
            Self::Genre(id) => genre_label(*id),
            Self::Unrecognized(raw) => raw.clone(),
        }
    }
}

/// The user-controlled tuple that determines the visible show list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    /// Free-text search term
    pub term: String,
    pub genre: GenreFilter,
    pub sort: SortMode,
    /// Requested page, not yet clamped against the result size
    pub page: i64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            term: String::new(),
            genre: GenreFilter::All,
            sort: SortMode::Default,
            page: DEFAULT_PAGE,
        }
    }
}

impl QueryState {
    /// Read the state from query parameters; missing keys take their defaults
    pub fn from_params(params: &SearchParams) -> Self {
        Self {
            term: params.get(TERM_KEY).unwrap_or_default().to_string(),
            genre: params
                .get(GENRE_KEY)
                .map(GenreFilter::from_param)
                .unwrap_or_default(),
            sort: params
                .get(SORT_KEY)
                .map(SortMode::from_param)
                .unwrap_or_default(),
            page: params
                .get(PAGE_KEY)
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PAGE),
        }
    }

    /// Canonical parameter form: fields at their default are omitted
    pub fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::new();
        if !self.term.is_empty() {
            params.set(TERM_KEY, &self.term);
        }
        if self.genre != GenreFilter::All {
            params.set(GENRE_KEY, &self.genre.to_param());
        }
        if self.sort != SortMode::Default {
            params.set(SORT_KEY, self.sort.as_str());
        }
        if self.page != DEFAULT_PAGE {
            params.set(PAGE_KEY, &self.page.to_string());
        }
        params
    }
}
