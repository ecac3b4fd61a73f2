use tracing::debug;

use super::params::SearchParams;
use super::state::{
    DEFAULT_PAGE, GENRE_KEY, GenreFilter, PAGE_KEY, QueryState, SORT_KEY, SortMode, TERM_KEY,
};

/// Somewhere query parameters live, such as the current history entry
pub trait ParamStore {
    /// Current parameters
    fn params(&self) -> SearchParams;

    /// Replace the current parameters without creating a new history entry
    fn replace_params(&mut self, params: SearchParams);
}

impl ParamStore for SearchParams {
    fn params(&self) -> SearchParams {
        self.clone()
    }

    fn replace_params(&mut self, params: SearchParams) {
        *self = params;
    }
}

/// Reads and updates the query state kept in a [`ParamStore`].
///
/// Writes keep the parameters canonical: a value equal to its default is
/// removed rather than stored, and changing anything other than the page
/// drops the page so the list starts again from the top.
#[derive(Debug, Clone, Default)]
pub struct QueryStore<S> {
    store: S,
}

impl<S: ParamStore> QueryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn state(&self) -> QueryState {
        QueryState::from_params(&self.store.params())
    }

    pub fn params(&self) -> SearchParams {
        self.store.params()
    }

    /// Set or clear a single parameter
    pub fn update(&mut self, key: &str, value: Option<&str>) {
        let mut params = self.store.params();

        match value {
            Some(value) if !is_default(key, value) => params.set(key, value),
            _ => params.remove(key),
        }
        if key != PAGE_KEY {
            params.remove(PAGE_KEY);
        }

        debug!(key, value = ?value, params = %params, "query parameter updated");
        self.store.replace_params(params);
    }

    pub fn set_term(&mut self, term: &str) {
        self.update(TERM_KEY, Some(term));
    }

    pub fn set_genre(&mut self, genre: &GenreFilter) {
        self.update(GENRE_KEY, Some(&genre.to_param()));
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.update(SORT_KEY, Some(sort.as_str()));
    }

    pub fn set_page(&mut self, page: i64) {
        self.update(PAGE_KEY, Some(&page.to_string()));
    }

    /// Move one page forward unless already on the last of `total_pages`
    pub fn next_page(&mut self, current: u32, total_pages: u32) -> bool {
        if current >= total_pages {
            return false;
        }
        self.set_page(i64::from(current) + 1);
        true
    }

    /// Move one page back unless already on the first page
    pub fn prev_page(&mut self, current: u32) -> bool {
        if current <= 1 {
            return false;
        }
        self.set_page(i64::from(current) - 1);
        true
    }

    pub fn get_ref(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Whether `value` is what an absent `key` would mean anyway
fn is_default(key: &str, value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match key {
        GENRE_KEY => GenreFilter::from_param(value) == GenreFilter::All,
        SORT_KEY => value == SortMode::Default.as_str(),
        PAGE_KEY => value
            .trim()
            .parse::<i64>()
            .is_ok_and(|page| page == DEFAULT_PAGE),
        _ => false,
    }
}
