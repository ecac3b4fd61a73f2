// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::{Ordering, Reverse};

use tracing::trace;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::catalog::ShowPreview;

use super::state::{QueryState, SortMode};

/// Number of shows on one page
pub const PAGE_SIZE: usize = 12;

/// One page of the filtered, sorted show list
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Shows on the current page, in display order
    pub visible: Vec<&'a ShowPreview>,
    /// Current page after clamping, starting at 1
    pub page: u32,
    /// Number of pages, never less than 1
    pub total_pages: u32,
    /// Number of shows that passed the filters
    pub total_matches: usize,
}

impl PageView<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Derive the visible page from the full show list and the query state.
///
/// Filters by term, then by genre, sorts the survivors and slices out the
/// requested page. An out-of-range page is clamped, never rejected.
pub fn derive<'a>(shows: &'a [ShowPreview], state: &QueryState) -> PageView<'a> {
    let needle = state.term.to_lowercase();

    let mut matches: Vec<&ShowPreview> = shows
        .iter()
        .filter(|show| matches_term(show, &needle))
        .filter(|show| state.genre.admits(show))
        .collect();

    sort_shows(&mut matches, state.sort);

    let total_matches = matches.len();
    let total_pages = page_count(total_matches);
    let page = clamp_page(state.page, total_pages);

    let start = (page as usize - 1) * PAGE_SIZE;
    let visible: Vec<_> = matches.into_iter().skip(start).take(PAGE_SIZE).collect();

    trace!(
        total = shows.len(),
        total_matches,
        page,
        total_pages,
        "derived page"
    );

    PageView {
        visible,
        page,
        total_pages,
        total_matches,
    }
}

/// Case-insensitive substring match on title or description
fn matches_term(show: &ShowPreview, needle: &str) -> bool {
    needle.is_empty()
        || show.title.to_lowercase().contains(needle)
        || show.description.to_lowercase().contains(needle)
}

/// Stable in-place sort; ties keep their relative order
pub fn sort_shows(shows: &mut [&ShowPreview], mode: SortMode) {
    match mode {
        SortMode::Default => {}
        SortMode::Az => shows.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortMode::Za => shows.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        SortMode::Seasons => shows.sort_by_key(|show| Reverse(show.season_count())),
        SortMode::Updated => shows.sort_by_key(|show| Reverse(show.updated)),
    }
}

/// Dictionary order for titles.
///
/// Letters compare without accents or case first, so "Économie" sits between
/// "Apple" and "Zebra". Remaining ties go unaccented before accented, then
/// lowercase before uppercase, then by the exact text.
fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| upper_positions(a).cmp(upper_positions(b)))
        .then_with(|| a.cmp(b))
}

/// Title with accents stripped and case folded
fn base_letters(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn upper_positions(title: &str) -> impl Iterator<Item = bool> + '_ {
    title.chars().map(char::is_uppercase)
}

/// Pages needed for `count` shows; an empty result still has one page
pub fn page_count(count: usize) -> u32 {
    count.div_ceil(PAGE_SIZE).max(1) as u32
}

/// Force a requested page into `1..=total_pages`
pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    requested.clamp(1, i64::from(total_pages.max(1))) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, TimeZone, Utc};

    use crate::query::state::GenreFilter;

    fn ts(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap())
    }

    fn show(id: usize, title: &str) -> ShowPreview {
        ShowPreview {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            image: String::new(),
            genres: vec![],
            seasons: None,
            updated: ts(1),
        }
    }

    fn numbered(count: usize) -> Vec<ShowPreview> {
        (1..=count).map(|i| show(i, &format!("Show {}", i))).collect()
    }

    fn ids(view: &PageView<'_>) -> Vec<String> {
        view.visible.iter().map(|s| s.id.clone()).collect()
    }

    fn titles<'a>(view: &PageView<'a>) -> Vec<&'a str> {
        view.visible.iter().map(|s| s.title.as_str()).collect()
    }

    fn with_page(page: i64) -> QueryState {
        QueryState {
            page,
            ..Default::default()
        }
    }

    #[test]
    fn fifteen_shows_span_two_pages() {
        let shows = numbered(15);

        let first = derive(&shows, &with_page(1));
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.page, 1);
        assert_eq!(ids(&first), (1..=12).map(|i| i.to_string()).collect::<Vec<_>>());
        assert!(!first.has_previous());
        assert!(first.has_next());

        let second = derive(&shows, &with_page(2));
        assert_eq!(second.page, 2);
        assert_eq!(ids(&second), vec!["13", "14", "15"]);
        assert!(second.has_previous());
        assert!(!second.has_next());
    }

    #[test]
    fn unfiltered_state_returns_full_collection() {
        let shows = numbered(5);
        let view = derive(&shows, &QueryState::default());

        assert_eq!(view.total_matches, 5);
        assert_eq!(view.visible.len(), 5);
        assert_eq!(ids(&view), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let shows = numbered(30);

        let cases = [
            (0, 1),
            (-5, 1),
            (i64::MIN, 1),
            (3, 3),
            (4, 3),
            (i64::MAX, 3),
        ];
        for (requested, expected) in cases {
            let view = derive(&shows, &with_page(requested));
            assert_eq!(view.total_pages, 3);
            assert_eq!(view.page, expected, "requested {}", requested);
        }

        assert_eq!(ids(&derive(&shows, &with_page(99))), vec![
            "25", "26", "27", "28", "29", "30"
        ]);
    }

    #[test]
    fn no_matches_gives_single_empty_page() {
        let shows = vec![show(1, "Alpha"), show(2, "Beta")];
        let state = QueryState {
            term: "cast".to_string(),
            page: 4,
            ..Default::default()
        };

        let view = derive(&shows, &state);
        assert!(view.visible.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_matches, 0);
    }

    #[test]
    fn empty_collection_gives_single_empty_page() {
        let view = derive(&[], &QueryState::default());
        assert!(view.visible.is_empty());
        assert_eq!((view.page, view.total_pages), (1, 1));
    }

    #[test]
    fn term_matches_title_or_description_ignoring_case() {
        let mut described = show(2, "Weekly Roundup");
        described.description = "A PODCAST about history".to_string();
        let shows = vec![show(1, "The History Hour"), described, show(3, "Comedy Bang")];

        let state = QueryState {
            term: "hIsToRy".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&derive(&shows, &state)), vec!["1", "2"]);
    }

    #[test]
    fn genre_filter_keeps_members_only() {
        let mut a = show(1, "A");
        a.genres = vec![1, 3];
        let mut b = show(2, "B");
        b.genres = vec![2];
        let c = show(3, "C");
        let shows = vec![a, b, c];

        let state = QueryState {
            genre: GenreFilter::Genre(3),
            ..Default::default()
        };
        assert_eq!(ids(&derive(&shows, &state)), vec!["1"]);

        let state = QueryState {
            genre: GenreFilter::Unrecognized("comedy".to_string()),
            ..Default::default()
        };
        assert!(derive(&shows, &state).visible.is_empty());
    }

    #[test]
    fn za_sorts_titles_descending() {
        let shows = vec![show(1, "Alpha"), show(2, "Zulu"), show(3, "Mango")];
        let state = QueryState {
            sort: SortMode::Za,
            ..Default::default()
        };
        assert_eq!(titles(&derive(&shows, &state)), vec!["Zulu", "Mango", "Alpha"]);
    }

    #[test]
    fn az_ignores_case() {
        let shows = vec![show(1, "banana"), show(2, "Apple"), show(3, "cherry")];
        let state = QueryState {
            sort: SortMode::Az,
            ..Default::default()
        };
        assert_eq!(titles(&derive(&shows, &state)), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn az_places_accented_titles_by_their_base_letter() {
        let shows = vec![
            show(1, "Zebra Talk"),
            show(2, "Économie Today"),
            show(3, "Apple Pie"),
            show(4, "ecology"),
        ];
        let state = QueryState {
            sort: SortMode::Az,
            ..Default::default()
        };
        assert_eq!(
            titles(&derive(&shows, &state)),
            vec!["Apple Pie", "ecology", "Économie Today", "Zebra Talk"]
        );

        let state = QueryState {
            sort: SortMode::Za,
            ..state
        };
        assert_eq!(
            titles(&derive(&shows, &state)),
            vec!["Zebra Talk", "Économie Today", "ecology", "Apple Pie"]
        );
    }

    #[test]
    fn title_ties_put_plain_and_lowercase_first() {
        let shows = vec![show(1, "Apple"), show(2, "Café"), show(3, "apple"), show(4, "cafe")];
        let state = QueryState {
            sort: SortMode::Az,
            ..Default::default()
        };
        assert_eq!(
            titles(&derive(&shows, &state)),
            vec!["apple", "Apple", "cafe", "Café"]
        );
    }

    #[test]
    fn updated_sort_puts_undated_shows_last() {
        let mut a = show(1, "A");
        a.updated = None;
        let mut b = show(2, "B");
        b.updated = ts(5);
        let shows = vec![a, b, show(3, "C")];

        let state = QueryState {
            sort: SortMode::Updated,
            ..Default::default()
        };
        assert_eq!(ids(&derive(&shows, &state)), vec!["2", "3", "1"]);
    }

    #[test]
    fn seasons_sort_descending_with_missing_as_zero() {
        let mut a = show(1, "A");
        a.seasons = Some(2);
        let b = show(2, "B");
        let mut c = show(3, "C");
        c.seasons = Some(7);
        let d = show(4, "D");
        let shows = vec![a, b, c, d];

        let state = QueryState {
            sort: SortMode::Seasons,
            ..Default::default()
        };
        assert_eq!(ids(&derive(&shows, &state)), vec!["3", "1", "2", "4"]);
    }

    #[test]
    fn seasons_sort_without_counts_keeps_catalogue_order() {
        let shows = numbered(4);
        let state = QueryState {
            sort: SortMode::Seasons,
            ..Default::default()
        };
        assert_eq!(ids(&derive(&shows, &state)), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn updated_sort_is_newest_first_and_stable() {
        let mut a = show(1, "A");
        a.updated = ts(3);
        let mut b = show(2, "B");
        b.updated = ts(9);
        let mut c = show(3, "C");
        c.updated = ts(3);
        let shows = vec![a, b, c];

        let state = QueryState {
            sort: SortMode::Updated,
            ..Default::default()
        };
        assert_eq!(ids(&derive(&shows, &state)), vec!["2", "1", "3"]);
    }

    #[test]
    fn pagination_runs_on_the_filtered_sorted_list() {
        // 13 matching shows interleaved with 13 non-matching ones
        let shows: Vec<_> = (1..=26)
            .map(|i| {
                let title = if i % 2 == 0 {
                    format!("Match {:02}", i)
                } else {
                    format!("Other {:02}", i)
                };
                let mut s = show(i, &title);
                s.updated = ts((i % 28) as u32 + 1);
                s
            })
            .collect();

        let state = QueryState {
            term: "match".to_string(),
            sort: SortMode::Updated,
            page: 2,
            ..Default::default()
        };
        let view = derive(&shows, &state);

        assert_eq!(view.total_matches, 13);
        assert_eq!(view.total_pages, 2);
        // Oldest matching show lands alone on the second page
        assert_eq!(ids(&view), vec!["2"]);

        // Paginating the raw collection before filtering would pick different shows
        let mut raw_page: Vec<&ShowPreview> =
            shows.iter().skip(PAGE_SIZE).take(PAGE_SIZE).collect();
        raw_page.retain(|s| s.title.starts_with("Match"));
        sort_shows(&mut raw_page, SortMode::Updated);
        assert_ne!(
            raw_page.iter().map(|s| s.id.clone()).collect::<Vec<_>>(),
            ids(&view)
        );
    }

    #[test]
    fn derive_is_idempotent() {
        let mut shows = numbered(20);
        shows[3].updated = ts(20);
        shows[9].updated = ts(15);
        let state = QueryState {
            term: "show 1".to_string(),
            sort: SortMode::Updated,
            page: 1,
            ..Default::default()
        };

        assert_eq!(derive(&shows, &state), derive(&shows, &state));
    }

    #[test]
    fn page_helpers() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(12), 1);
        assert_eq!(page_count(13), 2);
        assert_eq!(clamp_page(0, 0), 1);
        assert_eq!(clamp_page(5, 2), 2);
    }
}
