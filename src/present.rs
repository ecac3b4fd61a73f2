//! Display helpers shared by every front-end: dates, season navigation and
//! episode blurbs.

use chrono::{DateTime, Utc};

use crate::catalog::{Episode, Season};

/// Words kept from an episode description in listings
pub const SUMMARY_WORDS: usize = 24;

/// Format a timestamp as e.g. "3 November 2022"; no timestamp gives ""
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%-d %B %Y").to_string()).unwrap_or_default()
}

/// Short episode label such as "E07"
pub fn episode_label(episode: &Episode) -> String {
    format!("E{:02}", episode.episode)
}

/// First [`SUMMARY_WORDS`] words of the description followed by an ellipsis,
/// or an empty string when the description is empty
pub fn episode_summary(episode: &Episode) -> String {
    if episode.description.is_empty() {
        return String::new();
    }
    let words: Vec<&str> = episode
        .description
        .split_whitespace()
        .take(SUMMARY_WORDS)
        .collect();
    format!("{}…", words.join(" "))
}

/// Heading for a season, e.g. "Season 2: The Return"
pub fn season_heading(season: &Season) -> String {
    match season.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => format!("Season {}: {}", season.season, title),
        None => format!("Season {}", season.season),
    }
}

/// Tracks which season of a show is open
#[derive(Debug, Clone)]
pub struct SeasonPicker<'a> {
    seasons: &'a [Season],
    numbers: Vec<u32>,
    selected: Option<u32>,
}

impl<'a> SeasonPicker<'a> {
    /// Open `initial` if the show has it, otherwise the lowest season
    pub fn new(seasons: &'a [Season], initial: u32) -> Self {
        let mut numbers: Vec<u32> = seasons.iter().map(|s| s.season).collect();
        numbers.sort_unstable();
        numbers.dedup();

        let selected = if numbers.contains(&initial) {
            Some(initial)
        } else {
            numbers.first().copied()
        };

        Self {
            seasons,
            numbers,
            selected,
        }
    }

    /// Season numbers in ascending order
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Open another season; unknown numbers are refused
    pub fn select(&mut self, season: u32) -> bool {
        if !self.numbers.contains(&season) {
            return false;
        }
        self.selected = Some(season);
        true
    }

    pub fn active(&self) -> Option<&'a Season> {
        let selected = self.selected?;
        self.seasons.iter().find(|s| s.season == selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn episode(number: u32, description: &str) -> Episode {
        Episode {
            episode: number,
            title: format!("Episode {}", number),
            description: description.to_string(),
            file: None,
        }
    }

    fn season(number: u32) -> Season {
        Season {
            season: number,
            title: None,
            image: None,
            episodes: vec![episode(1, "")],
        }
    }

    #[test]
    fn dates_use_day_month_year() {
        let date = Utc.with_ymd_and_hms(2022, 11, 3, 7, 0, 0).unwrap();
        assert_eq!(format_date(Some(&date)), "3 November 2022");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn episode_labels_are_zero_padded() {
        assert_eq!(episode_label(&episode(7, "")), "E07");
        assert_eq!(episode_label(&episode(112, "")), "E112");
    }

    #[test]
    fn summaries_are_cut_after_24_words() {
        let long: Vec<String> = (1..=30).map(|i| format!("w{}", i)).collect();
        let summary = episode_summary(&episode(1, &long.join(" ")));

        let expected: Vec<String> = (1..=24).map(|i| format!("w{}", i)).collect();
        assert_eq!(summary, format!("{}…", expected.join(" ")));
    }

    #[test]
    fn short_and_missing_descriptions() {
        assert_eq!(episode_summary(&episode(1, "Just a few words")), "Just a few words…");
        assert_eq!(episode_summary(&episode(1, "")), "");
        assert_eq!(episode_summary(&episode(1, "   ")), "…");
    }

    #[test]
    fn season_headings_include_titles() {
        let mut s = season(2);
        assert_eq!(season_heading(&s), "Season 2");
        s.title = Some("The Return".to_string());
        assert_eq!(season_heading(&s), "Season 2: The Return");
    }

    #[test]
    fn picker_opens_requested_season_when_present() {
        let seasons = vec![season(3), season(1), season(2)];
        let picker = SeasonPicker::new(&seasons, 1);

        assert_eq!(picker.numbers(), &[1, 2, 3]);
        assert_eq!(picker.selected(), Some(1));
        assert_eq!(picker.active().map(|s| s.season), Some(1));
    }

    #[test]
    fn picker_falls_back_to_lowest_season() {
        let seasons = vec![season(5), season(3)];
        let mut picker = SeasonPicker::new(&seasons, 1);
        assert_eq!(picker.selected(), Some(3));

        assert!(picker.select(5));
        assert_eq!(picker.active().map(|s| s.season), Some(5));
        assert!(!picker.select(4));
        assert_eq!(picker.selected(), Some(5));
    }

    #[test]
    fn picker_without_seasons_has_nothing_open() {
        let picker = SeasonPicker::new(&[], 1);
        assert!(picker.numbers().is_empty());
        assert!(picker.active().is_none());
    }
}
