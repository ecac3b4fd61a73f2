// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::genres::genre_label;

/// Lightweight show summary as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowPreview {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub genres: Vec<u32>,
    /// Number of seasons, when the listing provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    /// Last update; absent timestamps sort after every dated show
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl ShowPreview {
    /// Season count used for ordering; missing counts order as zero
    pub fn season_count(&self) -> u32 {
        self.seasons.unwrap_or(0)
    }

    pub fn has_genre(&self, id: u32) -> bool {
        self.genres.contains(&id)
    }

    pub fn genre_labels(&self) -> Vec<String> {
        self.genres.iter().map(|&id| genre_label(id)).collect()
    }
}

/// A genre reference on a show detail record.
///
/// The detail endpoint is not consistent about sending ids, so textual labels
/// are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreTag {
    Id(u32),
    Label(String),
}

impl GenreTag {
    pub fn label(&self) -> String {
        match self {
            Self::Id(id) => genre_label(*id),
            Self::Label(label) => label.clone(),
        }
    }
}

/// Full show record including its season and episode breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub genres: Vec<GenreTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl ShowDetail {
    pub fn season_count(&self) -> usize {
        self.seasons.len()
    }

    /// Number of episodes across all seasons
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }

    pub fn genre_labels(&self) -> Vec<String> {
        self.genres.iter().map(GenreTag::label).collect()
    }
}

/// One season of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub season: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// One episode within a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Audio file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
