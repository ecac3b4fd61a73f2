// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::query::{ParamStore, SearchParams};

const SHOW_PREFIX: &str = "/show/";

/// An app location: a path plus its query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: SearchParams,
}

impl Location {
    /// Parse `path?query#fragment`; the fragment is ignored
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = if path.is_empty() { "/" } else { path };

        Self {
            path: path.to_string(),
            params: SearchParams::parse(query),
        }
    }

    /// The listing page carrying `params`
    pub fn listing(params: SearchParams) -> Self {
        Self {
            path: "/".to_string(),
            params,
        }
    }

    /// The detail page of a show, carrying the listing's `params` along
    pub fn show(id: &str, params: SearchParams) -> Self {
        Self {
            path: format!("{}{}", SHOW_PREFIX, urlencoding::encode(id)),
            params,
        }
    }

    pub fn route(&self) -> Route {
        Route::resolve(&self.path)
    }

    pub fn href(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// The view a path maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    Show { id: String },
    NotFound,
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Listing;
        }

        match trimmed.strip_prefix(SHOW_PREFIX) {
            Some(id) if !id.is_empty() && !id.contains('/') => Self::Show {
                id: urlencoding::decode(id)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| id.to_string()),
            },
            _ => Self::NotFound,
        }
    }
}

/// Stack of visited locations with a cursor, like a browser tab's history
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Navigate to a new entry, discarding anything ahead of the cursor
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index += 1;
    }

    /// Swap the current entry in place
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    /// Step back one entry; false when already at the first
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leave a detail page: go back when there is somewhere to go, otherwise
    /// open the listing with the detail page's parameters
    pub fn leave_detail(&mut self) {
        if !self.back() {
            let params = self.current().params.clone();
            self.push(Location::listing(params));
        }
    }
}

impl ParamStore for History {
    fn params(&self) -> SearchParams {
        self.current().params.clone()
    }

    fn replace_params(&mut self, params: SearchParams) {
        let path = self.current().path.clone();
        self.replace(Location { path, params });
    }
}
