use url::Url;

use crate::error::FetchError;

/// Public endpoint of the podcast catalogue
pub const DEFAULT_API_URL: &str = "https://podcast-api.netlify.app";

/// Where the catalogue API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    /// Build a config for a custom API location
    pub fn with_base_url(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// URL listing every show preview
    pub fn previews_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("");
        }
        url
    }

    /// URL of the detail record for a single show
    pub fn show_url(&self, id: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push("id")
            .push(id);
        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_URL).expect("default API URL is valid")
    }
}
