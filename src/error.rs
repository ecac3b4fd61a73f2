use thiserror::Error;

/// Errors that can occur when requesting data from the catalogue API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request failed ({status})")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Base URL {url} cannot carry a show path")]
    InvalidBaseUrl { url: String },

    #[error("Request to {url} was cancelled")]
    Cancelled { url: String },
}

impl FetchError {
    /// Whether this error only signals that the request was superseded or abandoned
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// The two error kinds a view can observe while loading catalogue data
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Show {id} not found")]
    NotFound { id: String },
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_cancelled())
    }
}

/// Error returned when a sort mode name is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort mode '{0}' (expected one of: default, az, za, seasons, updated)")]
pub struct UnknownSortMode(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_is_human_readable() {
        let err = FetchError::HttpStatus {
            url: "https://example.com/".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "Request failed (503)");
        assert!(!err.is_cancelled());
    }

    #[test]
    fn cancellation_is_visible_through_catalog_error() {
        let err: CatalogError = FetchError::Cancelled {
            url: "https://example.com/".to_string(),
        }
        .into();
        assert!(err.is_cancelled());

        let not_found = CatalogError::NotFound {
            id: "42".to_string(),
        };
        assert!(!not_found.is_cancelled());
        assert_eq!(not_found.to_string(), "Show 42 not found");
    }
}
