use std::sync::Arc;

/// Events emitted while talking to the catalogue API
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The full show listing is being requested
    FetchingPreviews { url: String },

    /// The listing arrived and was decoded
    PreviewsLoaded { count: usize },

    /// A single show is being requested
    FetchingShow { id: String, url: String },

    /// A show detail record arrived and was decoded
    ShowLoaded {
        id: String,
        title: String,
        season_count: usize,
    },

    /// A request failed; cancellations are reported separately
    FetchFailed { url: String, error: String },

    /// A request was abandoned before it completed
    FetchCancelled { url: String },
}

/// Trait for reporting request lifecycle events.
///
/// Implementations can use this to display spinners, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
