use tracing::debug;

use crate::cancel::{CancelToken, RequestSlot, RequestTicket};
use crate::error::CatalogError;

/// What a view knows about a resource it asked for
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    /// The request failed; holds a message fit for display
    Failed(String),
    NotFound,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    /// Record the outcome of a request.
    ///
    /// Cancelled requests leave the state untouched and return `false`.
    pub fn apply<E: Into<CatalogError>>(&mut self, result: Result<T, E>) -> bool {
        let result: Result<T, CatalogError> = result.map_err(Into::into);
        *self = match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) if e.is_cancelled() => {
                debug!(error = %e, "ignoring cancelled request");
                return false;
            }
            Err(CatalogError::NotFound { .. }) => LoadState::NotFound,
            Err(CatalogError::Fetch(e)) => LoadState::Failed(e.to_string()),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// A single resource slot: at most one request in flight, and only the
/// latest request may settle the state
#[derive(Debug)]
pub struct Loader<T> {
    slot: RequestSlot,
    state: LoadState<T>,
}

impl<T> Loader<T> {
    pub fn new() -> Self {
        Self {
            slot: RequestSlot::new(),
            state: LoadState::Idle,
        }
    }

    /// Start loading; any earlier request is cancelled.
    ///
    /// The ticket goes back to [`Loader::finish`] together with the result.
    pub fn begin(&mut self) -> (CancelToken, RequestTicket) {
        self.state = LoadState::Loading;
        self.slot.start()
    }

    /// Settle the state with a request's outcome.
    ///
    /// Results of superseded or cancelled requests are dropped. Returns whether
    /// the state changed.
    pub fn finish<E: Into<CatalogError>>(
        &mut self,
        ticket: RequestTicket,
        result: Result<T, E>,
    ) -> bool {
        if ticket.is_cancelled() {
            debug!("ignoring result of a superseded request");
            return false;
        }
        if !self.state.apply(result) {
            return false;
        }
        self.slot.settle(ticket)
    }

    /// Abandon the in-flight request, e.g. when the view goes away
    pub fn cancel(&mut self) {
        self.slot.cancel();
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn into_state(self) -> LoadState<T> {
        self.state
    }
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}
