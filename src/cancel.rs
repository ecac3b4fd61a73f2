// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cooperative cancellation for in-flight catalogue requests.
//!
//! Every request is started with a [`CancelToken`]. The owner of the request
//! keeps the matching abort handle inside a [`RequestSlot`]; starting the next
//! request in the same slot aborts the previous one, so a superseded response
//! can never be observed as a result.

use std::future::Future;

use futures::future::{AbortHandle, AbortRegistration, Abortable, Aborted};

/// Token handed to a fetch operation; aborting its handle cancels the request
#[derive(Debug)]
pub struct CancelToken {
    handle: AbortHandle,
    registration: AbortRegistration,
}

impl CancelToken {
    /// Create a token together with the handle that cancels it
    pub fn new() -> (Self, AbortHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let token = Self {
            handle: handle.clone(),
            registration,
        };
        (token, handle)
    }

    /// A token nobody else holds a handle for
    pub fn detached() -> Self {
        Self::new().0
    }

    /// Whether the request has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }

    /// Drive `future` to completion unless the token is cancelled first.
    ///
    /// An abort that lands after the future finished but before the result is
    /// handed back still counts as a cancellation.
    pub async fn run<F: Future>(self, future: F) -> Result<F::Output, Aborted> {
        let Self {
            handle,
            registration,
        } = self;

        let output = Abortable::new(future, registration).await?;
        if handle.is_aborted() {
            return Err(Aborted);
        }
        Ok(output)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::detached()
    }
}

/// Proof of which request a result belongs to.
///
/// Handed out next to the [`CancelToken`] and passed back when the result is
/// recorded. Not `Clone`, so each request settles at most once.
#[derive(Debug)]
pub struct RequestTicket {
    handle: AbortHandle,
}

impl RequestTicket {
    /// Whether the request was superseded or cancelled
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

/// Owns the abort handle of at most one in-flight request
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: Option<AbortHandle>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, aborting whichever request the slot held before
    pub fn begin(&mut self) -> CancelToken {
        self.start().0
    }

    /// Like [`RequestSlot::begin`], also returning the ticket that
    /// [`RequestSlot::settle`] expects back with the result
    pub fn start(&mut self) -> (CancelToken, RequestTicket) {
        self.cancel();
        let (token, handle) = CancelToken::new();
        self.current = Some(handle.clone());
        (token, RequestTicket { handle })
    }

    /// Mark the ticket's request as completed.
    ///
    /// Returns `false` for a superseded or cancelled ticket; the slot then keeps
    /// whatever request it holds now. A live ticket is always the slot's
    /// current one since every newer start aborts the older handles.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if ticket.is_cancelled() {
            return false;
        }
        self.release();
        true
    }

    /// Abort the in-flight request, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }

    /// Forget the current request without aborting it (it completed).
    ///
    /// Only reached through `settle`, so a handle leaves the slot either
    /// aborted or together with its consumed ticket.
    fn release(&mut self) {
        self.current = None;
    }

    /// Whether a request started through this slot is still outstanding
    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_aborted())
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
