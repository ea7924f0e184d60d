//! Loading/error/data state for resources fetched from an async API.
//!
//! Resource wrappers in the storefront and admin crates keep a
//! [`ResourceState`] inside a [`crate::Store`] so UI layers can subscribe to
//! it. Every fetch takes a [`FetchTicket`] first; only the newest ticket may
//! write its response, so a slow stale response cannot overwrite fresher data.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// The loading/error/data triple exposed to UI layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// Mark a request as in flight and clear the previous error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a successful request.
    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// Record a failed request, keeping the existing data.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

/// Monotonic request counter for a single resource.
#[derive(Debug, Default)]
pub struct FetchTicket {
    latest: AtomicU64,
}

impl FetchTicket {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a ticket for a new request.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the newest one issued.
    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut state: ResourceState<u8> = ResourceState::default();
        state.begin();
        assert!(state.loading);

        state.data.push(1);
        state.fail("offline");
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert_eq!(state.data, vec![1]);

        state.begin();
        assert!(state.error.is_none());
        state.succeed();
        assert!(!state.loading);
    }

    #[test]
    fn test_only_latest_ticket_is_current() {
        let tickets = FetchTicket::new();
        let first = tickets.issue();
        let second = tickets.issue();
        assert!(!tickets.is_current(first));
        assert!(tickets.is_current(second));
    }
}
