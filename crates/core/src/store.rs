//! Observable in-memory state container.
//!
//! A [`Store`] owns one state value and broadcasts every change to its
//! subscribers through a `tokio::sync::watch` channel. Mutations are
//! synchronous: once an action returns, [`Store::snapshot`] and every
//! receiver's `borrow()` already see the new value.
//!
//! Stores are plain values. Build them at a composition root (see the
//! `AppState` types in the storefront and admin crates) and hand out clones of
//! the surrounding `Arc`; there are no process-wide instances.

use tokio::sync::watch;

/// Observable state container.
#[derive(Debug)]
pub struct Store<S> {
    tx: watch::Sender<S>,
}

impl<S> Store<S> {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Subscribe to changes. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }

    /// Run `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutate the state. `f` returns whether anything changed; subscribers
    /// are only woken when it returns `true`.
    ///
    /// Returns the value reported by `f`.
    pub fn update(&self, f: impl FnOnce(&mut S) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Replace the whole state and wake subscribers.
    pub fn replace(&self, state: S) {
        self.tx.send_replace(state);
    }
}

impl<S: Clone> Store<S> {
    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
