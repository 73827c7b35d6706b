//! Listener types for the reactive system.
//!
//! A listener is any callback registered on a [`Signal`](super::Signal):
//! view rebuilds, shard forwarding, or plain application callbacks.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a registered listener.
///
/// Returned by [`Signal::listen`](super::Signal::listen) and accepted by
/// [`Signal::drop_listener`](super::Signal::drop_listener). Ids are never
/// reused, so dropping a stale id is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Generate a new unique listener ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A cleanup callback, run at most once.
///
/// Returned by [`Signal::subscribe`](super::Signal::subscribe) and stored by
/// contexts as deferred work.
pub type Cleanup = Box<dyn FnOnce()>;

/// A registered callback.
///
/// Plain listeners and handlers share one registry. A plain listener always
/// reports "unhandled", so it never stops [`Signal::handle`](super::Signal::handle).
pub(crate) struct Listener<A> {
    callback: Rc<dyn Fn(&A) -> bool>,
}

impl<A> Listener<A> {
    pub(crate) fn plain<F>(callback: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            callback: Rc::new(move |args| {
                callback(args);
                false
            }),
        }
    }

    pub(crate) fn handler<F>(callback: F) -> Self
    where
        F: Fn(&A) -> bool + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invoke the callback, returning whether it handled the arguments.
    pub(crate) fn call(&self, args: &A) -> bool {
        (self.callback)(args)
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}
