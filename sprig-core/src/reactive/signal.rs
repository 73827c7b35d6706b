//! Signal Implementation
//!
//! A Signal is the fundamental event primitive: an ordered registry of
//! callbacks that all receive the same argument on every emission.
//!
//! # How Signals Work
//!
//! 1. Callbacks are registered with [`Signal::listen`] (or
//!    [`Signal::subscribe`], which hands back an unsubscribe closure).
//!
//! 2. [`Signal::emit`] invokes every callback, in registration order, with a
//!    reference to the emitted value.
//!
//! 3. [`Signal::handle`] stops at the first handler that reports the value as
//!    handled.
//!
//! # Re-entrancy
//!
//! Dispatch is synchronous and re-entrant. Callbacks may emit, listen or drop
//! listeners on the same signal while it is dispatching. The set of callbacks
//! to visit is fixed when dispatch starts; callbacks dropped in the meantime
//! are skipped.
//!
//! # Memory Layout
//!
//! Each signal is a reference-counted handle to:
//! - An insertion-ordered map from listener ID to callback

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::listener::{Cleanup, Listener, ListenerId};

/// Snapshot of listener ids taken at the start of a dispatch.
type DispatchList = SmallVec<[ListenerId; 8]>;

/// A multicast event carrying an argument of type `A`.
///
/// Cloning a signal yields another handle to the same registry.
///
/// # Example
///
/// ```rust
/// use sprig_core::reactive::Signal;
///
/// let clicked = Signal::<u32>::new();
/// let id = clicked.listen(|button| println!("button {button}"));
///
/// clicked.emit(1);
/// clicked.drop_listener(id);
/// ```
pub struct Signal<A: 'static = ()> {
    listeners: Rc<RefCell<IndexMap<ListenerId, Listener<A>>>>,
}

impl<A: 'static> Signal<A> {
    /// Value returned by handlers that did not handle the event.
    pub const UNHANDLED: bool = false;

    /// Value returned by handlers that handled the event.
    pub const HANDLED: bool = true;

    /// Create a new signal with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    /// Compose several cleanup callbacks into one.
    pub fn bundle(mut callbacks: Vec<Cleanup>) -> Cleanup {
        if callbacks.len() == 1 {
            if let Some(callback) = callbacks.pop() {
                return callback;
            }
        }
        Box::new(move || {
            for callback in callbacks {
                callback();
            }
        })
    }

    /// Register a callback, invoked on every emission.
    pub fn listen<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        self.insert(Listener::plain(callback))
    }

    /// Register a handler that participates in [`Signal::handle`].
    ///
    /// On [`Signal::emit`] the return value is ignored.
    pub fn listen_handler<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&A) -> bool + 'static,
    {
        self.insert(Listener::handler(callback))
    }

    fn insert(&self, listener: Listener<A>) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    /// Deregister a callback. Unknown ids are ignored.
    pub fn drop_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().shift_remove(&id);
    }

    /// Deregister every callback.
    pub fn drop_all(&self) {
        self.listeners.borrow_mut().clear();
    }

    /// Register a callback and return a closure that deregisters it.
    ///
    /// The closure only holds a weak reference, so it never keeps the
    /// signal alive.
    pub fn subscribe<F>(&self, callback: F) -> Cleanup
    where
        F: Fn(&A) + 'static,
    {
        let id = self.listen(callback);
        let listeners = Rc::downgrade(&self.listeners);
        Box::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().shift_remove(&id);
            }
        })
    }

    /// Invoke every callback with `args`, in registration order.
    pub fn emit(&self, args: A) {
        for id in self.dispatch_list() {
            if let Some(listener) = self.lookup(id) {
                listener.call(&args);
            }
        }
    }

    /// Invoke callbacks until one reports the event as handled.
    ///
    /// Returns whether any callback handled it.
    pub fn handle(&self, args: A) -> bool {
        for id in self.dispatch_list() {
            if let Some(listener) = self.lookup(id) {
                if listener.call(&args) == Self::HANDLED {
                    return Self::HANDLED;
                }
            }
        }
        Self::UNHANDLED
    }

    fn dispatch_list(&self) -> DispatchList {
        self.listeners.borrow().keys().copied().collect()
    }

    // The borrow must be released before the callback runs.
    fn lookup(&self, id: ListenerId) -> Option<Listener<A>> {
        self.listeners.borrow().get(&id).cloned()
    }

    /// Get the number of registered callbacks.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Check whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Check whether two handles refer to the same signal.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.listeners, &other.listeners)
    }
}

impl<A: 'static> Default for Signal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> Clone for Signal<A> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<A: 'static> Debug for Signal<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listener_count", &self.len())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
