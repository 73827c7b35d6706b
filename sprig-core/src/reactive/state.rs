//! State Implementation
//!
//! A State holds a single mutable value and announces accepted changes on
//! its [`changed`](State::changed) signal.
//!
//! # Equality Gate
//!
//! Every `set` is checked against the current value with the state's
//! equality predicate. Equal values are dropped silently; anything else
//! replaces the value and emits `(current, previous)` exactly once.
//!
//! - [`State::new`] compares with `PartialEq`.
//! - [`State::with_eq`] takes a custom predicate.
//! - [`State::by_ref`] never considers two values equal, so every `set`
//!   notifies. Use it for values whose identity matters more than content.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use super::shard::Shard;
use super::signal::Signal;

/// An equality predicate over two values.
pub type EqFn<T> = Rc<dyn Fn(&T, &T) -> bool>;

struct StateInner<T: 'static> {
    curr: RefCell<T>,
    eq: EqFn<T>,
    changed: Signal<(T, T)>,
}

/// A mutable value with change notification.
///
/// Cloning a state yields another handle to the same value.
///
/// # Example
///
/// ```rust
/// use sprig_core::reactive::State;
///
/// let count = State::new(0);
/// count.changed().listen(|(curr, from)| println!("{from} -> {curr}"));
///
/// count.set(1); // prints "0 -> 1"
/// count.set(1); // equal, nothing happens
/// ```
pub struct State<T: 'static> {
    inner: Rc<StateInner<T>>,
}

impl<T: Clone + 'static> State<T> {
    /// Create a state compared with `PartialEq`.
    pub fn new(initial: T) -> Self
    where
        T: PartialEq,
    {
        Self::with_eq(initial, |curr, from| curr == from)
    }

    /// Create a state with a custom equality predicate.
    pub fn with_eq<E>(initial: T, eq: E) -> Self
    where
        E: Fn(&T, &T) -> bool + 'static,
    {
        Self {
            inner: Rc::new(StateInner {
                curr: RefCell::new(initial),
                eq: Rc::new(eq),
                changed: Signal::new(),
            }),
        }
    }

    /// Create a state that treats every `set` as a change.
    pub fn by_ref(initial: T) -> Self {
        Self::with_eq(initial, |_, _| false)
    }

    /// The signal emitting `(current, previous)` on every accepted change.
    pub fn changed(&self) -> &Signal<(T, T)> {
        &self.inner.changed
    }

    /// Check two values with this state's equality predicate.
    pub fn eq(&self, curr: &T, from: &T) -> bool {
        (self.inner.eq)(curr, from)
    }

    /// Replace the value if it differs from the current one.
    pub fn set(&self, to: T) {
        if self.with(|curr| self.eq(&to, curr)) {
            return;
        }
        let from = self.inner.curr.replace(to.clone());
        self.inner.changed.emit((to, from));
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.curr.borrow().clone()
    }

    /// Borrow the current value.
    ///
    /// The state must not be set from inside `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.curr.borrow())
    }

    /// Check whether the current value is `value`.
    pub fn is(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.with(|curr| curr == value)
    }

    /// Check whether the current value is any of `values`.
    pub fn any(&self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.with(|curr| values.contains(curr))
    }

    /// Set the value computed from the current one.
    pub fn mutate(&self, mutator: impl FnOnce(&T) -> T) {
        let next = self.with(mutator);
        self.set(next);
    }

    /// Set `to`, unless the value already is `to`, in which case set `other`.
    ///
    /// The check compares values with `PartialEq`, independent of the
    /// state's own equality predicate.
    pub fn toggle(&self, to: T, other: T)
    where
        T: PartialEq,
    {
        if self.is(&to) {
            self.set(other);
        } else {
            self.set(to);
        }
    }

    /// Derive a shard emitting mapped values, gated by `PartialEq` on the output.
    pub fn map<O, F>(&self, mapper: F) -> Shard<O>
    where
        O: Clone + PartialEq + 'static,
        F: Fn(&T) -> O + 'static,
    {
        Shard::map(self, mapper, |curr: &O, from: &O| curr == from)
    }

    /// Derive a shard emitting mapped values, gated by `eq` on the output.
    pub fn map_with<O, F, E>(&self, mapper: F, eq: E) -> Shard<O>
    where
        O: Clone + 'static,
        F: Fn(&T) -> O + 'static,
        E: Fn(&O, &O) -> bool + 'static,
    {
        Shard::map(self, mapper, eq)
    }

    /// Derive a shard forwarding only the changes accepted by `filter`.
    pub fn filter<F>(&self, filter: F) -> Shard<T>
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        Shard::filter(self, filter)
    }

    /// Changes going from exactly `from` to exactly `to`.
    pub fn transition(&self, to: T, from: T) -> Shard<T>
    where
        T: PartialEq,
    {
        self.filter(move |curr, prev| *curr == to && *prev == from)
    }

    /// Changes landing on `value`.
    pub fn transition_to(&self, value: T) -> Shard<T>
    where
        T: PartialEq,
    {
        self.filter(move |curr, _| *curr == value)
    }

    /// Changes leaving `value`.
    pub fn transition_from(&self, value: T) -> Shard<T>
    where
        T: PartialEq,
    {
        self.filter(move |_, from| *from == value)
    }

    /// Changes landing on any of `values`.
    pub fn transition_to_any(&self, values: Vec<T>) -> Shard<T>
    where
        T: PartialEq,
    {
        self.filter(move |curr, _| values.contains(curr))
    }

    /// Changes leaving any of `values`.
    pub fn transition_from_any(&self, values: Vec<T>) -> Shard<T>
    where
        T: PartialEq,
    {
        self.filter(move |_, from| values.contains(from))
    }

    /// Check whether two handles refer to the same state.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Debug + 'static> Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("curr", &*self.inner.curr.borrow())
            .field("listener_count", &self.inner.changed.len())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
