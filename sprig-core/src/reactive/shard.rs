//! Shard Implementation
//!
//! A Shard is a derived, read-only view of a [`State`]'s change stream.
//!
//! # How Shards Work
//!
//! 1. A shard listens to its source state's `changed` signal.
//!
//! 2. A *mapped* shard applies its mapper to both sides of each change and
//!    emits only when the mapped values differ under its own equality
//!    predicate. The source may change while the mapped value stays put;
//!    the shard stays silent then.
//!
//! 3. A *filtered* shard forwards a change only when its predicate over
//!    `(curr, from)` holds.
//!
//! # No Cache
//!
//! [`Shard::get`] re-evaluates over the source's current value on every call.
//! Mappers and filters must therefore be pure; a non-deterministic mapper
//! makes `get` disagree with the last emitted value.

use std::fmt::Debug;
use std::ops::Deref;
use std::rc::Rc;

use super::signal::Signal;
use super::state::State;

/// A read-only signal derived from a [`State`].
///
/// Shards dereference to their `Signal<(T, T)>`, so they can be listened to
/// like any other signal. They expose no setter.
pub struct Shard<T: 'static> {
    signal: Signal<(T, T)>,
    get: Rc<dyn Fn() -> T>,
}

impl<T: Clone + 'static> Shard<T> {
    pub(crate) fn map<I, F, E>(state: &State<I>, mapper: F, eq: E) -> Self
    where
        I: Clone + 'static,
        F: Fn(&I) -> T + 'static,
        E: Fn(&T, &T) -> bool + 'static,
    {
        let mapper = Rc::new(mapper);

        let source = state.clone();
        let get_mapper = Rc::clone(&mapper);
        let shard = Self {
            signal: Signal::new(),
            get: Rc::new(move || source.with(|value| get_mapper(value))),
        };

        let signal = shard.signal.clone();
        state.changed().listen(move |(curr, from)| {
            let mapped_curr = mapper(curr);
            let mapped_from = mapper(from);
            if !eq(&mapped_curr, &mapped_from) {
                signal.emit((mapped_curr, mapped_from));
            }
        });

        shard
    }

    pub(crate) fn filter<F>(state: &State<T>, filter: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        let source = state.clone();
        let shard = Self {
            signal: Signal::new(),
            get: Rc::new(move || source.get()),
        };

        let signal = shard.signal.clone();
        state.changed().listen(move |(curr, from)| {
            if filter(curr, from) {
                signal.emit((curr.clone(), from.clone()));
            }
        });

        shard
    }

    /// Get the derived value for the source's current value.
    pub fn get(&self) -> T {
        (self.get)()
    }

    /// The underlying change signal.
    pub fn signal(&self) -> &Signal<(T, T)> {
        &self.signal
    }
}

impl<T: 'static> Deref for Shard<T> {
    type Target = Signal<(T, T)>;

    fn deref(&self) -> &Self::Target {
        &self.signal
    }
}

impl<T: 'static> Clone for Shard<T> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
            get: Rc::clone(&self.get),
        }
    }
}

impl<T: 'static> Debug for Shard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shard")
            .field("listener_count", &self.signal.len())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn record<T: Clone + 'static>(shard: &Shard<T>) -> Rc<RefCell<Vec<(T, T)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        shard.listen(move |change: &(T, T)| log_clone.borrow_mut().push(change.clone()));
        log
    }

    #[test]
    fn map_suppresses_collapsed_changes() {
        let count = State::new(1);
        let parity = count.map(|n| n % 2 == 0);
        let log = record(&parity);

        // 1 -> 3: the source changes, the parity does not
        count.set(3);
        assert!(log.borrow().is_empty());

        count.set(4);
        assert_eq!(*log.borrow(), vec![(true, false)]);
    }

    #[test]
    fn map_with_uses_its_own_gate() {
        let name = State::new(String::from("ada"));
        // Never equal: every source change is forwarded
        let upper = name.map_with(|s| s.to_uppercase(), |_: &String, _: &String| false);
        let log = record(&upper);

        name.set(String::from("ADA"));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(upper.get(), "ADA");
    }

    #[test]
    fn get_tracks_the_source_without_caching() {
        let count = State::new(2);
        let doubled = count.map(|n| n * 2);

        assert_eq!(doubled.get(), 4);
        count.set(5);
        assert_eq!(doubled.get(), 10);
    }

    #[test]
    fn filter_applies_predicate_to_raw_pair() {
        let level = State::new(0);
        let rising = level.filter(|curr, from| curr > from);
        let log = record(&rising);

        level.set(5);
        level.set(2);
        level.set(3);
        assert_eq!(*log.borrow(), vec![(5, 0), (3, 2)]);
        assert_eq!(rising.get(), 3);
    }

    #[test]
    fn transitions() {
        let phase = State::new("idle");
        let started = phase.transition("running", "idle");
        let to_done = phase.transition_to("done");
        let left_running = phase.transition_from("running");
        let to_terminal = phase.transition_to_any(vec!["done", "failed"]);
        let from_active = phase.transition_from_any(vec!["running", "paused"]);

        let started_log = record(&started);
        let done_log = record(&to_done);
        let left_log = record(&left_running);
        let terminal_log = record(&to_terminal);
        let active_log = record(&from_active);

        phase.set("running");
        phase.set("paused");
        phase.set("done");

        assert_eq!(*started_log.borrow(), vec![("running", "idle")]);
        assert_eq!(*done_log.borrow(), vec![("done", "paused")]);
        assert_eq!(*left_log.borrow(), vec![("paused", "running")]);
        assert_eq!(*terminal_log.borrow(), vec![("done", "paused")]);
        assert_eq!(
            *active_log.borrow(),
            vec![("paused", "running"), ("done", "paused")]
        );
    }

    #[test]
    fn shard_never_emits_without_source_change() {
        let count = State::new(0);
        let shard = count.map(|n| *n);
        let log = record(&shard);

        count.set(0);
        assert!(log.borrow().is_empty());
    }
}
