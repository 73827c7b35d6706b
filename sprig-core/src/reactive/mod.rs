//! Reactive Primitives
//!
//! This module implements the reactive building blocks: signals, states,
//! and shards. Views bind to these through the [`crate::view`] dispatcher.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A Signal is a multicast callback registry. Emitting a value invokes every
//! registered callback, synchronously and in registration order.
//!
//! ## States
//!
//! A State is a container for one mutable value. Setting a value that is not
//! equal to the current one emits `(current, previous)` on the state's
//! `changed` signal.
//!
//! ## Shards
//!
//! A Shard is a read-only signal derived from a state, either by mapping its
//! values or filtering its changes.
//!
//! # Implementation Notes
//!
//! Everything here is single-threaded: handles are `Rc`-based and `!Send`.
//! There is no dependency tracking, batching, or cycle detection. A listener
//! that sets the state it listens to simply recurses.

mod listener;
mod shard;
mod signal;
mod state;

pub use listener::{Cleanup, ListenerId};
pub use shard::Shard;
pub use signal::Signal;
pub use state::{EqFn, State};
