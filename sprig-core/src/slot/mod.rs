//! Content Slots
//!
//! Slots hold *builders* rather than values. A slot bound into the tree with
//! [`s`](crate::s) re-renders its position whenever its builder changes.
//!
//! - [`Projector`]: fire-and-forget. `put` emits a builder; nothing is kept.
//! - [`Anchor`]: backed by a [`State`](crate::reactive::State), so late
//!   viewers see the latest builder.
//! - [`Stack`]: an ordered stack of builders; the top one is shown.
//!
//! Builder arguments are captured by the closure rather than passed
//! alongside it.

mod anchor;
mod projector;
mod stack;

pub use anchor::Anchor;
pub use projector::Projector;
pub use stack::Stack;

use crate::render::{builder, comment, Builder};

/// A builder rendering an empty comment node.
pub fn empty_builder() -> Builder {
    builder(|_| comment())
}
