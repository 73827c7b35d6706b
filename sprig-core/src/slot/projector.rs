use crate::reactive::Signal;
use crate::render::Builder;

use super::empty_builder;

/// A stateless slot: every `put` re-emits a builder to the bound views.
///
/// A projector remembers only its initial builder, which newly bound views
/// render until the next `put`.
#[derive(Clone)]
pub struct Projector {
    update: Signal<Builder>,
    initial: Builder,
}

impl Projector {
    /// A projector initially rendering `initial`.
    pub fn new(initial: Builder) -> Self {
        Self {
            update: Signal::new(),
            initial,
        }
    }

    /// A projector initially rendering an empty comment node.
    pub fn empty() -> Self {
        Self::new(empty_builder())
    }

    /// The signal carrying projected builders.
    pub fn update(&self) -> &Signal<Builder> {
        &self.update
    }

    /// The builder newly bound views start with.
    pub fn initial(&self) -> Builder {
        self.initial.clone()
    }

    /// Project `builder`.
    pub fn put(&self, builder: Builder) {
        self.update.emit(builder);
    }

    /// Project the empty builder.
    pub fn clear(&self) {
        self.update.emit(empty_builder());
    }

    /// Project the initial builder again.
    pub fn reset(&self) {
        self.update.emit(self.initial.clone());
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::empty()
    }
}
