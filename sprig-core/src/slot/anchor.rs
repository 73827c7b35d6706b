use std::rc::Rc;

use crate::reactive::State;
use crate::render::Builder;

use super::empty_builder;

/// A slot holding exactly one current builder.
///
/// Builders are compared by identity: putting the builder that is already
/// current does nothing.
#[derive(Clone)]
pub struct Anchor {
    state: State<Builder>,
}

impl Anchor {
    /// An anchor holding `initial`.
    pub fn new(initial: Builder) -> Self {
        Self {
            state: State::with_eq(initial, |curr, from| Rc::ptr_eq(curr, from)),
        }
    }

    /// An anchor holding an empty comment builder.
    pub fn empty() -> Self {
        Self::new(empty_builder())
    }

    /// The state holding the current builder.
    pub fn state(&self) -> &State<Builder> {
        &self.state
    }

    /// The current builder.
    pub fn get(&self) -> Builder {
        self.state.get()
    }

    /// Make `builder` current, unless it already is.
    pub fn put(&self, builder: Builder) {
        self.state.set(builder);
    }

    /// Make the empty builder current.
    pub fn clear(&self) {
        self.state.set(empty_builder());
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::empty()
    }
}
