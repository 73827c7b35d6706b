use std::cell::RefCell;
use std::rc::Rc;

use crate::reactive::Signal;
use crate::render::Builder;

/// An ordered stack of builders; bound views render the top.
///
/// Every mutation that changes the stack emits the new top on
/// [`update`](Stack::update). [`Stack::clear`] emits even when nothing
/// changed, so bound views can rely on it to re-render.
///
/// ```rust
/// use sprig_core::{builder, h, slot::Stack};
///
/// let pages = Stack::new();
/// pages.push(builder(|_| h("main.home")));
/// pages.push(builder(|_| h("main.settings")));
/// pages.pop();
/// assert_eq!(pages.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Stack {
    builders: Rc<RefCell<Vec<Builder>>>,
    update: Signal<Option<Builder>>,
}

impl Stack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack seeded with one builder, without emitting.
    pub fn with_root(root: Builder) -> Self {
        let stack = Self::new();
        stack.builders.borrow_mut().push(root);
        stack
    }

    /// The signal emitting the new top after each change.
    pub fn update(&self) -> &Signal<Option<Builder>> {
        &self.update
    }

    /// Number of builders on the stack.
    pub fn count(&self) -> usize {
        self.builders.borrow().len()
    }

    /// The top builder, if any.
    pub fn top(&self) -> Option<Builder> {
        self.builders.borrow().last().cloned()
    }

    /// The bottom builder, if any.
    pub fn root(&self) -> Option<Builder> {
        self.builders.borrow().first().cloned()
    }

    /// Push `builder` and emit it as the new top.
    pub fn push(&self, builder: Builder) {
        self.builders.borrow_mut().push(builder);
        self.notify();
    }

    /// Replace the top builder in place. On an empty stack this pushes.
    pub fn splice(&self, builder: Builder) {
        {
            let mut builders = self.builders.borrow_mut();
            builders.pop();
            builders.push(builder);
        }
        self.notify();
    }

    /// Remove the top builder. Does nothing, and emits nothing, when empty.
    pub fn pop(&self) {
        if self.builders.borrow_mut().pop().is_some() {
            self.notify();
        }
    }

    /// Empty the stack, optionally re-seed it, and always emit.
    pub fn clear(&self, initial: Option<Builder>) {
        {
            let mut builders = self.builders.borrow_mut();
            builders.clear();
            builders.extend(initial);
        }
        self.notify();
    }

    fn notify(&self) {
        let top = self.top();
        self.update.emit(top);
    }
}
