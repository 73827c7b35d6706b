//! Fixtures shared by unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::render::{Ctx, Document, Renderer, VNode};

/// A root context mounted on an in-memory document.
pub(crate) struct Fixture {
    pub document: Rc<RefCell<Document>>,
    pub root: Ctx,
    pub node: VNode,
}

impl Fixture {
    /// Build `builder` as a root and mount it on a fresh document.
    pub fn mount<F>(builder: F) -> Self
    where
        F: FnOnce(&Ctx) -> VNode,
    {
        let document = Rc::new(RefCell::new(Document::with_root("root")));
        let renderer = Renderer::new(document.clone(), Config::default());
        let (root, node) = Ctx::root(renderer.clone(), builder);
        renderer.mount(&node).expect("mount succeeds");
        Self { document, root, node }
    }

    /// HTML of the mounted root element.
    pub fn html(&self) -> String {
        let elm = self.node.elm().expect("root is mounted");
        self.document.borrow().to_html(elm)
    }
}
