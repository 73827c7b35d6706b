//! Renderer
//!
//! The renderer couples a [`Patcher`] with the [`Config`] of a mounted tree.
//! Every context in the tree holds the same `Rc<Renderer>`, which is how a
//! deeply nested context finds the document when it rebuilds.

use std::cell::RefCell;
use std::rc::Rc;

use super::patch::Patcher;
use super::vnode::VNode;
use crate::config::Config;
use crate::error::PatchError;

/// Shared handle to a patcher.
pub type SharedPatcher = Rc<RefCell<dyn Patcher>>;

/// The patcher and configuration shared by a tree of contexts.
pub struct Renderer {
    patcher: SharedPatcher,
    config: Config,
}

impl Renderer {
    /// Create a renderer shared by one tree.
    pub fn new(patcher: SharedPatcher, config: Config) -> Rc<Self> {
        Rc::new(Self { patcher, config })
    }

    /// The tree's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mount `vnode` onto the configured root element.
    pub fn mount(&self, vnode: &VNode) -> Result<(), PatchError> {
        let mut patcher = self.patcher.try_borrow_mut().map_err(|_| PatchError::Busy)?;
        patcher.mount(&self.config.root_id, vnode)
    }

    /// Reconcile `old` into `new`.
    pub fn patch(&self, old: &VNode, new: &VNode) -> Result<(), PatchError> {
        let mut patcher = self.patcher.try_borrow_mut().map_err(|_| PatchError::Busy)?;
        patcher.patch(old, new)
    }

    /// Outline of `vnode`, marking attached elements when the patcher is free.
    pub fn dump(&self, vnode: &VNode) -> String {
        match self.patcher.try_borrow() {
            Ok(patcher) => vnode.dump_with(&|elm| patcher.contains(elm)),
            Err(_) => vnode.dump(),
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
