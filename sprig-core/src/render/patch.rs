//! Patcher interface.
//!
//! A [`Patcher`] realizes virtual trees into some document and reconciles
//! an old tree into a new one. Contexts only ever talk to the document
//! through this trait.

use super::vnode::{ElementId, VNode};
use crate::error::PatchError;

/// A virtual-DOM reconciliation backend.
///
/// Implementations must follow these rules:
///
/// - `patch(old, new)` applies the minimal mutation turning the document
///   state described by `old` into `new`, and records the realized
///   elements on `new` (and its descendants) with [`VNode::set_elm`].
/// - `old` must stay usable after the call: the caller grafts `new` into it
///   and patches from it again later.
/// - Neither call may run application callbacks.
pub trait Patcher {
    /// Replace the element whose `id` attribute is `target_id` with `vnode`.
    fn mount(&mut self, target_id: &str, vnode: &VNode) -> Result<(), PatchError>;

    /// Reconcile `old` into `new`.
    fn patch(&mut self, old: &VNode, new: &VNode) -> Result<(), PatchError>;

    /// Whether `elm` is attached to the document.
    fn contains(&self, _elm: ElementId) -> bool {
        false
    }
}
