//! Rendering
//!
//! This module connects reactive state to a document: virtual nodes, the
//! [`Patcher`] interface and its in-memory [`Document`] implementation, and
//! the [`Ctx`] tree that rebuilds subtrees in place.
//!
//! # Rebuild Flow
//!
//! 1. A view's signal fires and its context rebuilds.
//!
//! 2. The context clears: child contexts are destroyed and deferred
//!    cleanups (including the children's signal subscriptions) run.
//!
//! 3. The builder runs again, producing a fresh vnode and fresh children.
//!
//! 4. The renderer patches the old vnode into the new one.
//!
//! 5. The new vnode is grafted into the old vnode object, which ancestors
//!    still reference from their own children.

mod ctx;
mod dom;
mod patch;
mod renderer;
mod timer;
mod vnode;

pub use ctx::{builder, Builder, Ctx, CtxId, WeakCtx};
pub use dom::{DomEvent, Document};
pub use patch::Patcher;
pub use renderer::{Renderer, SharedPatcher};
pub use timer::{Timer, MIN_INTERVAL};
pub use vnode::{comment, h, text, ElementId, EventHandler, VNode, VNodeData, COMMENT_SEL};
