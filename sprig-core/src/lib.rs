//! Sprig Core
//!
//! This crate provides a small reactive layer over a virtual-DOM patcher.
//! It implements:
//!
//! - Reactive primitives (signals, states, shards)
//! - A tree of rendering contexts with scoped cleanup
//! - Bound views that rebuild and patch only their own subtree
//! - Content slots (projectors, anchors, stacks)
//! - An in-memory document that reconciles virtual trees
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `reactive`: Signals, states and derived shards
//! - `render`: Virtual nodes, the patcher interface, contexts and timers
//! - `slot`: Swappable content holders
//! - `view`: The [`s`] dispatcher and the views it creates
//!
//! Everything is single-threaded. Async work (timers, promise views) runs on
//! a tokio `LocalSet`.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use sprig_core::{h, mount, s, Config, Dep, Document, State};
//!
//! let document = Rc::new(RefCell::new(Document::with_root("root")));
//! let count = State::new(0);
//!
//! let view_count = count.clone();
//! let mounted = mount(document.clone(), Config::default(), move |cx| {
//!     h("div").child(s(cx, Dep::state(&view_count, |_, n, _| h("span").text(n.to_string()))))
//! })
//! .unwrap();
//!
//! // Only the span's context rebuilds
//! count.set(5);
//! let html = document.borrow().to_html(mounted.node().elm().unwrap());
//! assert_eq!(html, "<div><span>5</span></div>");
//! ```

pub mod config;
pub mod error;
pub mod reactive;
pub mod render;
pub mod slot;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{ConfigError, MountError, PatchError};
pub use reactive::{Cleanup, Shard, Signal, State};
pub use render::{
    builder, comment, h, text, Builder, Ctx, DomEvent, Document, Patcher, Renderer, SharedPatcher,
    Timer, VNode,
};
pub use slot::{Anchor, Projector, Stack};
pub use view::{s, Dep, Rerender, Settled};

/// A root view attached to its document.
///
/// Dropping it destroys the root context, which detaches every view and
/// cancels their timers and promises. Keep it alive for as long as the view
/// should stay reactive.
#[derive(Debug)]
#[must_use = "dropping `Mounted` destroys the view tree"]
pub struct Mounted {
    ctx: Ctx,
    node: VNode,
}

impl Mounted {
    /// The root context.
    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    /// The root vnode, kept current across root rebuilds.
    pub fn node(&self) -> &VNode {
        &self.node
    }

    /// Destroy the root context, tearing down every view and subscription.
    ///
    /// The document is left as it is.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if !self.ctx.is_destroyed() {
            self.ctx.destroy();
        }
    }
}

/// Build a root view and mount it over the element with `config.root_id`.
///
/// If mounting fails, the freshly built context is destroyed before the
/// error is returned, so no view stays subscribed.
pub fn mount<F>(patcher: SharedPatcher, config: Config, builder: F) -> Result<Mounted, MountError>
where
    F: FnOnce(&Ctx) -> VNode,
{
    let renderer = Renderer::new(patcher, config);
    let (ctx, node) = Ctx::root(renderer.clone(), builder);

    if let Err(err) = renderer.mount(&node) {
        let err = MountError::from(err);
        tracing::error!(root_id = %renderer.config().root_id, %err, "error mounting");
        ctx.destroy();
        return Err(err);
    }

    tracing::debug!(root_id = %renderer.config().root_id, ctx = ?ctx.id(), "mounted");
    Ok(Mounted { ctx, node })
}
