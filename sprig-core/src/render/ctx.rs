//! Rendering Contexts
//!
//! A [`Ctx`] is a node in the tree of rendering contexts that mirrors the
//! stateful parts of the virtual-DOM tree. Each context owns:
//!
//! - the vnode it last realized,
//! - its child contexts, created while it was building,
//! - deferred cleanup callbacks, run the next time it clears.
//!
//! # Lifecycle
//!
//! A context is *live* while it holds a node and *destroyed* once the node is
//! gone. Destruction is terminal: rebuilding or destroying a destroyed
//! context logs a warning and does nothing.
//!
//! ```text
//!   create ──> live ──rebuild──> live
//!               │
//!               └──destroy──> destroyed
//! ```
//!
//! # Explicit Context Passing
//!
//! Builders receive the context being built as their first argument. Nested
//! stateful views take that context as their parent, which is how the tree
//! is assembled; there is no global "current context".

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use smallvec::SmallVec;

use super::renderer::Renderer;
use super::timer::Timer;
use super::vnode::VNode;
use crate::reactive::Cleanup;

/// A function from the active context to a vnode.
pub type Builder = Rc<dyn Fn(&Ctx) -> VNode>;

/// Wrap a closure as a [`Builder`].
pub fn builder<F>(f: F) -> Builder
where
    F: Fn(&Ctx) -> VNode + 'static,
{
    Rc::new(f)
}

/// Unique identifier for a context, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CtxId(u64);

impl CtxId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

struct CtxInner {
    id: CtxId,
    renderer: Rc<Renderer>,
    node: RefCell<Option<VNode>>,
    children: RefCell<SmallVec<[Ctx; 4]>>,
    deferred: RefCell<Vec<Cleanup>>,
}

/// A rendering context.
///
/// Cloning yields another handle to the same context.
#[derive(Clone)]
pub struct Ctx {
    inner: Rc<CtxInner>,
}

/// A non-owning handle to a [`Ctx`].
///
/// Listeners hold these so that a subscription never keeps its context
/// alive.
#[derive(Clone)]
pub struct WeakCtx(Weak<CtxInner>);

impl WeakCtx {
    /// The context, if it still exists.
    pub fn upgrade(&self) -> Option<Ctx> {
        self.0.upgrade().map(|inner| Ctx { inner })
    }
}

impl Ctx {
    fn new(renderer: Rc<Renderer>) -> Self {
        Self {
            inner: Rc::new(CtxInner {
                id: CtxId::new(),
                renderer,
                node: RefCell::new(None),
                children: RefCell::new(SmallVec::new()),
                deferred: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Create and build a parentless context.
    pub fn root<F>(renderer: Rc<Renderer>, builder: F) -> (Ctx, VNode)
    where
        F: FnOnce(&Ctx) -> VNode,
    {
        let ctx = Self::new(renderer);
        tracing::trace!(ctx = ?ctx.id(), "created root ctx");
        let node = ctx.realize(builder);
        (ctx, node)
    }

    /// Create and build a child of `parent`.
    ///
    /// `cleanup`, if any, is deferred onto the parent, so it runs when the
    /// parent clears and with it destroys the new context.
    pub fn create<F>(parent: &Ctx, builder: F, cleanup: Option<Cleanup>) -> (Ctx, VNode)
    where
        F: FnOnce(&Ctx) -> VNode,
    {
        let ctx = parent.spawn_child();
        if let Some(cleanup) = cleanup {
            parent.defer(cleanup);
        }
        let node = ctx.realize(builder);
        (ctx, node)
    }

    /// Register an unbuilt child context.
    pub(crate) fn spawn_child(&self) -> Ctx {
        let child = Self::new(Rc::clone(&self.inner.renderer));
        tracing::trace!(parent = ?self.id(), ctx = ?child.id(), "created ctx");
        self.inner.children.borrow_mut().push(child.clone());
        child
    }

    /// Build and store the initial node.
    pub(crate) fn realize<F>(&self, builder: F) -> VNode
    where
        F: FnOnce(&Ctx) -> VNode,
    {
        let node = self.build(builder);
        *self.inner.node.borrow_mut() = Some(node.clone());
        node
    }

    /// Identifier used in log events.
    pub fn id(&self) -> CtxId {
        self.inner.id
    }

    /// A weak handle to this context.
    pub fn downgrade(&self) -> WeakCtx {
        WeakCtx(Rc::downgrade(&self.inner))
    }

    /// The renderer shared by the whole tree.
    pub fn renderer(&self) -> &Rc<Renderer> {
        &self.inner.renderer
    }

    /// The realized node, or `None` once destroyed.
    pub fn node(&self) -> Option<VNode> {
        self.inner.node.borrow().clone()
    }

    /// Whether `destroy` has run.
    pub fn is_destroyed(&self) -> bool {
        self.inner.node.borrow().is_none()
    }

    /// Number of live child contexts.
    pub fn child_count(&self) -> usize {
        self.inner.children.borrow().len()
    }

    /// Number of callbacks waiting for the next clear.
    pub fn deferred_count(&self) -> usize {
        self.inner.deferred.borrow().len()
    }

    /// Run `builder` with this context as the active one.
    pub fn build<F>(&self, builder: F) -> VNode
    where
        F: FnOnce(&Ctx) -> VNode,
    {
        let _span = tracing::trace_span!("build", ctx = ?self.id()).entered();
        builder(self)
    }

    /// Tear down the current subtree, build a new one, and patch it in.
    ///
    /// Children and deferred callbacks are cleared before building. If the
    /// patch fails the error is logged and the rebuild is abandoned; the
    /// cleared state is not restored.
    pub fn rebuild<F>(&self, builder: F)
    where
        F: FnOnce(&Ctx) -> VNode,
    {
        let Some(old) = self.node() else {
            tracing::warn!(ctx = ?self.id(), "ctx attempted to rebuild after being destroyed");
            return;
        };

        self.clear();
        let new = self.build(builder);

        let renderer = &self.inner.renderer;
        match renderer.patch(&old, &new) {
            Ok(()) => old.graft(&new),
            Err(err) => {
                tracing::error!(ctx = ?self.id(), sel = ?new.sel(), %err, "error patching");
                if renderer.config().dump_on_patch_error {
                    tracing::error!(
                        old = %renderer.dump(&old),
                        new = %renderer.dump(&new),
                        "trees at patch failure"
                    );
                }
            }
        }
    }

    /// Destroy all children, depth-first, then run deferred callbacks in
    /// registration order.
    pub fn clear(&self) {
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.destroy();
        }

        let deferred = std::mem::take(&mut *self.inner.deferred.borrow_mut());
        for callback in deferred {
            callback();
        }
    }

    /// Clear and mark destroyed.
    pub fn destroy(&self) {
        if self.is_destroyed() {
            tracing::warn!(
                ctx = ?self.id(),
                "ctx destroyed after it has already been destroyed, or before it has initialized"
            );
            return;
        }

        self.clear();
        *self.inner.node.borrow_mut() = None;
        tracing::trace!(ctx = ?self.id(), "destroyed ctx");
    }

    /// Run `callback` the next time this context clears.
    pub fn defer<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.inner.deferred.borrow_mut().push(Box::new(callback));
    }

    /// Run every callback the next time this context clears.
    pub fn defer_all(&self, callbacks: impl IntoIterator<Item = Cleanup>) {
        self.inner.deferred.borrow_mut().extend(callbacks);
    }

    /// Run `callback` after `delay`, unless this context clears first.
    pub fn timeout<F>(&self, delay: Duration, callback: F) -> Timer
    where
        F: FnOnce() + 'static,
    {
        let timer = Timer::timeout(delay, callback);
        self.defer(timer.canceller());
        timer
    }

    /// Run `callback` every `period` until this context clears.
    pub fn interval<F>(&self, period: Duration, callback: F) -> Timer
    where
        F: FnMut() + 'static,
    {
        let timer = Timer::interval(period, callback);
        self.defer(timer.canceller());
        timer
    }
}

impl Debug for Ctx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ctx")
            .field("id", &self.inner.id)
            .field("destroyed", &self.is_destroyed())
            .field("child_count", &self.child_count())
            .field("deferred_count", &self.deferred_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
