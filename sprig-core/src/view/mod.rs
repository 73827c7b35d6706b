//! Bound Views
//!
//! A view is a child context whose subtree re-renders when something it
//! depends on changes. [`s`] is the single entry point: it takes the parent
//! context and a [`Dep`] describing what to bind, and returns the vnode to
//! place in the parent's tree.
//!
//! ```rust,no_run
//! use sprig_core::{h, s, Ctx, Dep, State, VNode};
//!
//! fn counter(cx: &Ctx, count: &State<u32>) -> VNode {
//!     h("div").child(s(cx, Dep::state(count, |_, n, _| h("span").text(n.to_string()))))
//! }
//! ```
//!
//! Every view subscribes with a weak handle to its own context and defers
//! the unsubscribe onto the parent. Clearing the parent destroys the view
//! and detaches it from its source in one step.

mod bind;
mod contained;
mod promise;
mod slots;

use std::future::Future;
use std::rc::Rc;

use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::reactive::{Shard, Signal, State};
use crate::render::{Ctx, VNode};
use crate::slot::{Anchor, Projector, Stack};

pub use bind::{multi_signal_view, shard_view, signal_view, state_view};
pub use contained::{contained_view, Rerender};
pub use promise::{promise_view, Settled};
pub use slots::{anchor_view, projector_view, stack_view};

/// Builder for value views: `(cx, current, previous)`.
///
/// `previous` is `None` on the initial render.
pub type ValueBuilder<T> = Rc<dyn Fn(&Ctx, &T, Option<&T>) -> VNode>;

/// Builder for signal views: `(cx, emitted)`, `None` on the initial render.
pub type SignalBuilder<A> = Rc<dyn Fn(&Ctx, Option<&A>) -> VNode>;

/// Builder for self-refreshing views.
pub type ContainedBuilder = Rc<dyn Fn(&Ctx, &Rerender) -> VNode>;

/// Builder for promise views.
pub type PromiseBuilder<T, E> = Rc<dyn Fn(&Ctx, Settled<&T, &E>) -> VNode>;

/// A future settling a promise view.
pub type Promise<T, E> = LocalBoxFuture<'static, Result<T, E>>;

/// What a view binds to.
///
/// `T` is the value, signal argument, or promise output; `E` is the promise
/// error. Variants that carry neither default both to `()`.
pub enum Dep<T: 'static = (), E: 'static = ()> {
    State(State<T>, ValueBuilder<T>),
    Shard(Shard<T>, ValueBuilder<T>),
    Signals(Vec<Signal<T>>, SignalBuilder<T>),
    Contained(ContainedBuilder),
    Projector(Projector),
    Anchor(Anchor),
    Stack(Stack),
    Promise(Promise<T, E>, PromiseBuilder<T, E>),
}

impl<T: 'static> Dep<T> {
    /// Re-render with every accepted change of `state`.
    pub fn state<F>(state: &State<T>, builder: F) -> Self
    where
        F: Fn(&Ctx, &T, Option<&T>) -> VNode + 'static,
    {
        Dep::State(state.clone(), Rc::new(builder))
    }

    /// Re-render whenever `shard` emits.
    pub fn shard<F>(shard: &Shard<T>, builder: F) -> Self
    where
        F: Fn(&Ctx, &T, Option<&T>) -> VNode + 'static,
    {
        Dep::Shard(shard.clone(), Rc::new(builder))
    }

    /// Re-render whenever `signal` fires.
    pub fn signal<F>(signal: &Signal<T>, builder: F) -> Self
    where
        F: Fn(&Ctx, Option<&T>) -> VNode + 'static,
    {
        Dep::Signals(vec![signal.clone()], Rc::new(builder))
    }

    /// Re-render when any of `signals` fires.
    pub fn signals<F>(signals: Vec<Signal<T>>, builder: F) -> Self
    where
        F: Fn(&Ctx, Option<&T>) -> VNode + 'static,
    {
        Dep::Signals(signals, Rc::new(builder))
    }
}

impl<T: 'static, E: 'static> Dep<T, E> {
    /// Render `Pending`, then the outcome of `promise`.
    pub fn promise<P, F>(promise: P, builder: F) -> Self
    where
        P: Future<Output = Result<T, E>> + 'static,
        F: Fn(&Ctx, Settled<&T, &E>) -> VNode + 'static,
    {
        Dep::Promise(promise.boxed_local(), Rc::new(builder))
    }
}

impl Dep {
    /// A view that re-renders through its [`Rerender`] handle.
    pub fn contained<F>(builder: F) -> Self
    where
        F: Fn(&Ctx, &Rerender) -> VNode + 'static,
    {
        Dep::Contained(Rc::new(builder))
    }

    /// Show whatever `projector` projects.
    pub fn projector(projector: &Projector) -> Self {
        Dep::Projector(projector.clone())
    }

    /// Show the current builder of `anchor`.
    pub fn anchor(anchor: &Anchor) -> Self {
        Dep::Anchor(anchor.clone())
    }

    /// Show the top of `stack`.
    pub fn stack(stack: &Stack) -> Self {
        Dep::Stack(stack.clone())
    }
}

/// Create a view of `dep` as a child of `parent`.
pub fn s<T, E>(parent: &Ctx, dep: Dep<T, E>) -> VNode
where
    T: Clone + 'static,
    E: 'static,
{
    match dep {
        Dep::State(state, builder) => state_view(parent, &state, builder),
        Dep::Shard(shard, builder) => shard_view(parent, &shard, builder),
        Dep::Signals(signals, builder) => multi_signal_view(parent, &signals, builder),
        Dep::Contained(builder) => contained_view(parent, builder),
        Dep::Projector(projector) => projector_view(parent, &projector),
        Dep::Anchor(anchor) => anchor_view(parent, &anchor),
        Dep::Stack(stack) => stack_view(parent, &stack),
        Dep::Promise(promise, builder) => promise_view(parent, promise, builder),
    }
}
