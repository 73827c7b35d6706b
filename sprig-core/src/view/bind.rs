use std::rc::Rc;
use std::slice;

use crate::reactive::{Shard, Signal, State};
use crate::render::{comment, Ctx, VNode};

use super::{SignalBuilder, ValueBuilder};

/// Create a child of `parent` that rebuilds with `render` whenever one of
/// `signals` fires.
///
/// Rebuild listeners only hold a weak handle to the child. Their
/// unsubscribe is deferred onto `parent`.
pub(super) fn base_view<A, I, R>(parent: &Ctx, signals: &[Signal<A>], initial: I, render: R) -> VNode
where
    A: 'static,
    I: FnOnce(&Ctx) -> VNode,
    R: Fn(&Ctx, &A) -> VNode + 'static,
{
    let ctx = parent.spawn_child();
    let render = Rc::new(render);

    let unsubscribes = signals
        .iter()
        .map(|signal| {
            let weak = ctx.downgrade();
            let render = render.clone();
            signal.subscribe(move |args| {
                if let Some(ctx) = weak.upgrade() {
                    ctx.rebuild(|cx| render(cx, args));
                }
            })
        })
        .collect();
    parent.defer(Signal::<A>::bundle(unsubscribes));

    ctx.realize(initial)
}

/// View of a state, rebuilt on every accepted change.
pub fn state_view<T>(parent: &Ctx, state: &State<T>, builder: ValueBuilder<T>) -> VNode
where
    T: Clone + 'static,
{
    let current = state.get();
    let render = builder.clone();
    base_view(
        parent,
        slice::from_ref(state.changed()),
        move |cx| builder(cx, &current, None),
        move |cx, (curr, from): &(T, T)| render(cx, curr, Some(from)),
    )
}

/// View of a shard, rebuilt whenever the shard emits.
pub fn shard_view<T>(parent: &Ctx, shard: &Shard<T>, builder: ValueBuilder<T>) -> VNode
where
    T: Clone + 'static,
{
    let current = shard.get();
    let render = builder.clone();
    base_view(
        parent,
        slice::from_ref(shard.signal()),
        move |cx| builder(cx, &current, None),
        move |cx, (curr, from): &(T, T)| render(cx, curr, Some(from)),
    )
}

/// View rebuilt whenever `signal` fires.
pub fn signal_view<A>(parent: &Ctx, signal: &Signal<A>, builder: SignalBuilder<A>) -> VNode
where
    A: 'static,
{
    multi_signal_view(parent, slice::from_ref(signal), builder)
}

/// View rebuilt whenever any of `signals` fires, with that emission's
/// argument.
///
/// An empty list is a programming error: it is logged and rendered as a
/// comment, and no context is created.
pub fn multi_signal_view<A>(parent: &Ctx, signals: &[Signal<A>], builder: SignalBuilder<A>) -> VNode
where
    A: 'static,
{
    if signals.is_empty() {
        tracing::error!(parent = ?parent.id(), "signal view created without signals");
        return comment();
    }

    let render = builder.clone();
    base_view(
        parent,
        signals,
        move |cx| builder(cx, None),
        move |cx, args: &A| render(cx, Some(args)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::h;
    use crate::testing::Fixture;
    use std::cell::{Cell, RefCell};

    #[test]
    fn state_view_renders_current_then_changes() {
        let count = State::new(0);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_clone = calls.clone();
        let view: ValueBuilder<i32> = Rc::new(move |_, curr, from| {
            calls_clone.borrow_mut().push((*curr, from.copied()));
            h("span").text(curr.to_string())
        });

        let fixture = Fixture::mount(|cx| h("div").child(state_view(cx, &count, view)));
        assert_eq!(fixture.html(), "<div><span>0</span></div>");

        count.set(1);
        assert_eq!(fixture.html(), "<div><span>1</span></div>");
        count.set(1);
        assert_eq!(*calls.borrow(), vec![(0, None), (1, Some(0))]);
    }

    #[test]
    fn shard_view_follows_filtered_changes() {
        let page = State::new("home");
        let leaving = page.transition_from("home");
        let view: ValueBuilder<&str> =
            Rc::new(|_, curr, from| h("p").text(format!("{} from {}", curr, from.unwrap_or(&"none"))));

        let fixture = Fixture::mount(|cx| h("div").child(shard_view(cx, &leaving, view)));
        assert_eq!(fixture.html(), "<div><p>home from none</p></div>");

        page.set("about");
        assert_eq!(fixture.html(), "<div><p>about from home</p></div>");

        // Not leaving "home", so the shard stays quiet
        page.set("contact");
        assert_eq!(fixture.html(), "<div><p>about from home</p></div>");
    }

    #[test]
    fn multi_signal_view_rebuilds_on_any_signal() {
        let (a, b) = (Signal::<String>::new(), Signal::<String>::new());
        let view: SignalBuilder<String> =
            Rc::new(|_, args| h("p").text(args.cloned().unwrap_or_else(|| "idle".into())));

        let fixture = Fixture::mount(|cx| {
            h("div").child(multi_signal_view(cx, &[a.clone(), b.clone()], view))
        });
        assert_eq!(fixture.html(), "<div><p>idle</p></div>");

        a.emit("from a".into());
        assert_eq!(fixture.html(), "<div><p>from a</p></div>");
        b.emit("from b".into());
        assert_eq!(fixture.html(), "<div><p>from b</p></div>");
    }

    #[test]
    fn empty_signal_list_renders_comment_without_ctx() {
        let view: SignalBuilder<()> = Rc::new(|_, _| h("p"));
        let fixture = Fixture::mount(|cx| h("div").child(multi_signal_view(cx, &[], view)));

        assert_eq!(fixture.html(), "<div><!----></div>");
        assert_eq!(fixture.root.child_count(), 0);
        assert_eq!(fixture.root.deferred_count(), 0);
    }

    #[test]
    fn clearing_parent_unsubscribes() {
        let ping = Signal::<()>::new();
        let builds = Rc::new(Cell::new(0));
        let builds_clone = builds.clone();
        let view: SignalBuilder<()> = Rc::new(move |_, _| {
            builds_clone.set(builds_clone.get() + 1);
            h("p")
        });

        let fixture = Fixture::mount(|cx| h("div").child(signal_view(cx, &ping, view)));
        assert_eq!(ping.len(), 1);

        fixture.root.clear();
        assert!(ping.is_empty());
        ping.emit(());
        assert_eq!(builds.get(), 1);
    }

    #[test]
    fn nested_views_rebuild_independently() {
        let outer = State::new(0);
        let inner = State::new(0);
        let outer_builds = Rc::new(Cell::new(0));

        let inner_clone = inner.clone();
        let outer_builds_clone = outer_builds.clone();
        let outer_view: ValueBuilder<i32> = Rc::new(move |cx, n, _| {
            outer_builds_clone.set(outer_builds_clone.get() + 1);
            let inner_view: ValueBuilder<i32> = Rc::new(|_, m, _| h("b").text(m.to_string()));
            h("section")
                .child(h("i").text(n.to_string()))
                .child(state_view(cx, &inner_clone, inner_view))
        });

        let fixture = Fixture::mount(|cx| h("div").child(state_view(cx, &outer, outer_view)));

        inner.set(5);
        assert_eq!(outer_builds.get(), 1);
        assert_eq!(fixture.html(), "<div><section><i>0</i><b>5</b></section></div>");

        outer.set(1);
        assert_eq!(outer_builds.get(), 2);
        // The rebuilt outer view subscribed a fresh inner view
        assert_eq!(inner.changed().len(), 1);
        inner.set(6);
        assert_eq!(fixture.html(), "<div><section><i>1</i><b>6</b></section></div>");
    }
}
