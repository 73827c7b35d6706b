//! Promise views.
//!
//! The future runs as a local task on the current tokio `LocalSet`. The
//! view renders [`Settled::Pending`] immediately and rebuilds once with the
//! outcome. Clearing the parent aborts the task, so an outcome that arrives
//! after the view is gone is never rendered.

use crate::render::{Ctx, VNode};

use super::{Promise, PromiseBuilder};

/// Progress of a promise, as seen by a promise view's builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled<T, E> {
    Pending,
    Ok(T),
    Err(E),
}

impl<T, E> Settled<T, E> {
    /// Whether the promise has not settled yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, Settled::Pending)
    }
}

impl<'a, T, E> From<&'a Result<T, E>> for Settled<&'a T, &'a E> {
    fn from(result: &'a Result<T, E>) -> Self {
        match result {
            Ok(value) => Settled::Ok(value),
            Err(err) => Settled::Err(err),
        }
    }
}

/// View of a promise.
///
/// Must be called inside a `LocalSet`.
pub fn promise_view<T, E>(parent: &Ctx, promise: Promise<T, E>, builder: PromiseBuilder<T, E>) -> VNode
where
    T: 'static,
    E: 'static,
{
    let ctx = parent.spawn_child();

    let weak = ctx.downgrade();
    let render = builder.clone();
    let task = tokio::task::spawn_local(async move {
        let result = promise.await;
        if let Some(ctx) = weak.upgrade() {
            ctx.rebuild(|cx| render(cx, Settled::from(&result)));
        }
    });
    let abort = task.abort_handle();
    parent.defer(move || abort.abort());

    ctx.realize(|cx| builder(cx, Settled::Pending))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::h;
    use crate::testing::Fixture;
    use futures_util::FutureExt;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::task::LocalSet;

    fn status() -> PromiseBuilder<u32, String> {
        Rc::new(|_, settled| match settled {
            Settled::Pending => h("p").text("pending"),
            Settled::Ok(n) => h("p").text(format!("ok {n}")),
            Settled::Err(err) => h("p.error").text(err.clone()),
        })
    }

    fn after(delay: u64, result: Result<u32, String>) -> Promise<u32, String> {
        async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            result
        }
        .boxed_local()
    }

    #[tokio::test(start_paused = true)]
    async fn renders_pending_then_ok() {
        LocalSet::new()
            .run_until(async {
                let fixture =
                    Fixture::mount(|cx| h("div").child(promise_view(cx, after(10, Ok(7)), status())));
                assert_eq!(fixture.html(), "<div><p>pending</p></div>");

                tokio::time::sleep(Duration::from_millis(20)).await;
                assert_eq!(fixture.html(), "<div><p>ok 7</p></div>");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn renders_err() {
        LocalSet::new()
            .run_until(async {
                let fixture = Fixture::mount(|cx| {
                    h("div").child(promise_view(cx, after(10, Err("offline".into())), status()))
                });

                tokio::time::sleep(Duration::from_millis(20)).await;
                assert_eq!(fixture.html(), "<div><p class=\"error\">offline</p></div>");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_parent_cancels_promise() {
        LocalSet::new()
            .run_until(async {
                let polled_to_end = Rc::new(Cell::new(false));
                let polled_clone = polled_to_end.clone();
                let promise = async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    polled_clone.set(true);
                    Ok::<u32, String>(1)
                }
                .boxed_local();

                let fixture = Fixture::mount(|cx| h("div").child(promise_view(cx, promise, status())));
                fixture.root.clear();

                tokio::time::sleep(Duration::from_millis(20)).await;
                assert!(!polled_to_end.get());
                assert_eq!(fixture.html(), "<div><p>pending</p></div>");
            })
            .await;
    }

    #[test]
    fn settled_from_result() {
        let ok: Result<u32, ()> = Ok(3);
        assert_eq!(Settled::from(&ok), Settled::Ok(&3));
        assert!(Settled::<u32, ()>::Pending.is_pending());
    }
}
