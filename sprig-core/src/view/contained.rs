use crate::render::{Ctx, VNode, WeakCtx};

use super::ContainedBuilder;

/// Handle that re-renders a contained view on demand.
#[derive(Clone)]
pub struct Rerender {
    ctx: WeakCtx,
    builder: ContainedBuilder,
}

impl Rerender {
    /// Rebuild the view. Does nothing once the view is gone.
    pub fn rerender(&self) {
        if let Some(ctx) = self.ctx.upgrade() {
            let builder = self.builder.clone();
            ctx.rebuild(|cx| builder(cx, self));
        }
    }
}

/// A view that refreshes itself through the [`Rerender`] handed to its
/// builder, rather than through a signal.
pub fn contained_view(parent: &Ctx, builder: ContainedBuilder) -> VNode {
    let ctx = parent.spawn_child();
    let rerender = Rerender {
        ctx: ctx.downgrade(),
        builder: builder.clone(),
    };
    ctx.realize(|cx| builder(cx, &rerender))
}
