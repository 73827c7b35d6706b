use std::rc::Rc;
use std::slice;

use crate::render::{comment, Builder, Ctx, VNode};
use crate::slot::{Anchor, Projector, Stack};

use super::bind::{base_view, state_view};

/// Render the projector's initial builder, then every builder it projects.
pub fn projector_view(parent: &Ctx, projector: &Projector) -> VNode {
    let initial = projector.initial();
    base_view(
        parent,
        slice::from_ref(projector.update()),
        move |cx| initial(cx),
        |cx, builder: &Builder| builder(cx),
    )
}

/// Render the anchor's current builder.
pub fn anchor_view(parent: &Ctx, anchor: &Anchor) -> VNode {
    state_view(parent, anchor.state(), Rc::new(render_builder))
}

fn render_builder(cx: &Ctx, builder: &Builder, _from: Option<&Builder>) -> VNode {
    builder(cx)
}

/// Render the top of the stack, or a comment while it is empty.
pub fn stack_view(parent: &Ctx, stack: &Stack) -> VNode {
    let top = stack.top();
    base_view(
        parent,
        slice::from_ref(stack.update()),
        move |cx| render_top(cx, top.as_ref()),
        |cx, top: &Option<Builder>| render_top(cx, top.as_ref()),
    )
}

fn render_top(cx: &Ctx, top: Option<&Builder>) -> VNode {
    match top {
        Some(builder) => builder(cx),
        None => comment(),
    }
}
