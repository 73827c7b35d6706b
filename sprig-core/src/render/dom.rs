//! In-Memory Document
//!
//! [`Document`] is an arena-backed DOM that implements [`Patcher`]. It is the
//! reference backend: headless rendering, server-side snapshots, and tests.
//!
//! # Reconciliation
//!
//! Patching follows the usual virtual-DOM rules:
//!
//! 1. Two vnodes are the *same* when their selector and key match. Same
//!    vnodes are patched in place: the element keeps its identity, its data
//!    is replaced, and its children are reconciled recursively.
//!
//! 2. Different vnodes are replaced wholesale: a fresh element is created
//!    for the new vnode, inserted where the old one was, and the old subtree
//!    is freed.
//!
//! 3. Children are matched greedily: each new child takes the first unused
//!    old child that is the same vnode. Unmatched old children are freed.
//!
//! # Events
//!
//! Listeners attached with [`VNode::on`](super::VNode::on) are copied onto
//! elements. [`Document::dispatch`] delivers an event to the target and its
//! ancestors, then to the document-level [`Signal`] for that event kind.

use std::cell::RefCell;
use std::fmt::Write as _;

use indexmap::IndexMap;

use super::patch::Patcher;
use super::vnode::{parse_selector, ElementId, EventHandler, VNode};
use crate::error::PatchError;
use crate::reactive::Signal;

/// An event delivered through [`Document::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: String,
    pub target: ElementId,
    /// Key name for keyboard events.
    pub key: Option<String>,
}

impl DomEvent {
    /// An event of `kind` aimed at `target`.
    pub fn new(kind: impl Into<String>, target: ElementId) -> Self {
        Self {
            kind: kind.into(),
            target,
            key: None,
        }
    }

    /// Attach a key name, for keyboard events.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

#[derive(Default)]
struct ElementData {
    tag: String,
    attrs: IndexMap<String, String>,
    classes: Vec<String>,
    style: IndexMap<String, String>,
    listeners: IndexMap<String, EventHandler>,
}

enum NodeKind {
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// An arena slot. The generation is bumped every time the slot is vacated.
#[derive(Default)]
struct Slot {
    generation: u32,
    node: Option<DomNode>,
}

struct DomNode {
    kind: NodeKind,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl DomNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An in-memory document.
pub struct Document {
    /// Arena of nodes. Vacant slots are listed in `vacant` and reused.
    nodes: Vec<Slot>,
    vacant: Vec<usize>,

    body: ElementId,

    /// Document-level signals, one per event kind.
    event_signals: IndexMap<String, Signal<DomEvent>>,
}

impl Document {
    /// Create a document holding an empty `body`.
    pub fn new() -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            body: ElementId::new(0),
            event_signals: IndexMap::new(),
        };
        document.body = document.create_element("body");
        document
    }

    /// Create a document whose body holds one `div` with the given id.
    pub fn with_root(root_id: &str) -> Self {
        let mut document = Self::new();
        let root = document.create_element("div");
        document.set_attribute_unchecked(root, "id", root_id);
        document.attach(document.body, root);
        document
    }

    /// The `body` element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.alloc(NodeKind::Element(ElementData {
            tag: tag.to_owned(),
            ..ElementData::default()
        }))
    }

    /// Append `child` to `parent`, detaching it from its current parent.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), PatchError> {
        self.node(parent)?;
        self.node(child)?;
        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    /// Set an attribute on an element.
    pub fn set_attribute(&mut self, elm: ElementId, name: &str, value: &str) -> Result<(), PatchError> {
        self.node(elm)?;
        self.set_attribute_unchecked(elm, name, value);
        Ok(())
    }

    fn set_attribute_unchecked(&mut self, elm: ElementId, name: &str, value: &str) {
        if let Some(NodeKind::Element(data)) = self.slot_mut(elm).map(|node| &mut node.kind) {
            data.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Find an attached element by its `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let mut pending = vec![self.body];
        while let Some(elm) = pending.pop() {
            let node = self.slot(elm)?;
            if let NodeKind::Element(data) = &node.kind {
                if data.attrs.get("id").map(String::as_str) == Some(id) {
                    return Some(elm);
                }
            }
            pending.extend(node.children.iter().rev());
        }
        None
    }

    /// The parent of `elm`, if attached.
    pub fn parent(&self, elm: ElementId) -> Option<ElementId> {
        self.slot(elm)?.parent
    }

    /// The children of `elm`, in order.
    pub fn child_nodes(&self, elm: ElementId) -> Vec<ElementId> {
        self.slot(elm).map(|node| node.children.clone()).unwrap_or_default()
    }

    /// The tag name of an element.
    pub fn tag(&self, elm: ElementId) -> Option<&str> {
        match &self.slot(elm)?.kind {
            NodeKind::Element(data) => Some(&data.tag),
            _ => None,
        }
    }

    /// An attribute value of an element.
    pub fn attribute(&self, elm: ElementId, name: &str) -> Option<&str> {
        match &self.slot(elm)?.kind {
            NodeKind::Element(data) => data.attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Whether an element carries `class`.
    pub fn has_class(&self, elm: ElementId, class: &str) -> bool {
        match self.slot(elm).map(|node| &node.kind) {
            Some(NodeKind::Element(data)) => data.classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, elm: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(elm, &mut out);
        out
    }

    fn collect_text(&self, elm: ElementId, out: &mut String) {
        let Some(node) = self.slot(elm) else { return };
        if let NodeKind::Text(text) = &node.kind {
            out.push_str(text);
        }
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    /// Serialize a subtree as HTML.
    pub fn to_html(&self, elm: ElementId) -> String {
        let mut out = String::new();
        self.write_html(elm, &mut out);
        out
    }

    fn write_html(&self, elm: ElementId, out: &mut String) {
        let Some(node) = self.slot(elm) else { return };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            NodeKind::Element(data) => {
                let _ = write!(out, "<{}", data.tag);
                for (name, value) in &data.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape(value, true));
                }
                if !data.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&data.classes.join(" "), true));
                }
                if !data.style.is_empty() {
                    let style = data
                        .style
                        .iter()
                        .map(|(property, value)| format!("{property}: {value}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    let _ = write!(out, " style=\"{}\"", escape(&style, true));
                }
                out.push('>');
                for child in &node.children {
                    self.write_html(*child, out);
                }
                let _ = write!(out, "</{}>", data.tag);
            }
        }
    }

    /// Number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Number of arena slots, live or vacant.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// The document-level signal for events of `kind`.
    pub fn event_signal(&mut self, kind: &str) -> Signal<DomEvent> {
        self.event_signals.entry(kind.to_owned()).or_default().clone()
    }

    /// The document-level `keydown` signal.
    pub fn keydown(&mut self) -> Signal<DomEvent> {
        self.event_signal("keydown")
    }

    /// The document-level `keyup` signal.
    pub fn keyup(&mut self) -> Signal<DomEvent> {
        self.event_signal("keyup")
    }

    /// Deliver `event` to its target, the target's ancestors, and finally
    /// the document-level signal for its kind.
    ///
    /// Handlers run after the document borrow is released, so they may
    /// freely trigger rebuilds. Returns whether any element listener ran.
    pub fn dispatch(document: &RefCell<Document>, event: DomEvent) -> bool {
        let (handlers, signal) = {
            let document = document.borrow();
            let mut handlers = Vec::new();
            let mut cursor = Some(event.target);
            while let Some(elm) = cursor {
                let Some(node) = document.slot(elm) else { break };
                if let NodeKind::Element(data) = &node.kind {
                    if let Some(handler) = data.listeners.get(&event.kind) {
                        handlers.push(handler.clone());
                    }
                }
                cursor = node.parent;
            }
            (handlers, document.event_signals.get(&event.kind).cloned())
        };

        let handled = !handlers.is_empty();
        for handler in handlers {
            handler(&event);
        }
        if let Some(signal) = signal {
            signal.emit(event);
        }
        handled
    }

    // ------------------------------------------------------------------
    // Arena plumbing
    // ------------------------------------------------------------------

    fn alloc(&mut self, kind: NodeKind) -> ElementId {
        let index = match self.vacant.pop() {
            Some(index) => index,
            None => {
                self.nodes.push(Slot::default());
                self.nodes.len() - 1
            }
        };
        let slot = &mut self.nodes[index];
        slot.node = Some(DomNode::new(kind));
        ElementId::with_generation(index, slot.generation)
    }

    fn slot(&self, elm: ElementId) -> Option<&DomNode> {
        self.nodes
            .get(elm.raw())
            .filter(|slot| slot.generation == elm.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    fn slot_mut(&mut self, elm: ElementId) -> Option<&mut DomNode> {
        self.nodes
            .get_mut(elm.raw())
            .filter(|slot| slot.generation == elm.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    fn node(&self, elm: ElementId) -> Result<&DomNode, PatchError> {
        self.slot(elm).ok_or(PatchError::MissingElement(elm))
    }

    fn attach(&mut self, parent: ElementId, child: ElementId) {
        if let Some(node) = self.slot_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.slot_mut(parent) {
            node.children.push(child);
        }
    }

    fn detach(&mut self, child: ElementId) {
        let Some(parent) = self.slot_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(node) = self.slot_mut(parent) {
            node.children.retain(|c| *c != child);
        }
    }

    /// Free a subtree. The caller fixes up the parent's children.
    fn free(&mut self, elm: ElementId) {
        let Some(slot) = self
            .nodes
            .get_mut(elm.raw())
            .filter(|slot| slot.generation == elm.generation() && slot.node.is_some())
        else {
            return;
        };
        let node = slot.node.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(elm.raw());

        for child in node.into_iter().flat_map(|node| node.children) {
            self.free(child);
        }
    }

    fn replace_child(&mut self, old: ElementId, new: ElementId) -> Result<(), PatchError> {
        let parent = self.node(old)?.parent.ok_or(PatchError::Detached(old))?;
        let parent_node = self.slot_mut(parent).ok_or(PatchError::MissingElement(parent))?;
        let position = parent_node
            .children
            .iter()
            .position(|c| *c == old)
            .ok_or(PatchError::Detached(old))?;
        parent_node.children[position] = new;
        if let Some(node) = self.slot_mut(new) {
            node.parent = Some(parent);
        }
        self.free(old);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    fn create_from(&mut self, vnode: &VNode) -> ElementId {
        let elm = match vnode.sel() {
            None => self.alloc(NodeKind::Text(vnode.get_text().unwrap_or_default())),
            Some(_) if vnode.is_comment() => {
                self.alloc(NodeKind::Comment(vnode.get_text().unwrap_or_default()))
            }
            Some(sel) => {
                let (tag, _, _) = parse_selector(&sel);
                let elm = self.create_element(tag);
                self.apply_data(elm, vnode);
                match vnode.get_text() {
                    Some(text) => {
                        let text = self.alloc(NodeKind::Text(text));
                        self.attach(elm, text);
                    }
                    None => {
                        for child in vnode.children_handles() {
                            let child = self.create_from(&child);
                            self.attach(elm, child);
                        }
                    }
                }
                elm
            }
        };
        vnode.set_elm(Some(elm));
        elm
    }

    /// Overwrite an element's data with the vnode's selector and data.
    fn apply_data(&mut self, elm: ElementId, vnode: &VNode) {
        let sel = vnode.sel().unwrap_or_default();
        let (_, id, sel_classes) = parse_selector(&sel);
        let data = vnode.data();

        let mut attrs = IndexMap::new();
        if let Some(id) = id {
            attrs.insert(String::from("id"), id.to_owned());
        }
        attrs.extend(data.attrs);

        let mut classes: Vec<String> = sel_classes.into_iter().map(str::to_owned).collect();
        for (class, enabled) in data.class {
            if enabled && !classes.contains(&class) {
                classes.push(class);
            }
        }

        if let Some(NodeKind::Element(element)) = self.slot_mut(elm).map(|node| &mut node.kind) {
            element.attrs = attrs;
            element.classes = classes;
            element.style = data.style;
            element.listeners = data.on;
        }
    }

    fn set_text_content(&mut self, elm: ElementId, text: String) {
        let children = self
            .slot_mut(elm)
            .map(|node| std::mem::take(&mut node.children))
            .unwrap_or_default();
        for child in children {
            self.free(child);
        }
        let text = self.alloc(NodeKind::Text(text));
        self.attach(elm, text);
    }

    /// Patch two same vnodes, returning the shared element.
    fn patch_vnode(&mut self, old: &VNode, new: &VNode) -> Result<ElementId, PatchError> {
        let elm = old.elm().ok_or_else(|| PatchError::Unmounted {
            sel: old.sel().unwrap_or_default(),
        })?;
        self.node(elm)?;
        new.set_elm(Some(elm));
        if old.ptr_eq(new) {
            return Ok(elm);
        }

        if new.is_text() {
            let text = new.get_text().unwrap_or_default();
            if let Some(NodeKind::Text(current)) = self.slot_mut(elm).map(|node| &mut node.kind) {
                if *current != text {
                    *current = text;
                }
            }
            return Ok(elm);
        }
        if new.is_comment() {
            return Ok(elm);
        }

        self.apply_data(elm, new);
        match (old.get_text(), new.get_text()) {
            (old_text, Some(new_text)) => {
                if old_text.as_ref() != Some(&new_text) {
                    self.set_text_content(elm, new_text);
                }
            }
            // The old text node is not matched, so it is freed as stale
            (Some(_), None) => {
                self.update_children(elm, &[], &new.children_handles())?;
            }
            (None, None) => {
                self.update_children(elm, &old.children_handles(), &new.children_handles())?;
            }
        }
        Ok(elm)
    }

    fn update_children(&mut self, parent: ElementId, old: &[VNode], new: &[VNode]) -> Result<(), PatchError> {
        let mut pool: Vec<Option<&VNode>> = old.iter().map(Some).collect();
        let mut realized = Vec::with_capacity(new.len());

        for child in new {
            let matched = pool
                .iter_mut()
                .find(|slot| slot.is_some_and(|o| o.elm().is_some() && o.same_vnode(child)))
                .and_then(Option::take);
            let elm = match matched {
                Some(old_child) => self.patch_vnode(old_child, child)?,
                None => self.create_from(child),
            };
            realized.push(elm);
        }

        // Unmatched old children, plus anything else still hanging here
        let stale: Vec<ElementId> = self
            .node(parent)?
            .children
            .iter()
            .copied()
            .filter(|c| !realized.contains(c))
            .collect();
        for elm in stale {
            self.free(elm);
        }

        for elm in &realized {
            if let Some(node) = self.slot_mut(*elm) {
                node.parent = Some(parent);
            }
        }
        if let Some(node) = self.slot_mut(parent) {
            node.children = realized;
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Patcher for Document {
    fn mount(&mut self, target_id: &str, vnode: &VNode) -> Result<(), PatchError> {
        let target = self
            .element_by_id(target_id)
            .ok_or_else(|| PatchError::MissingTarget(target_id.to_owned()))?;
        self.node(target)?.parent.ok_or(PatchError::Detached(target))?;
        let created = self.create_from(vnode);
        self.replace_child(target, created)
    }

    fn patch(&mut self, old: &VNode, new: &VNode) -> Result<(), PatchError> {
        let elm = old.elm().ok_or_else(|| PatchError::Unmounted {
            sel: old.sel().unwrap_or_default(),
        })?;
        self.node(elm)?;

        if old.same_vnode(new) {
            self.patch_vnode(old, new)?;
        } else {
            self.node(elm)?.parent.ok_or(PatchError::Detached(elm))?;
            let created = self.create_from(new);
            self.replace_child(elm, created)?;
        }
        Ok(())
    }

    fn contains(&self, elm: ElementId) -> bool {
        let mut cursor = Some(elm);
        while let Some(current) = cursor {
            if current == self.body {
                return true;
            }
            cursor = self.slot(current).and_then(|node| node.parent);
        }
        false
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::vnode::{comment, h, text};
    use std::cell::Cell;
    use std::rc::Rc;

    fn mounted(vnode: &VNode) -> Document {
        let mut document = Document::with_root("root");
        document.mount("root", vnode).expect("mount succeeds");
        document
    }

    #[test]
    fn mount_replaces_target() {
        let vnode = h("main#app.shell").child(h("p").text("hello"));
        let document = mounted(&vnode);

        let elm = vnode.elm().expect("realized");
        assert!(document.contains(elm));
        assert!(document.element_by_id("root").is_none());
        assert_eq!(document.element_by_id("app"), Some(elm));
        assert_eq!(
            document.to_html(document.body()),
            "<body><main id=\"app\" class=\"shell\"><p>hello</p></main></body>"
        );
    }

    #[test]
    fn mount_missing_target() {
        let mut document = Document::new();
        let err = document.mount("nowhere", &h("div")).unwrap_err();
        assert!(matches!(err, PatchError::MissingTarget(id) if id == "nowhere"));
    }

    #[test]
    fn patch_same_vnode_keeps_element() {
        let old = h("div#app").child(h("span").text("a"));
        let mut document = mounted(&old);
        let elm = old.elm().unwrap();

        let new = h("div#app").attr("title", "t").child(h("span").text("b"));
        document.patch(&old, &new).expect("patch succeeds");

        assert_eq!(new.elm(), Some(elm));
        assert_eq!(document.attribute(elm, "title"), Some("t"));
        assert_eq!(document.text_content(elm), "b");
    }

    #[test]
    fn patch_different_vnode_replaces_element() {
        let old = h("div#app").child(h("p").text("x"));
        let mut document = mounted(&old);
        let before = document.node_count();

        let new = h("section#app").child(h("p").text("x"));
        document.patch(&old, &new).expect("patch succeeds");

        let old_elm = old.elm().unwrap();
        let new_elm = new.elm().unwrap();
        assert_ne!(old_elm, new_elm);
        assert!(!document.contains(old_elm));
        assert!(document.contains(new_elm));
        assert_eq!(document.tag(new_elm), Some("section"));
        // The old subtree is freed
        assert_eq!(document.node_count(), before);
    }

    #[test]
    fn keyed_children_are_reused() {
        let old = h("ul#list")
            .child(h("li").key("a").text("A"))
            .child(h("li").key("b").text("B"));
        let mut document = mounted(&old);
        let b_elm = old.children_handles()[1].elm().unwrap();

        let new = h("ul#list")
            .child(h("li").key("b").text("B"))
            .child(h("li").key("c").text("C"));
        document.patch(&old, &new).expect("patch succeeds");

        let list = new.elm().unwrap();
        assert_eq!(new.children_handles()[0].elm(), Some(b_elm));
        assert_eq!(document.child_nodes(list).len(), 2);
        assert_eq!(document.text_content(list), "BC");
    }

    #[test]
    fn text_and_comment_nodes() {
        let old = h("div#app").child(text("one")).child(comment());
        let mut document = mounted(&old);

        let new = h("div#app").child(text("two")).child(comment());
        document.patch(&old, &new).expect("patch succeeds");

        let app = new.elm().unwrap();
        assert_eq!(document.to_html(app), "<div id=\"app\">two<!----></div>");
    }

    #[test]
    fn element_text_switches_to_children() {
        let old = h("p#t").text("plain");
        let mut document = mounted(&old);

        let new = h("p#t").child(h("b").text("bold"));
        document.patch(&old, &new).expect("patch succeeds");

        assert_eq!(document.to_html(new.elm().unwrap()), "<p id=\"t\"><b>bold</b></p>");
    }

    #[test]
    fn patch_unmounted_vnode_fails() {
        let mut document = Document::with_root("root");
        let err = document.patch(&h("div"), &h("div")).unwrap_err();
        assert!(matches!(err, PatchError::Unmounted { .. }));
    }

    #[test]
    fn patch_freed_element_fails() {
        let old = h("div#app").child(h("p"));
        let mut document = mounted(&old);
        let stale = old.children_handles()[0].clone();

        document.patch(&old, &h("div#app")).expect("patch succeeds");
        let err = document.patch(&stale, &h("p")).unwrap_err();
        assert!(matches!(err, PatchError::MissingElement(_)));
    }

    #[test]
    fn reused_slot_rejects_stale_id() {
        let old = h("div#app").child(h("p"));
        let mut document = mounted(&old);
        let stale = old.children_handles()[0].clone();
        let stale_elm = stale.elm().expect("realized");

        let emptied = h("div#app");
        document.patch(&old, &emptied).expect("patch succeeds");

        // The most recently freed slot, the `p`'s, goes to the new `span`
        let new = h("div#app").child(h("span"));
        document.patch(&emptied, &new).expect("patch succeeds");
        let span_elm = new.children_handles()[0].elm().expect("realized");
        assert_eq!(span_elm.raw(), stale_elm.raw());
        assert_ne!(span_elm, stale_elm);

        assert!(!document.contains(stale_elm));
        assert!(matches!(
            document.patch(&stale, &h("p")),
            Err(PatchError::MissingElement(_))
        ));
        assert_eq!(document.tag(span_elm), Some("span"));
    }

    #[test]
    fn repeated_patches_keep_arena_bounded() {
        let mut current = h("div#app").child(h("p").text("0"));
        let mut document = mounted(&current);
        let slots = document.slot_count();

        for tick in 1..1000 {
            let next = h("div#app").child(h("p").text(tick.to_string()));
            document.patch(&current, &next).expect("patch succeeds");
            current = next;
        }

        assert_eq!(document.text_content(current.elm().expect("realized")), "999");
        assert!(document.slot_count() <= slots + 2);
        assert_eq!(document.node_count(), document.slot_count() - document.vacant.len());
    }

    #[test]
    fn dispatch_bubbles_to_ancestors_and_document() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let inner_order = order.clone();
        let outer_order = order.clone();

        let vnode = h("div#outer")
            .on("click", move |_| outer_order.borrow_mut().push("outer"))
            .child(h("button#inner").on("click", move |_| inner_order.borrow_mut().push("inner")));
        let document = RefCell::new(mounted(&vnode));

        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();
        document
            .borrow_mut()
            .event_signal("click")
            .listen(move |_| seen_clone.set(seen_clone.get() + 1));

        let target = document.borrow().element_by_id("inner").unwrap();
        assert!(Document::dispatch(&document, DomEvent::new("click", target)));
        assert_eq!(*order.borrow(), vec!["inner", "outer"]);
        assert_eq!(seen.get(), 1);

        // No element listener for keydown, but the document signal still fires
        let keys = document.borrow_mut().keydown();
        let key_seen = Rc::new(RefCell::new(None));
        let key_clone = key_seen.clone();
        keys.listen(move |event| *key_clone.borrow_mut() = event.key.clone());
        assert!(!Document::dispatch(
            &document,
            DomEvent::new("keydown", target).with_key("Enter")
        ));
        assert_eq!(key_seen.borrow().as_deref(), Some("Enter"));
    }

    #[test]
    fn html_is_escaped() {
        let vnode = h("div#app").attr("title", "\"q\"").child(text("a < b & c"));
        let document = mounted(&vnode);
        assert_eq!(
            document.to_html(vnode.elm().unwrap()),
            "<div id=\"app\" title=\"&quot;q&quot;\">a &lt; b &amp; c</div>"
        );
    }
}
