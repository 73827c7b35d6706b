//! Virtual Nodes
//!
//! This module defines the virtual-DOM tree that builders produce and
//! patchers reconcile.
//!
//! # Shared Handles
//!
//! A [`VNode`] is a reference-counted handle. A context's realized node and
//! the slot holding it inside its parent's `children` are the same object.
//! When a context rebuilds, the freshly patched node is [grafted](VNode::graft)
//! into that shared object so every ancestor sees the new subtree without
//! being rebuilt itself.
//!
//! # Selectors
//!
//! Selectors follow the `tag#id.class1.class2` syntax. The special selector
//! `"!"` denotes a comment node. Text nodes have no selector.

use std::cell::{Ref, RefCell};
use std::fmt::{self, Debug, Write as _};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::dom::DomEvent;

/// Selector of comment nodes.
pub const COMMENT_SEL: &str = "!";

/// Identifier of a node realized in a document.
///
/// Documents reuse the slots of freed nodes. The generation tells a stale
/// id from the id of the slot's current occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId {
    index: usize,
    generation: u32,
}

impl ElementId {
    /// Wrap a raw index, at the first generation.
    pub fn new(raw: usize) -> Self {
        Self::with_generation(raw, 0)
    }

    pub(crate) fn with_generation(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Get the raw index.
    pub fn raw(&self) -> usize {
        self.index
    }

    /// Number of times the slot was vacated before this id was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A DOM event listener attached through [`VNode::on`].
pub type EventHandler = Rc<dyn Fn(&DomEvent)>;

/// Attributes, classes, styles and listeners of an element.
#[derive(Clone, Default, Serialize)]
pub struct VNodeData {
    pub attrs: IndexMap<String, String>,
    pub class: IndexMap<String, bool>,
    pub style: IndexMap<String, String>,
    #[serde(skip)]
    pub on: IndexMap<String, EventHandler>,
}

impl Debug for VNodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNodeData")
            .field("attrs", &self.attrs)
            .field("class", &self.class)
            .field("style", &self.style)
            .field("on", &self.on.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Clone, Default, Serialize)]
struct Fields {
    sel: Option<String>,
    key: Option<String>,
    data: VNodeData,
    children: Vec<VNode>,
    text: Option<String>,
    #[serde(skip)]
    elm: Option<ElementId>,
}

/// A node in the virtual-DOM tree.
///
/// Built with [`h`], [`text`] or [`comment`] and the chained setters below.
///
/// ```rust
/// use sprig_core::{h, text};
///
/// let node = h("ul.menu")
///     .key("menu")
///     .child(h("li").text("one"))
///     .child(h("li").child(text("two")));
/// assert_eq!(node.children_handles().len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct VNode(Rc<RefCell<Fields>>);

/// Create an element node from a selector.
pub fn h(sel: impl Into<String>) -> VNode {
    VNode::from_fields(Fields {
        sel: Some(sel.into()),
        ..Fields::default()
    })
}

/// Create a text node.
pub fn text(content: impl Into<String>) -> VNode {
    VNode::from_fields(Fields {
        text: Some(content.into()),
        ..Fields::default()
    })
}

/// Create an empty comment node, used as a stable placeholder.
pub fn comment() -> VNode {
    h(COMMENT_SEL)
}

impl VNode {
    fn from_fields(fields: Fields) -> Self {
        Self(Rc::new(RefCell::new(fields)))
    }

    fn fields(&self) -> Ref<'_, Fields> {
        self.0.borrow()
    }

    /// Set the key used to match siblings.
    pub fn key(self, key: impl Into<String>) -> Self {
        self.0.borrow_mut().key = Some(key.into());
        self
    }

    /// Set an attribute.
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.borrow_mut().data.attrs.insert(name.into(), value.into());
        self
    }

    /// Toggle a class.
    pub fn class(self, name: impl Into<String>, enabled: bool) -> Self {
        self.0.borrow_mut().data.class.insert(name.into(), enabled);
        self
    }

    /// Set a style property.
    pub fn style(self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.borrow_mut().data.style.insert(property.into(), value.into());
        self
    }

    /// Attach a listener for events of `kind`, replacing any previous one.
    pub fn on(self, kind: impl Into<String>, handler: impl Fn(&DomEvent) + 'static) -> Self {
        self.0
            .borrow_mut()
            .data
            .on
            .insert(kind.into(), Rc::new(handler));
        self
    }

    /// Append one child.
    pub fn child(self, child: VNode) -> Self {
        self.0.borrow_mut().children.push(child);
        self
    }

    /// Append several children. Accepts any iterator, including `Option`.
    pub fn children(self, children: impl IntoIterator<Item = VNode>) -> Self {
        self.0.borrow_mut().children.extend(children);
        self
    }

    /// Set the text content of an element, or the content of a text node.
    pub fn text(self, content: impl Into<String>) -> Self {
        self.0.borrow_mut().text = Some(content.into());
        self
    }

    /// The selector, `None` for text nodes.
    pub fn sel(&self) -> Option<String> {
        self.fields().sel.clone()
    }

    /// The key, if any.
    pub fn get_key(&self) -> Option<String> {
        self.fields().key.clone()
    }

    /// The text content, if any.
    pub fn get_text(&self) -> Option<String> {
        self.fields().text.clone()
    }

    /// A copy of the attributes, classes, styles and listeners.
    pub fn data(&self) -> VNodeData {
        self.fields().data.clone()
    }

    /// Handles to the children. Mutating them mutates this tree.
    pub fn children_handles(&self) -> Vec<VNode> {
        self.fields().children.clone()
    }

    /// The realized element, once patched or mounted.
    pub fn elm(&self) -> Option<ElementId> {
        self.fields().elm
    }

    /// Record the document node realizing this vnode. Called by patchers.
    pub fn set_elm(&self, elm: Option<ElementId>) {
        self.0.borrow_mut().elm = elm;
    }

    /// Whether this is a comment node.
    pub fn is_comment(&self) -> bool {
        self.fields().sel.as_deref() == Some(COMMENT_SEL)
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        let fields = self.fields();
        fields.sel.is_none() && fields.text.is_some()
    }

    /// Whether a patcher may reconcile `self` into `other` in place.
    pub fn same_vnode(&self, other: &VNode) -> bool {
        let (a, b) = (self.fields(), other.fields());
        a.sel == b.sel && a.key == b.key
    }

    /// Check whether two handles refer to the same node object.
    pub fn ptr_eq(&self, other: &VNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Copy every field of `new` into this node object.
    ///
    /// After a successful patch from `self` to `new`, ancestors still hold
    /// `self` in their children. Grafting makes that object mirror `new`
    /// (element, data, children, key, selector and text) so later patches
    /// through the ancestors start from the current tree.
    pub fn graft(&self, new: &VNode) {
        if self.ptr_eq(new) {
            return;
        }
        let fields = new.fields().clone();
        *self.0.borrow_mut() = fields;
    }

    /// Render the tree as an indented outline, one node per line.
    pub fn dump(&self) -> String {
        self.dump_with(&|_| false)
    }

    /// Like [`VNode::dump`], marking nodes whose element is attached with `(+)`.
    pub fn dump_with(&self, attached: &dyn Fn(ElementId) -> bool) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0, attached);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize, attached: &dyn Fn(ElementId) -> bool) {
        let fields = self.fields();
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{}", "-".repeat(depth));
        match &fields.sel {
            Some(sel) => {
                out.push_str(sel);
                if fields.elm.is_some_and(attached) {
                    out.push_str(" (+)");
                }
            }
            None => {
                let _ = write!(out, "\"{}\"", fields.text.as_deref().unwrap_or_default());
            }
        }
        for child in &fields.children {
            child.dump_into(out, depth + 1, attached);
        }
    }
}

impl Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();
        f.debug_struct("VNode")
            .field("sel", &fields.sel)
            .field("key", &fields.key)
            .field("text", &fields.text)
            .field("elm", &fields.elm)
            .field("children", &fields.children)
            .finish()
    }
}

impl Serialize for VNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields().serialize(serializer)
    }
}

/// Split a selector into tag, id and classes.
pub(crate) fn parse_selector(sel: &str) -> (&str, Option<&str>, Vec<&str>) {
    let tag_end = sel.find(['#', '.']).unwrap_or(sel.len());
    let tag = &sel[..tag_end];
    let rest = &sel[tag_end..];

    let (id, classes) = match rest.strip_prefix('#') {
        Some(after_hash) => {
            let id_end = after_hash.find('.').unwrap_or(after_hash.len());
            (Some(&after_hash[..id_end]), &after_hash[id_end..])
        }
        None => (None, rest),
    };

    let classes = classes.split('.').filter(|class| !class.is_empty()).collect();
    (tag, id.filter(|id| !id.is_empty()), classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parsing() {
        assert_eq!(parse_selector("div"), ("div", None, vec![]));
        assert_eq!(parse_selector("div#app"), ("div", Some("app"), vec![]));
        assert_eq!(
            parse_selector("button#go.primary.large"),
            ("button", Some("go"), vec!["primary", "large"])
        );
        assert_eq!(parse_selector("span.note"), ("span", None, vec!["note"]));
    }

    #[test]
    fn builders_set_fields() {
        let node = h("a.link")
            .key("home")
            .attr("href", "/")
            .class("active", true)
            .style("color", "red")
            .text("Home");

        assert_eq!(node.sel().as_deref(), Some("a.link"));
        assert_eq!(node.get_key().as_deref(), Some("home"));
        assert_eq!(node.get_text().as_deref(), Some("Home"));

        let data = node.data();
        assert_eq!(data.attrs.get("href").map(String::as_str), Some("/"));
        assert_eq!(data.class.get("active"), Some(&true));
        assert_eq!(data.style.get("color").map(String::as_str), Some("red"));
    }

    #[test]
    fn node_kinds() {
        assert!(comment().is_comment());
        assert!(text("hi").is_text());
        assert!(!h("p").is_text());
    }

    #[test]
    fn same_vnode_compares_selector_and_key() {
        assert!(h("li").key("1").same_vnode(&h("li").key("1")));
        assert!(!h("li").key("1").same_vnode(&h("li").key("2")));
        assert!(!h("li").same_vnode(&h("p")));
    }

    #[test]
    fn graft_is_visible_through_parent() {
        let slot = h("span").text("old");
        let parent = h("div").child(slot.clone());

        slot.set_elm(Some(ElementId::new(3)));
        let fresh = h("strong").text("new").child(text("!"));
        fresh.set_elm(Some(ElementId::new(7)));
        slot.graft(&fresh);

        let seen = &parent.children_handles()[0];
        assert_eq!(seen.sel().as_deref(), Some("strong"));
        assert_eq!(seen.get_text().as_deref(), Some("new"));
        assert_eq!(seen.elm(), Some(ElementId::new(7)));
        assert_eq!(seen.children_handles().len(), 1);

        // Grafting onto itself is a no-op rather than a double borrow
        slot.graft(&slot.clone());
    }

    #[test]
    fn dump_outlines_tree() {
        let node = h("ul").child(h("li").child(text("a"))).child(h("li"));
        assert_eq!(node.dump(), "ul\n-li\n--\"a\"\n-li");

        node.set_elm(Some(ElementId::new(0)));
        assert_eq!(node.dump_with(&|_| true).lines().next(), Some("ul (+)"));
    }

    #[test]
    fn serializes_without_elements() {
        let node = h("p").attr("title", "t").child(text("x"));
        node.set_elm(Some(ElementId::new(1)));

        let json = serde_json::to_value(&node).expect("serializable");
        assert_eq!(json["sel"], "p");
        assert_eq!(json["data"]["attrs"]["title"], "t");
        assert_eq!(json["children"][0]["text"], "x");
        assert!(json.get("elm").is_none());
    }
}
