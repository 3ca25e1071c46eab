//! The DOM capability interface controllers are written against.
//!
//! Controllers never talk to a concrete document library. They receive a `&mut D`
//! where `D: Dom` and use the primitive operations below plus the provided
//! query helpers. [`MemoryDom`](super::MemoryDom) is the reference implementation;
//! a browser binding implements the same trait over real nodes.

use super::Selector;
use crate::domain::{Rect, Size};

/// Opaque handle to a node owned by a [`Dom`] implementation.
///
/// Handles are never reused, so a handle to a removed node stays invalid rather
/// than silently pointing at a newer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw index, for diagnostics.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Primitive document operations.
///
/// Operations on a removed or unknown node are no-ops (writes) or return the
/// empty value (reads). None of them fail: a stale handle is a missing target,
/// not an error.
pub trait Dom {
    /// The document node itself (parent of the document element).
    fn document(&self) -> NodeId;
    /// The `<html>` element.
    fn document_element(&self) -> NodeId;
    /// The `<body>` element.
    fn body(&self) -> NodeId;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;
    /// Appends `child` to `parent`, detaching it from any previous parent first.
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Inserts `child` as the first child of `parent`, before any text.
    fn prepend_child(&mut self, parent: NodeId, child: NodeId);
    /// Inserts `child` into `parent` immediately before `reference`.
    ///
    /// Appends when `reference` is not a child of `parent`.
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId);
    /// Detaches `node` and destroys its subtree.
    fn remove(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    /// Lowercase tag name, `None` for removed nodes.
    fn tag(&self, node: NodeId) -> Option<&str>;

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attr(&mut self, node: NodeId, name: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn remove_style(&mut self, node: NodeId, property: &str);

    /// Concatenated text of the node and its descendants.
    fn text(&self, node: NodeId) -> String;
    /// Replaces the node's children with a single text run.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Current form-control value.
    fn value(&self, node: NodeId) -> String;
    fn set_value(&mut self, node: NodeId, value: &str);

    fn focus(&mut self, node: NodeId);
    fn focused(&self) -> Option<NodeId>;

    /// Layout box of the node in viewport coordinates.
    fn rect(&self, node: NodeId) -> Rect;
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Whether the document is still being parsed.
    fn is_loading(&self) -> bool {
        false
    }

    /// Whether the platform colour scheme is dark.
    fn prefers_dark(&self) -> bool {
        false
    }

    /// Value of the `id` attribute.
    fn id(&self, node: NodeId) -> Option<String> {
        self.attr(node, "id")
    }

    /// Adds or removes `class` so that its presence equals `on`.
    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
        on
    }

    /// Whether the node is still attached under the document.
    fn is_connected(&self, node: NodeId) -> bool {
        let document = self.document();
        let mut current = Some(node);
        while let Some(n) = current {
            if n == document {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Parent chain from the node's parent up to (and including) the document.
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(node);
        while let Some(n) = current {
            chain.push(n);
            current = self.parent(n);
        }
        chain
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node)
    }

    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if selector.matches(self, n) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// All descendants of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            if selector.matches(self, node) {
                found.push(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        found
    }

    /// First descendant of `scope` matching `selector`.
    fn query(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }

    /// First connected element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.document()];
        while let Some(node) = stack.pop() {
            if node != self.document() && self.attr(node, "id").as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        None
    }

    /// Following sibling of `node`, if any.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&n| n == node)?;
        siblings.get(position + 1).copied()
    }

    /// Inserts `child` right after `reference` under the same parent.
    fn insert_after(&mut self, reference: NodeId, child: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        match self.next_sibling(reference) {
            Some(next) => self.insert_before(parent, child, next),
            None => self.append_child(parent, child),
        }
    }

    /// Moves `node` into `wrapper`, putting `wrapper` where `node` was.
    fn wrap(&mut self, node: NodeId, wrapper: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        self.insert_before(parent, wrapper, node);
        self.append_child(wrapper, node);
    }
}
