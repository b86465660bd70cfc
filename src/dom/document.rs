//! In-process document model
//!
//! An arena-backed DOM carrying exactly the platform surface the bridge
//! consumes: tree structure, attributes, layout boxes, computed styles,
//! selector queries, and paint-order hit-testing. Geometry is in viewport
//! pixel coordinates throughout; no DPI or transform correction is applied.

use super::events::EventListeners;
use super::node::{BoundingBox, ChildNode, ComputedStyle, Node, NodeId};
use super::selector::Selector;
use crate::Result;

/// Default viewport width when none is specified
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1920.0;

/// Default viewport height when none is specified
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 1080.0;

/// An arena-backed document
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    pub(crate) listeners: EventListeners,
}

impl Document {
    /// Create an empty document with the default viewport
    pub fn new() -> Self {
        Self::with_viewport(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }

    /// Create an empty document with an explicit viewport size
    pub fn with_viewport(width: f64, height: f64) -> Self {
        let viewport = BoundingBox::new(0.0, 0.0, width, height);

        let mut html = Node::new("html");
        html.rect = viewport;
        let mut body = Node::new("body");
        body.rect = viewport;
        body.parent = Some(NodeId(0));

        let mut doc = Self {
            nodes: vec![html, body],
            root: NodeId(0),
            body: NodeId(1),
            listeners: EventListeners::default(),
        };
        doc.nodes[0].children.push(ChildNode::Element(NodeId(1)));
        doc
    }

    /// Root (`html`) element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Page `body` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Append an existing element under a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(ChildNode::Element(child));
    }

    /// Append a text run under a parent
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        self.node_mut(parent)
            .children
            .push(ChildNode::Text(text.to_string()));
    }

    /// Detach a subtree from the document. The arena slot survives, so
    /// outstanding [`NodeId`]s stay valid but report as no longer attached.
    pub fn remove_node(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent)
                .children
                .retain(|c| !matches!(c, ChildNode::Element(e) if *e == id));
        }
        self.node_mut(id).parent = None;
    }

    /// Whether a node is still connected to the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        if id.0 >= self.nodes.len() {
            return false;
        }
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Lowercase tag name
    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    /// Parent element
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Element children in DOM order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .filter_map(|c| match c {
                ChildNode::Element(e) => Some(*e),
                ChildNode::Text(_) => None,
            })
            .collect()
    }

    /// Attribute value
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attributes.get(name).map(String::as_str)
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.node_mut(id)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Raw `class` attribute value
    pub fn class_name(&self, id: NodeId) -> &str {
        self.attribute(id, "class").unwrap_or("")
    }

    /// Class tokens in source order
    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.node(id).classes().map(str::to_string).collect()
    }

    /// Whether the element carries a class token
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes().any(|c| c == class)
    }

    /// Current layout box
    pub fn bounding_box(&self, id: NodeId) -> BoundingBox {
        self.node(id).rect
    }

    /// Set the layout box
    pub fn set_bounding_box(&mut self, id: NodeId, rect: BoundingBox) {
        self.node_mut(id).rect = rect;
    }

    /// Resolved presentation subset
    pub fn computed_style(&self, id: NodeId) -> &ComputedStyle {
        &self.node(id).style
    }

    /// Mutable resolved presentation subset
    pub fn computed_style_mut(&mut self, id: NodeId) -> &mut ComputedStyle {
        &mut self.node_mut(id).style
    }

    /// Inline style property, `None` when unset
    pub fn inline_style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.node(id)
            .inline_style
            .get(prop)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Set an inline style property; an empty value clears it
    pub fn set_inline_style(&mut self, id: NodeId, prop: &str, value: &str) {
        if value.is_empty() {
            self.node_mut(id).inline_style.remove(prop);
        } else {
            self.node_mut(id)
                .inline_style
                .insert(prop.to_string(), value.to_string());
        }
    }

    /// Concatenated text content of the subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in &self.node(id).children {
            match child {
                ChildNode::Text(text) => out.push_str(text),
                ChildNode::Element(e) => self.collect_text(*e, out),
            }
        }
    }

    /// Whether the element has at least one direct text child with
    /// non-whitespace content
    pub fn has_direct_text(&self, id: NodeId) -> bool {
        self.node(id)
            .children
            .iter()
            .any(|c| matches!(c, ChildNode::Text(t) if !t.trim().is_empty()))
    }

    fn display_none(&self, id: NodeId) -> bool {
        self.inline_style(id, "display") == Some("none") || self.node(id).style.display == "none"
    }

    fn pointer_events_none(&self, id: NodeId) -> bool {
        self.inline_style(id, "pointer-events") == Some("none")
    }

    /// Paint-order hit test: the topmost element rendered at a viewport
    /// point. Later siblings paint on top of earlier ones and children on
    /// top of their parent; `display:none` subtrees and
    /// `pointer-events:none` nodes are skipped.
    pub fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        self.hit_node(self.root, x, y)
    }

    fn hit_node(&self, id: NodeId, x: f64, y: f64) -> Option<NodeId> {
        if self.display_none(id) {
            return None;
        }
        for child in self.children(id).into_iter().rev() {
            if let Some(hit) = self.hit_node(child, x, y) {
                return Some(hit);
            }
        }
        if self.node(id).rect.contains(x, y) && !self.pointer_events_none(id) {
            Some(id)
        } else {
            None
        }
    }

    /// First element matching a selector, in document order
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let parsed = Selector::parse(selector)?;
        Ok(self.matching_nodes(&parsed).into_iter().next())
    }

    /// All elements matching a selector, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let parsed = Selector::parse(selector)?;
        Ok(self.matching_nodes(&parsed))
    }

    fn matching_nodes(&self, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.visit_matching(self.root, selector, &mut out);
        out
    }

    fn visit_matching(&self, id: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
        if selector.matches(self, id) {
            out.push(id);
        }
        for child in self.children(id) {
            self.visit_matching(child, selector, out);
        }
    }

    /// Shift every non-fixed layout box as if the viewport scrolled by
    /// `(dx, dy)`. `position:fixed` nodes (the overlay) stay put.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        for node in &mut self.nodes {
            if node.style.position == "fixed" {
                continue;
            }
            node.rect.left -= dx;
            node.rect.top -= dy;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
