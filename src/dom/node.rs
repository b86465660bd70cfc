//! Node types for the document arena

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle to a node in a [`Document`](super::Document) arena.
///
/// Handles are non-owning: the node they reference may be detached from the
/// document at any time, so callers that hold one across mutations must
/// re-check liveness with [`Document::is_attached`](super::Document::is_attached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A child slot of an element: either another element or a run of text.
#[derive(Debug, Clone)]
pub enum ChildNode {
    /// Child element
    Element(NodeId),
    /// Direct text content
    Text(String),
}

/// Element bounding box in viewport pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Right edge in viewport coordinates
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge in viewport coordinates
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the box contains a viewport point (edges inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// The fixed subset of resolved presentation properties the bridge reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComputedStyle {
    pub color: String,
    pub background_color: String,
    pub font_size: String,
    pub font_family: String,
    pub font_weight: String,
    pub padding: String,
    pub margin: String,
    pub display: String,
    pub position: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: "rgb(0, 0, 0)".to_string(),
            background_color: "rgba(0, 0, 0, 0)".to_string(),
            font_size: "16px".to_string(),
            font_family: "sans-serif".to_string(),
            font_weight: "400".to_string(),
            padding: "0px".to_string(),
            margin: "0px".to_string(),
            display: "block".to_string(),
            position: "static".to_string(),
        }
    }
}

/// A single element in the document arena
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Lowercase tag name
    pub tag: String,
    /// Attribute map
    pub attributes: HashMap<String, String>,
    /// Inline style properties (empty value = unset)
    pub inline_style: HashMap<String, String>,
    /// Resolved presentation subset
    pub style: ComputedStyle,
    /// Layout box in viewport coordinates
    pub rect: BoundingBox,
    /// Parent element, `None` for the root or a detached node
    pub parent: Option<NodeId>,
    /// Interleaved element/text children
    pub children: Vec<ChildNode>,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: HashMap::new(),
            inline_style: HashMap::new(),
            style: ComputedStyle::default(),
            rect: BoundingBox::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Class tokens in source order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .map(String::as_str)
            .unwrap_or("")
            .split_whitespace()
    }
}
