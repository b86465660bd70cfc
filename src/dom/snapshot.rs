//! JSON document snapshots
//!
//! A host (or a test fixture) describes the edited document as a nested
//! JSON structure; the server installs it as the session's document.

use super::document::{Document, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use super::node::{BoundingBox, ComputedStyle, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable description of a whole document (the `html`/`body` shell is
/// implied; `body` lists the body's children)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    #[serde(default = "default_width")]
    pub viewport_width: f64,
    #[serde(default = "default_height")]
    pub viewport_height: f64,
    #[serde(default)]
    pub body: Vec<NodeSnapshot>,
}

fn default_width() -> f64 {
    DEFAULT_VIEWPORT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_VIEWPORT_HEIGHT
}

/// Serializable description of one element subtree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub rect: Option<BoundingBox>,
    #[serde(default)]
    pub style: Option<ComputedStyle>,
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}

impl Document {
    /// Build a document from a snapshot
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Document {
        let mut doc = Document::with_viewport(snapshot.viewport_width, snapshot.viewport_height);
        let body = doc.body();
        for child in &snapshot.body {
            build_node(&mut doc, body, child);
        }
        doc
    }
}

fn build_node(doc: &mut Document, parent: NodeId, snapshot: &NodeSnapshot) {
    let id = doc.create_element(&snapshot.tag);
    for (name, value) in &snapshot.attributes {
        doc.set_attribute(id, name, value);
    }
    if let Some(rect) = snapshot.rect {
        doc.set_bounding_box(id, rect);
    }
    if let Some(style) = &snapshot.style {
        *doc.computed_style_mut(id) = style.clone();
    }
    doc.append_child(parent, id);
    if let Some(text) = &snapshot.text {
        doc.append_text(id, text);
    }
    for child in &snapshot.children {
        build_node(doc, id, child);
    }
}
