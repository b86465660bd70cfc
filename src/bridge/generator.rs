//! Selector generation
//!
//! Turns an element into a selector string likely to remain valid after the
//! host edits the page: a unique id or test id first, then the first
//! document-unique class in source order, and only then a structural path
//! capped at five segments. Class- and path-based selectors are
//! best-effort: their uniqueness is not re-verified before returning.

use crate::dom::selector::css_escape;
use crate::dom::{Document, NodeId};

/// Maximum number of segments in a structural fallback path
const MAX_PATH_DEPTH: usize = 5;

/// Generate a selector for an element.
///
/// Returns `None` for the root element and the page body.
pub fn generate(doc: &Document, element: NodeId) -> Option<String> {
    if element == doc.root() || element == doc.body() {
        return None;
    }

    if let Some(id) = doc.attribute(element, "id").filter(|id| !id.is_empty()) {
        return Some(format!("#{}", css_escape(id)));
    }

    if let Some(test_id) = doc
        .attribute(element, "data-testid")
        .filter(|t| !t.is_empty())
    {
        return Some(format!("[data-testid=\"{}\"]", css_escape(test_id)));
    }

    if let Some(selector) = unique_class_selector(doc, element) {
        return Some(selector);
    }

    Some(structural_path(doc, element))
}

/// First class, in source order, that matches exactly one element in the
/// whole document. Malformed class tokens are skipped, not fatal.
fn unique_class_selector(doc: &Document, element: NodeId) -> Option<String> {
    for class in doc.classes(element) {
        if class.is_empty() || class == "undefined" {
            continue;
        }
        let selector = format!(".{}", css_escape(&class));
        match doc.query_selector_all(&selector) {
            Ok(matches) if matches.len() == 1 => return Some(selector),
            _ => {}
        }
    }
    None
}

/// Root-to-leaf path of `tag` / `tag.firstClass` segments, excluding the
/// body, at most [`MAX_PATH_DEPTH`] levels deep.
fn structural_path(doc: &Document, element: NodeId) -> String {
    let mut path = Vec::new();
    let mut current = Some(element);

    while let Some(node) = current {
        if node == doc.body() || path.len() >= MAX_PATH_DEPTH {
            break;
        }

        let mut segment = doc.tag(node).to_string();
        if let Some(class) = doc
            .classes(node)
            .into_iter()
            .find(|c| !c.is_empty() && c != "undefined")
        {
            segment.push('.');
            segment.push_str(&css_escape(&class));
        }

        path.push(segment);
        current = doc.parent(node);
    }

    path.reverse();
    path.join(" > ")
}
