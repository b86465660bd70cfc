//! Element location
//!
//! Raw hit-testing usually lands on a generic container. `resolve` drills
//! from that container toward the most specific meaningful node at the
//! point, without going so deep that it picks bare wrappers with no
//! independent meaning.

use crate::dom::{Document, NodeId};
use phf::{phf_set, Set};

/// Tags that are actionable in their own right
static INTERACTIVE_TAGS: Set<&'static str> = phf_set! {
    "a", "button", "input", "select", "textarea", "img", "video", "svg", "label",
};

/// ARIA roles that mark an element as actionable
static INTERACTIVE_ROLES: Set<&'static str> = phf_set! {
    "button", "link", "textbox", "checkbox", "radio", "tab", "menuitem",
};

/// Text-bearing tags that count as content when they have direct text
static TEXT_TAGS: Set<&'static str> = phf_set! {
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "li", "td", "th", "strong", "em",
};

/// "Small element" thresholds: short text and few children
const SMALL_TEXT_MAX: usize = 300;
const SMALL_CHILDREN_MAX: usize = 5;

/// Descent depth cap; natural DOM depth stays well under this
const MAX_DESCENT_DEPTH: usize = 64;

/// Resolve the element the platform hit-test returned at `(x, y)` to the
/// most semantically useful target, or `None` if nothing at the point is
/// worth acting on. The root element and the page body are rejected
/// outright.
pub fn resolve(doc: &Document, raw: NodeId, x: f64, y: f64) -> Option<NodeId> {
    if raw == doc.root() || raw == doc.body() {
        return None;
    }
    resolve_inner(doc, raw, x, y, 0)
}

fn resolve_inner(doc: &Document, element: NodeId, x: f64, y: f64, depth: usize) -> Option<NodeId> {
    if depth >= MAX_DESCENT_DEPTH {
        return None;
    }

    if is_interactive_or_content(doc, element) {
        return Some(element);
    }

    // Scan children last-first so visually stacked elements win
    for child in doc.children(element).into_iter().rev() {
        if doc.bounding_box(child).contains(x, y) {
            if let Some(best) = resolve_inner(doc, child, x, y, depth + 1) {
                return Some(best);
            }
        }
    }

    if element != doc.body() && !doc.text_content(element).trim().is_empty() {
        return Some(element);
    }

    None
}

/// Whether an element is worth selecting on its own: interactive by tag or
/// role, a text tag with direct text, or a small element with content.
pub fn is_interactive_or_content(doc: &Document, element: NodeId) -> bool {
    if element == doc.root() || element == doc.body() {
        return false;
    }

    let tag = doc.tag(element);
    if INTERACTIVE_TAGS.contains(tag) {
        return true;
    }

    if let Some(role) = doc.attribute(element, "role") {
        if INTERACTIVE_ROLES.contains(role) {
            return true;
        }
    }

    if TEXT_TAGS.contains(tag) && doc.has_direct_text(element) {
        return true;
    }

    let text_len = doc.text_content(element).trim().chars().count();
    text_len > 0 && text_len < SMALL_TEXT_MAX && doc.children(element).len() < SMALL_CHILDREN_MAX
}
