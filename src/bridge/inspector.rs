//! Element inspection
//!
//! Produces the serializable snapshot the host renders in its inspector
//! panel. Pure read: nothing is cached and nothing is mutated.

use super::generator;
use crate::dom::{Document, NodeId};
use crate::protocol::ElementInfo;

/// Maximum length of the reported text excerpt
const TEXT_EXCERPT_LEN: usize = 100;

/// Snapshot an element's identity, presentation subset, and geometry.
///
/// Returns `None` for a handle that no longer refers to a live node.
pub fn snapshot(doc: &Document, element: NodeId) -> Option<ElementInfo> {
    if !doc.is_attached(element) {
        return None;
    }

    let text = doc.text_content(element);
    let excerpt: String = text.trim().chars().take(TEXT_EXCERPT_LEN).collect();

    Some(ElementInfo {
        selector: generator::generate(doc, element),
        tag_name: doc.tag(element).to_string(),
        class_name: doc.class_name(element).to_string(),
        text_content: excerpt,
        computed_styles: doc.computed_style(element).clone(),
        bounding_rect: doc.bounding_box(element),
    })
}
