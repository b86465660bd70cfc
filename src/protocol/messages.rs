//! Bridge wire messages
//!
//! Inbound commands and outbound events exchanged with the hosting editor
//! frame. Tags are kebab-case on the `type` discriminator; element info
//! fields are camelCase, matching what editor hosts already consume.

use crate::dom::{BoundingBox, ComputedStyle, DocumentSnapshot};
use serde::{Deserialize, Serialize};

/// What kind of probe triggered an element detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickAction {
    /// Transient probe while the host's pointer moves
    Hover,
    /// Definitive pick
    Click,
}

/// Commands the hosting frame sends to the bridge.
///
/// Unrecognized `type` tags deserialize to [`InboundMessage::Unknown`] and
/// are silently ignored by the router.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// Enter edit mode: suppress normal page interaction
    ModeActivate,
    /// Leave edit mode and clear any highlight
    ModeDeactivate,
    /// Resolve a viewport point to an element and report its selector
    DetectElement { x: f64, y: f64, action: PickAction },
    /// Highlight the first element matching a selector and track it
    Highlight { selector: String },
    /// Hide the highlight overlay and stop tracking
    ClearHighlight,
    /// Report an element snapshot for a selector
    RequestInfo { selector: String },
    /// Any unrecognized command
    #[serde(other)]
    Unknown,
}

/// Events the bridge posts back to the hosting frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// A hover probe landed on an element
    ElementHovered { selector: String },
    /// A definitive pick landed on an element
    ElementClicked { selector: String },
    /// A probe resolved to nothing actionable
    NoElementDetected { action: PickAction },
    /// Reply to `request-info`
    ElementInfo {
        info: Option<ElementInfo>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// Immutable snapshot of an element's identity, presentation, and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    /// Best-effort selector for re-finding the element, if one exists
    pub selector: Option<String>,
    pub tag_name: String,
    pub class_name: String,
    /// Text content truncated to 100 characters
    pub text_content: String,
    pub computed_styles: ComputedStyle,
    pub bounding_rect: BoundingBox,
}

/// Session-level commands handled by the standalone server before the
/// router ever sees a frame. These are not part of the bridge protocol.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    /// Install a document snapshot as the session's edited document
    LoadDocument { document: DocumentSnapshot },
    /// Scroll the viewport and fire the scroll notification
    Scroll {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
}
