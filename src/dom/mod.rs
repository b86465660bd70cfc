//! # Document model
//!
//! An in-process DOM carrying the platform surface the picking bridge
//! consumes. The bridge never talks to a real browser; it is written
//! against this model the same way the automation logic upstream is
//! written against an explicit page abstraction.
//!
//! ## Module structure
//! - `node`: arena node types, bounding boxes, computed-style subset
//! - `document`: tree operations, queries, paint-order hit-testing
//! - `selector`: selector parse/match engine and CSS escaping
//! - `events`: capture-suppressor and scroll-listener registries
//! - `snapshot`: JSON document snapshots for hosts and fixtures

pub mod document;
pub mod events;
pub mod node;
pub mod selector;
pub mod snapshot;

pub use document::Document;
pub use events::{DispatchOutcome, EventKind, ListenerId};
pub use node::{BoundingBox, ComputedStyle, NodeId};
pub use snapshot::{DocumentSnapshot, NodeSnapshot};

#[cfg(test)]
mod tests;
