//! # Element-picking bridge
//!
//! The logic that runs against the edited document: it locks down normal
//! page interaction, resolves screen coordinates to the right DOM element,
//! synthesizes a durable selector for it, tracks a highlight overlay
//! synchronized to scrolling, and reports element metadata back to the
//! hosting editor frame.
//!
//! ## Module structure
//! - `session`: the single shared [`SessionState`](session::SessionState)
//! - `mode`: edit-mode interaction lockdown
//! - `locator`: point + candidate element → best target
//! - `generator`: element → stable selector string
//! - `overlay`: highlight indicator + debounced scroll tracking
//! - `inspector`: element → serializable snapshot
//! - `router`: command dispatch and outbound events

pub mod generator;
pub mod inspector;
pub mod locator;
pub mod mode;
pub mod overlay;
pub mod router;
pub mod session;

pub use mode::ModeController;
pub use overlay::HighlightOverlay;
pub use router::ProtocolRouter;
pub use session::SessionState;
