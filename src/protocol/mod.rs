//! Wire protocol between the bridge and its hosting editor frame

pub mod host;
pub mod messages;

pub use host::{ChannelHost, HostPort};
pub use messages::{ControlMessage, ElementInfo, InboundMessage, OutboundMessage, PickAction};
