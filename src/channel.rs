//! Command channel to the robot.
//!
//! The channel owns the only sequence counter in the process. Commands are
//! fire-and-forget: ordering comes from the transport, not from replies.

mod protocol;
mod session;
mod transport;

#[cfg(feature = "websocket")]
mod websocket;

pub use protocol::Command;
pub use session::{ChannelConfig, ChannelSession, CommandChannel};
pub use transport::Transport;

#[cfg(feature = "websocket")]
pub use websocket::WebSocketTransport;
