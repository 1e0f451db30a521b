//! Sequenced command session to the robot.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Command, Transport};
use crate::error::ChannelError;

/// Command channel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Robot command endpoint
    pub endpoint: String,
    /// When false the channel runs without a connection (dry run)
    pub enabled: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://roland:1111/ws".to_string(),
            enabled: true,
        }
    }
}

/// An open connection plus its sequence counter.
pub struct ChannelSession {
    transport: Box<dyn Transport>,
    next_id: u64,
    connected: bool,
}

impl ChannelSession {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            next_id: 1,
            connected: true,
        }
    }

    /// Id the next command will carry.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Send a command; the counter only advances when the send succeeds.
    fn send(&mut self, command: Command) -> Result<u64, ChannelError> {
        if !self.connected {
            return Err(ChannelError::Closed);
        }
        let id = self.next_id;
        self.transport
            .send_text(&command.encode(id))
            .map_err(|source| ChannelError::Send { id, source })?;
        self.next_id += 1;
        Ok(id)
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;
        self.transport.close().map_err(ChannelError::Close)
    }
}

/// Ordered, fire-and-forget command channel.
///
/// Commands go out as `"<id> s"` and `"<id> m <left> <right>"` with strictly
/// consecutive ids starting at 1. A disabled channel has no session; sending on
/// it does nothing.
pub struct CommandChannel {
    session: Option<ChannelSession>,
}

impl CommandChannel {
    /// Channel without a connection, for dry runs.
    pub fn disabled() -> Self {
        info!("command channel disabled");
        Self { session: None }
    }

    /// Channel over an already open transport.
    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            session: Some(ChannelSession::new(Box::new(transport))),
        }
    }

    /// Connect to a WebSocket endpoint.
    #[cfg(feature = "websocket")]
    pub fn connect(endpoint: &str) -> Result<Self, ChannelError> {
        let transport = super::WebSocketTransport::connect(endpoint)?;
        Ok(Self::with_transport(transport))
    }

    /// Connect, or build a disabled channel, as the configuration says.
    #[cfg(feature = "websocket")]
    pub fn from_config(config: &ChannelConfig) -> Result<Self, ChannelError> {
        if config.enabled {
            Self::connect(&config.endpoint)
        } else {
            Ok(Self::disabled())
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Whether commands can currently go out. Always false when disabled.
    pub fn is_connected(&self) -> bool {
        self.session.as_ref().is_some_and(ChannelSession::is_connected)
    }

    /// Id the next command will carry, `None` when disabled.
    pub fn next_id(&self) -> Option<u64> {
        self.session.as_ref().map(ChannelSession::next_id)
    }

    /// Send a command. Returns the id it was sent with, `None` when disabled.
    pub fn send(&mut self, command: Command) -> Result<Option<u64>, ChannelError> {
        let Some(session) = self.session.as_mut() else {
            if let Command::Move { left, right } = command {
                debug!(left, right, "move (channel disabled)");
            }
            return Ok(None);
        };
        let id = session.send(command)?;
        debug!(id, ?command, "command sent");
        Ok(Some(id))
    }

    /// Send a stop command.
    pub fn stop(&mut self) -> Result<Option<u64>, ChannelError> {
        self.send(Command::Stop)
    }

    /// Send a move command with the given wheel speeds.
    pub fn drive(&mut self, left: f64, right: f64) -> Result<Option<u64>, ChannelError> {
        self.send(Command::Move { left, right })
    }

    /// Close the session. Closing twice, or closing a disabled channel, is a no-op.
    pub fn close(&mut self) -> Result<(), ChannelError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if !session.is_connected() {
            return Ok(());
        }
        let result = session.close();
        match &result {
            Ok(()) => info!(last_id = session.next_id() - 1, "command channel closed"),
            Err(e) => warn!(error = %e, "command channel closed uncleanly"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        sent: Arc<Mutex<Vec<String>>>,
        closes: Arc<Mutex<u32>>,
        fail: bool,
    }

    impl Transport for Recorder {
        fn send_text(&mut self, text: &str) -> Result<(), BoxError> {
            if self.fail {
                return Err("broken pipe".into());
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn close(&mut self) -> Result<(), BoxError> {
            *self.closes.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let recorder = Recorder::default();
        let mut channel = CommandChannel::with_transport(recorder.clone());

        assert_eq!(channel.stop().unwrap(), Some(1));
        assert_eq!(channel.drive(0.25, 0.5).unwrap(), Some(2));
        assert_eq!(channel.stop().unwrap(), Some(3));
        assert_eq!(
            *recorder.sent.lock().unwrap(),
            vec!["1 s", "2 m 0.25 0.5", "3 s"]
        );
    }

    #[test]
    fn test_repeated_stop_is_not_deduplicated() {
        let recorder = Recorder::default();
        let mut channel = CommandChannel::with_transport(recorder.clone());

        channel.stop().unwrap();
        channel.stop().unwrap();
        assert_eq!(*recorder.sent.lock().unwrap(), vec!["1 s", "2 s"]);
    }

    #[test]
    fn test_failed_send_does_not_advance() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut channel = CommandChannel::with_transport(recorder);

        assert!(matches!(
            channel.stop(),
            Err(ChannelError::Send { id: 1, .. })
        ));
        assert_eq!(channel.next_id(), Some(1));
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut channel = CommandChannel::disabled();
        assert!(!channel.is_enabled());
        assert_eq!(channel.stop().unwrap(), None);
        assert_eq!(channel.drive(0.1, 0.2).unwrap(), None);
        assert_eq!(channel.next_id(), None);
        channel.close().unwrap();
    }

    #[test]
    fn test_close_is_idempotent() {
        let recorder = Recorder::default();
        let mut channel = CommandChannel::with_transport(recorder.clone());

        channel.close().unwrap();
        channel.close().unwrap();
        assert_eq!(*recorder.closes.lock().unwrap(), 1);
        assert!(!channel.is_connected());
        assert!(matches!(channel.stop(), Err(ChannelError::Closed)));
    }
}
