//! WebSocket transport for the command channel.

use std::net::TcpStream;

use tracing::info;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::Transport;
use crate::error::{BoxError, ChannelError};

/// Blocking WebSocket client connection.
pub struct WebSocketTransport {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Open a connection to `endpoint`, e.g. `ws://roland:1111/ws`.
    pub fn connect(endpoint: &str) -> Result<Self, ChannelError> {
        let (socket, response) =
            tungstenite::connect(endpoint).map_err(|e| ChannelError::Connect {
                endpoint: endpoint.to_string(),
                source: Box::new(e),
            })?;
        info!(endpoint, status = %response.status(), "command channel connected");
        Ok(Self { socket })
    }
}

impl Transport for WebSocketTransport {
    fn send_text(&mut self, text: &str) -> Result<(), BoxError> {
        self.socket.send(Message::text(text))?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), BoxError> {
        match self.socket.close(None) {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) => {}
            Err(e) => return Err(Box::new(e)),
        }
        // Push the close frame out; the peer's reply is not awaited.
        match self.socket.flush() {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) => Ok(()),
            Err(e) => Err(Box::new(e)),
        }
    }
}
