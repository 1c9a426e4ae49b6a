//! Does all communication related stuff with the web socket.
//! Uses ewebsock, which covers native builds and WASM builds with the same api.

use crate::error::TransportError;
use crate::traits::{SocketConnection, SocketEvent};
use ewebsock::{WsEvent, WsMessage, WsReceiver, WsSender};

/// The live web socket. Owns both halves of the ewebsock connection.
pub struct WebSocketConnection {
    sender: WsSender,
    receiver: WsReceiver,
}

impl WebSocketConnection {
    /// Initiates the connection phase. Returns right away, the socket reports
    /// [`SocketEvent::Opened`] once the server accepted us.
    pub fn start_connecting(uri: &str) -> Result<WebSocketConnection, TransportError> {
        let options = ewebsock::Options::default();
        let (sender, receiver) =
            ewebsock::connect(uri, options).map_err(|reason| TransportError::Connect {
                uri: uri.to_string(),
                reason,
            })?;
        tracing::debug!(uri, "Started connecting.");

        Ok(WebSocketConnection { sender, receiver })
    }
}

impl SocketConnection for WebSocketConnection {
    fn send_text(&mut self, text: String) {
        self.sender.send(WsMessage::Text(text));
    }

    fn poll_event(&mut self) -> Option<SocketEvent> {
        loop {
            let event = match self.receiver.try_recv()? {
                WsEvent::Opened => SocketEvent::Opened,
                WsEvent::Message(WsMessage::Text(text)) => SocketEvent::Text(text),
                WsEvent::Message(WsMessage::Binary(data)) => SocketEvent::Binary(data),
                WsEvent::Message(_) => continue, // Ping, pong and friends are handled by the transport.
                WsEvent::Error(context) => SocketEvent::Error(context),
                WsEvent::Closed => SocketEvent::Closed,
            };
            return Some(event);
        }
    }
}
