//! Core abstractions at the edges of the client.
//!
//! This module defines the two contracts the library talks through. The
//! [`SocketConnection`] is the raw message pipe below the transport layer, the
//! [`Frontend`] is the embedding application above the session controller.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Embedding application                   │
//! │  ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │
//! │  │   Frontend    │◄───│    Session    │───►│  GameSocket  │  │
//! │  │ (alert, nav)  │    │ (actions,     │    │ (backlog,    │  │
//! │  └───────────────┘    │  handlers)    │◄───│  dispatch)   │  │
//! │                       └───────────────┘    └──────────────┘  │
//! └──────────────────────────────────────────────────│───────────┘
//!                                                    │ SocketConnection
//!                                                    ▼
//!                                         ┌─────────────────────┐
//!                                         │     Game server     │
//!                                         └─────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! - **Outbound**: Actions become [`protocol::ClientCommand`]s, the socket encodes them and
//!   hands the text to [`SocketConnection::send_text`] (or keeps it in the backlog).
//! - **Inbound**: The socket drains [`SocketConnection::poll_event`] once per heartbeat and
//!   dispatches decoded events to the session handlers.
//! - **Side effects**: Handlers that need the user's attention go through [`Frontend`].

/// One thing that happened on the underlying connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEvent {
    /// The connection is established and frames can be sent.
    Opened,
    /// A text frame arrived.
    Text(String),
    /// A binary frame arrived. The game protocol does not use them.
    Binary(Vec<u8>),
    /// The transport reported a problem. The connection may still be alive.
    Error(String),
    /// The connection is gone.
    Closed,
}

/// A bidirectional message connection.
///
/// Implementations must never block: sending hands the frame to the transport and returns,
/// polling returns `None` as soon as nothing is pending. The production implementation is
/// [`crate::web_socket_interface::WebSocketConnection`].
pub trait SocketConnection {
    /// Transmits one text frame. Only called while the connection is open.
    fn send_text(&mut self, text: String);

    /// Returns the next pending event, if any.
    fn poll_event(&mut self) -> Option<SocketEvent>;
}

/// The parts of the embedding application the session controller needs.
///
/// Both calls come from inside [`crate::session::Session::update`], so an implementation may
/// simply record them and act after the update returned.
pub trait Frontend {
    /// Shows a blocking notice to the user, like a room that vanished.
    fn alert(&mut self, message: &str);

    /// Leaves the game for another location. Used when the server rejected our credentials,
    /// the session is over after that.
    fn navigate(&mut self, location: &str);
}
