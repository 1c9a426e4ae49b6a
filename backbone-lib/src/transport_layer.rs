//! The transport layer owns the socket connection and is the only place that touches frames.
//!
//! It provides:
//! - Fire and forget sending of typed frames via [`GameSocket::send`]
//! - A backlog, so frames issued before the connection is open are not lost
//! - The authentication handshake, queued as very first frame by [`GameSocket::connect`]
//! - Dispatch of incoming events to listeners registered per [`EventKind`]
//! - Listeners for the open and close transitions of the connection
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           GameSocket                             │
//! │                                                                  │
//! │   send() ──► open? ──yes──► SocketConnection::send_text()        │
//! │                │                      ▲                          │
//! │                no                     │ flush FIFO on Opened     │
//! │                ▼                      │                          │
//! │             backlog ──────────────────┘                          │
//! │                                                                  │
//! │   update() ──► poll_event() ──► Text ──► decode ──► listeners    │
//! │                             ├─► Opened / Closed ──► listeners    │
//! │                             └─► Error ──► log                    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The layer is heartbeat driven like the rest of the library: nothing happens until
//! [`GameSocket::update`] gets called, and all listeners run inside that call on the calling thread.
//! Listeners get the context handed to `update` by mutable reference, that is how they change state
//! without any shared ownership.

use crate::error::TransportError;
use crate::traits::{SocketConnection, SocketEvent};
use crate::web_socket_interface::WebSocketConnection;
use protocol::{Authenticate, ClientFrame, DecodeError, EventKind, ServerEvent, decode_event, encode_frame};
use std::collections::{HashMap, VecDeque};

/// A listener for one kind of incoming event.
pub type EventHandler<Ctx> = Box<dyn FnMut(&mut Ctx, &ServerEvent)>;

/// A listener for a connection transition.
pub type ConnectionHandler<Ctx> = Box<dyn FnMut(&mut Ctx)>;

/// The transitions of the connection one can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionEvent {
    /// The connection got opened. Fired after the backlog got flushed.
    Connect,
    /// The connection got closed.
    Disconnect,
}

/// Handle of a registered listener. Pass it to [`GameSocket::remove_listener`] to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// The core connection with its backlog and the dispatch tables.
///
/// # Type Parameters
///
/// * `Ctx` — What listeners get to mutate, typically the session state.
/// * `Connection` — The message pipe, the real web socket unless a test swaps it.
pub struct GameSocket<Ctx, Connection = WebSocketConnection>
where
    Connection: SocketConnection,
{
    /// The underlying connection.
    connection: Connection,

    /// Mirrors whether the connection reported open and not closed since.
    is_open: bool,

    /// Serialized frames waiting for the connection to open, in submission order.
    backlog: VecDeque<String>,

    /// The listeners per event kind in registration order.
    event_listeners: HashMap<EventKind, Vec<(Subscription, EventHandler<Ctx>)>>,

    /// The listeners per connection transition in registration order.
    connection_listeners: HashMap<ConnectionEvent, Vec<(Subscription, ConnectionHandler<Ctx>)>>,

    /// Counter for handing out subscriptions.
    next_subscription: u64,
}

impl<Ctx> GameSocket<Ctx, WebSocketConnection> {
    /// Opens the web socket to `uri` and queues the authentication frame carrying `credential`.
    ///
    /// Does not block. The authentication frame obeys the same rules as every other frame, so
    /// it waits in the backlog until the connection is open, ahead of anything sent afterwards.
    pub fn connect(uri: &str, credential: &str) -> Result<Self, TransportError> {
        let connection = WebSocketConnection::start_connecting(uri)?;
        Ok(Self::with_connection(connection, credential))
    }
}

impl<Ctx, Connection> GameSocket<Ctx, Connection>
where
    Connection: SocketConnection,
{
    /// Same as [`GameSocket::connect`] over an already started connection.
    pub fn with_connection(connection: Connection, credential: &str) -> Self {
        let mut socket = Self {
            connection,
            is_open: false,
            backlog: VecDeque::new(),
            event_listeners: HashMap::new(),
            connection_listeners: HashMap::new(),
            next_subscription: 0,
        };
        socket.authenticate(credential);
        socket
    }

    /// Sends a frame if the connection is open, otherwise appends it to the backlog.
    pub fn send(&mut self, frame: impl Into<ClientFrame>) {
        let frame = frame.into();
        let data = match encode_frame(&frame) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(?err, "Dropping frame that could not be encoded.");
                return;
            }
        };

        if self.is_open {
            self.connection.send_text(data);
        } else {
            self.backlog.push_back(data);
            tracing::trace!(backlog = self.backlog.len(), "Connection not open, frame queued.");
        }
    }

    /// Registers `handler` for every incoming event of `kind`. Handlers of one kind run in
    /// registration order.
    pub fn add_event_listener<Handler>(&mut self, kind: EventKind, handler: Handler) -> Subscription
    where
        Handler: FnMut(&mut Ctx, &ServerEvent) + 'static,
    {
        let subscription = self.next_subscription();
        self.event_listeners
            .entry(kind)
            .or_default()
            .push((subscription, Box::new(handler)));
        subscription
    }

    /// Registers `handler` for a transition of the connection.
    pub fn add_connection_listener<Handler>(
        &mut self,
        event: ConnectionEvent,
        handler: Handler,
    ) -> Subscription
    where
        Handler: FnMut(&mut Ctx) + 'static,
    {
        let subscription = self.next_subscription();
        self.connection_listeners
            .entry(event)
            .or_default()
            .push((subscription, Box::new(handler)));
        subscription
    }

    /// Unregisters a listener. Returns false if it was not registered (anymore).
    pub fn remove_listener(&mut self, subscription: Subscription) -> bool {
        for listeners in self.event_listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(s, _)| *s == subscription) {
                drop(listeners.remove(index));
                return true;
            }
        }
        for listeners in self.connection_listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(s, _)| *s == subscription) {
                drop(listeners.remove(index));
                return true;
            }
        }
        false
    }

    /// Processes everything the connection reported since the last call, in arrival order.
    ///
    /// Should be called once a frame. All listeners run inside this call.
    pub fn update(&mut self, ctx: &mut Ctx) {
        while let Some(event) = self.connection.poll_event() {
            match event {
                SocketEvent::Opened => self.on_connect(ctx),
                SocketEvent::Text(text) => self.on_message(ctx, &text),
                SocketEvent::Binary(data) => {
                    tracing::warn!(len = data.len(), "Dropping binary frame, the protocol is text only.");
                }
                SocketEvent::Error(error) => {
                    tracing::error!(%error, "Error in communication with the game server.");
                }
                SocketEvent::Closed => self.on_disconnect(ctx),
            }
        }
    }

    /// Whether the connection is currently open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The amount of frames waiting for the connection.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    fn authenticate(&mut self, credential: &str) {
        self.send(Authenticate {
            jwt: credential.to_string(),
        });
    }

    fn next_subscription(&mut self) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        subscription
    }

    /// Flushes the backlog first, so connect listeners already see an empty one.
    fn on_connect(&mut self, ctx: &mut Ctx) {
        self.is_open = true;
        let flushed = self.backlog.len();
        while let Some(data) = self.backlog.pop_front() {
            self.connection.send_text(data);
        }
        tracing::info!(flushed, "Connected to game server.");

        if let Some(listeners) = self.connection_listeners.get_mut(&ConnectionEvent::Connect) {
            for (_, handler) in listeners.iter_mut() {
                handler(ctx);
            }
        }
    }

    /// The backlog survives a disconnect. Frames sent from now on queue up behind it.
    fn on_disconnect(&mut self, ctx: &mut Ctx) {
        self.is_open = false;
        tracing::info!(backlog = self.backlog.len(), "Disconnected from game server.");

        if let Some(listeners) = self.connection_listeners.get_mut(&ConnectionEvent::Disconnect) {
            for (_, handler) in listeners.iter_mut() {
                handler(ctx);
            }
        }
    }

    fn on_message(&mut self, ctx: &mut Ctx, text: &str) {
        let event = match decode_event(text) {
            Ok(event) => event,
            Err(DecodeError::UnknownCommand(command)) => {
                tracing::debug!(%command, "No listeners for unknown command, dropping frame.");
                return;
            }
            Err(err) => {
                tracing::warn!(?err, "Dropping malformed frame.");
                return;
            }
        };

        let kind = event.kind();
        let Some(listeners) = self.event_listeners.get_mut(&kind) else {
            tracing::trace!(%kind, "No listeners registered.");
            return;
        };
        for (_, handler) in listeners.iter_mut() {
            handler(ctx, &event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockConnection, MockWire};
    use protocol::ClientCommand;
    use serde_json::{Value, json};

    fn socket_with_wire() -> (GameSocket<Vec<String>, MockConnection>, MockWire) {
        let (connection, wire) = MockConnection::new();
        (GameSocket::with_connection(connection, "secret"), wire)
    }

    fn join(room_id: &str) -> ClientCommand {
        ClientCommand::JoinRoom {
            room_id: room_id.to_string(),
        }
    }

    #[test]
    fn frames_before_open_are_flushed_once_in_order_behind_authentication() {
        let (mut socket, wire) = socket_with_wire();
        let mut log = Vec::new();

        socket.send(ClientCommand::CreateRoom);
        socket.send(join("R1"));
        assert!(wire.sent().is_empty());
        assert_eq!(socket.backlog_len(), 3);

        wire.push(SocketEvent::Opened);
        socket.update(&mut log);

        assert_eq!(
            wire.sent_json(),
            vec![
                json!({"jwt": "secret"}),
                json!({"command": "create_room"}),
                json!({"command": "join_room", "room_id": "R1"}),
            ]
        );
        assert_eq!(socket.backlog_len(), 0);
        assert!(socket.is_open());

        // A second heartbeat must not send anything again.
        socket.update(&mut log);
        assert_eq!(wire.sent().len(), 3);
    }

    #[test]
    fn frames_after_open_go_out_directly() {
        let (mut socket, wire) = socket_with_wire();
        wire.push(SocketEvent::Opened);
        socket.update(&mut Vec::new());

        socket.send(ClientCommand::Skip {
            room_id: "R1".to_string(),
        });

        assert_eq!(socket.backlog_len(), 0);
        assert_eq!(
            wire.sent_json().last(),
            Some(&json!({"command": "skip", "room_id": "R1"}))
        );
    }

    #[test]
    fn connect_listeners_run_after_flush_in_registration_order() {
        let (mut socket, wire) = socket_with_wire();
        let sent_at_connect = wire.clone();
        socket.add_connection_listener(ConnectionEvent::Connect, move |log: &mut Vec<String>| {
            log.push(format!("first after {} frames", sent_at_connect.sent().len()));
        });
        socket.add_connection_listener(ConnectionEvent::Connect, |log: &mut Vec<String>| {
            log.push("second".to_string());
        });
        socket.add_connection_listener(ConnectionEvent::Disconnect, |log: &mut Vec<String>| {
            log.push("gone".to_string());
        });
        socket.send(ClientCommand::CreateRoom);

        let mut log = Vec::new();
        wire.push(SocketEvent::Opened);
        socket.update(&mut log);
        assert_eq!(log, vec!["first after 2 frames", "second"]);

        wire.push(SocketEvent::Closed);
        socket.update(&mut log);
        assert_eq!(log, vec!["first after 2 frames", "second", "gone"]);
        assert!(!socket.is_open());
    }

    #[test]
    fn backlog_survives_disconnect_and_keeps_order_on_next_open() {
        let (mut socket, wire) = socket_with_wire();
        let mut log = Vec::new();
        wire.push(SocketEvent::Opened);
        socket.update(&mut log);
        wire.push(SocketEvent::Closed);
        socket.update(&mut log);

        socket.send(join("A"));
        socket.send(join("B"));
        assert_eq!(socket.backlog_len(), 2);

        wire.push(SocketEvent::Opened);
        socket.update(&mut log);

        let sent = wire.sent_json();
        assert_eq!(
            &sent[1..],
            &[
                json!({"command": "join_room", "room_id": "A"}),
                json!({"command": "join_room", "room_id": "B"}),
            ]
        );
        assert_eq!(socket.backlog_len(), 0);
    }

    #[test]
    fn every_listener_of_a_kind_fires_in_registration_order() {
        let (mut socket, wire) = socket_with_wire();
        socket.add_event_listener(EventKind::NewUser, |log: &mut Vec<String>, _: &ServerEvent| {
            log.push("a".to_string());
        });
        socket.add_event_listener(EventKind::NewUser, |log: &mut Vec<String>, event: &ServerEvent| {
            if let ServerEvent::NewUser(data) = event {
                log.push(format!("b:{}", data.user_id));
            }
        });
        socket.add_event_listener(EventKind::GameStarted, |log: &mut Vec<String>, _: &ServerEvent| {
            log.push("wrong kind".to_string());
        });

        let mut log = Vec::new();
        wire.push_text(r#"{"command":"new_user","user_id":"u1"}"#);
        socket.update(&mut log);

        assert_eq!(log, vec!["a", "b:u1"]);
    }

    #[test]
    fn removed_listener_stops_firing() {
        let (mut socket, wire) = socket_with_wire();
        let first = socket.add_event_listener(EventKind::GameStarted, |log: &mut Vec<String>, _: &ServerEvent| {
            log.push("first".to_string());
        });
        socket.add_event_listener(EventKind::GameStarted, |log: &mut Vec<String>, _: &ServerEvent| {
            log.push("second".to_string());
        });

        assert!(socket.remove_listener(first));
        assert!(!socket.remove_listener(first));

        let mut log = Vec::new();
        wire.push_text(r#"{"command":"game_started"}"#);
        socket.update(&mut log);
        assert_eq!(log, vec!["second"]);
    }

    #[test]
    fn bad_frames_are_dropped_without_disturbing_dispatch() {
        let (mut socket, wire) = socket_with_wire();
        socket.add_event_listener(EventKind::GuessResponse, |log: &mut Vec<String>, event: &ServerEvent| {
            if let ServerEvent::GuessResponse(data) = event {
                log.push(data.matched_chars.clone());
            }
        });

        wire.push_text("{not json");
        wire.push_text(r#"{"command":"leaderboard"}"#);
        wire.push_text(r#"{"command":"guess_response","matched_chars":42}"#);
        wire.push(SocketEvent::Binary(vec![1, 2, 3]));
        wire.push(SocketEvent::Error("reset by peer".to_string()));
        wire.push_text(r#"{"command":"guess_response","matched_chars":"k_p_a","score":1}"#);

        let mut log = Vec::new();
        socket.update(&mut log);

        assert_eq!(log, vec!["k_p_a"]);
        assert_eq!(socket.backlog_len(), 1);
        assert!(!socket.is_open());
    }

    #[test]
    fn authentication_is_the_only_frame_without_command() {
        let (mut socket, wire) = socket_with_wire();
        socket.send(ClientCommand::CreateRoom);
        wire.push(SocketEvent::Opened);
        socket.update(&mut Vec::new());

        let sent = wire.sent_json();
        assert_eq!(sent[0].get("command"), None);
        assert_eq!(sent[0]["jwt"], Value::from("secret"));
        assert!(sent[1..].iter().all(|frame| frame.get("command").is_some()));
    }
}
