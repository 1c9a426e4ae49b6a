//! The session controller is the entry point of the client.
//!
//! It owns the [`GameSocket`] and the [`GameState`] and turns player intent into commands. Every
//! action checks its preconditions first and quietly does nothing (besides a log line) if they
//! are not met, so front ends can wire buttons straight to the actions.
//!
//! A rough usage example looks like this:
//! ```text
//!
//!     let mut session = Session::connect(&config, &session_token, MyFrontend::default())?;
//!     loop {
//!         session.update(get_frame_time());
//!
//!         let state = session.state();
//!         match state.phase {
//!             RoundPhase::RoomInit => {
//!                 // Show create / join, eventually call session.create_room() or session.join_game(room).
//!             }
//!             RoundPhase::RoomConfig | RoundPhase::GameOver => {
//!                 // Show scores, the owner gets session.start_game() and session.edit_game().
//!             }
//!             RoundPhase::Started => {
//!                 // Show state.current_emote, call session.submit_guess(text) or session.skip().
//!             }
//!         }
//!
//!         next_frame().await
//!     }
//!
//! ```

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::event_handlers::default_handlers;
use crate::game_state::{GameState, RoundPhase};
use crate::timer::{Timer, TimerKind};
use crate::traits::{Frontend, SocketConnection};
use crate::transport_layer::{ConnectionEvent, GameSocket};
use crate::web_socket_interface::WebSocketConnection;
use protocol::ClientCommand;

/// The part of the config the handlers need.
#[derive(Clone, Debug)]
pub(crate) struct HandlerSettings {
    pub(crate) login_uri: String,
    pub(crate) wrong_guess_flash_secs: f32,
    pub(crate) pause_on_game_over: bool,
}

/// Everything the event handlers may touch. This is the context the socket hands to its
/// listeners, so custom listeners registered via [`Session::socket_mut`] get it as well.
pub struct SessionCore<F: Frontend> {
    pub state: GameState,
    pub frontend: F,
    pub(crate) timer: Timer,
    pub(crate) settings: HandlerSettings,
}

impl<F: Frontend> SessionCore<F> {
    fn advance_timers(&mut self, delta_time: f32) {
        for kind in self.timer.update_and_get_list(delta_time) {
            match kind {
                TimerKind::WrongGuessFlash => self.state.display_wrong = false,
            }
        }
    }
}

/// The game client. See the module documentation for the life cycle.
pub struct Session<F, Connection = WebSocketConnection>
where
    F: Frontend + 'static,
    Connection: SocketConnection,
{
    socket: GameSocket<SessionCore<F>, Connection>,
    core: SessionCore<F>,
}

impl<F> Session<F, WebSocketConnection>
where
    F: Frontend + 'static,
{
    /// Connects to the configured server and authenticates with `session_token`.
    ///
    /// Returns right away. Actions issued before the connection is up are buffered, but note
    /// that nothing besides `join_game` and `create_room` makes sense before the server assigned
    /// us a user id.
    pub fn connect(config: &ClientConfig, session_token: &str, frontend: F) -> Result<Self, TransportError> {
        let socket = GameSocket::connect(&config.server_uri, session_token)?;
        Ok(Self::with_socket(socket, config, frontend))
    }
}

impl<F, Connection> Session<F, Connection>
where
    F: Frontend + 'static,
    Connection: SocketConnection,
{
    /// Builds the session over an existing socket and registers the game handlers on it.
    pub fn with_socket(
        mut socket: GameSocket<SessionCore<F>, Connection>,
        config: &ClientConfig,
        frontend: F,
    ) -> Self {
        for (kind, handler) in default_handlers::<F>() {
            socket.add_event_listener(kind, handler);
        }
        socket.add_connection_listener(ConnectionEvent::Connect, |core: &mut SessionCore<F>| {
            core.state.connected = true;
        });
        socket.add_connection_listener(ConnectionEvent::Disconnect, |core: &mut SessionCore<F>| {
            core.state.connected = false;
        });

        Session {
            socket,
            core: SessionCore {
                state: GameState::new(config.default_duration_secs),
                frontend,
                timer: Timer::new(),
                settings: HandlerSettings {
                    login_uri: config.login_uri.clone(),
                    wrong_guess_flash_secs: config.wrong_guess_flash_secs,
                    pause_on_game_over: config.pause_on_game_over,
                },
            },
        }
    }

    /// Processes all network events and advances the local timers. Should be called once a frame,
    /// afterwards the state can be read for rendering.
    pub fn update(&mut self, delta_time: f32) {
        self.socket.update(&mut self.core);
        self.core.advance_timers(delta_time);
    }

    pub fn state(&self) -> &GameState {
        &self.core.state
    }

    pub fn frontend(&self) -> &F {
        &self.core.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.core.frontend
    }

    /// Gives access to the socket, e.g. to register additional listeners next to the game handlers.
    pub fn socket_mut(&mut self) -> &mut GameSocket<SessionCore<F>, Connection> {
        &mut self.socket
    }

    /// Updates the text the user is typing.
    pub fn set_guess(&mut self, guess: &str) {
        self.core.state.guess = guess.to_string();
    }

    /// Updates the round duration that `edit_game` will send.
    pub fn set_expected_duration(&mut self, seconds: u64) {
        self.core.state.expected_duration = seconds;
    }

    /// Asks the server for a new room. The server answers with a `room_join`.
    pub fn create_room(&mut self) {
        if !self.has_user() {
            return;
        }
        self.send(ClientCommand::CreateRoom);
    }

    /// Starts the round in the current room.
    pub fn start_game(&mut self) {
        let Some(room_id) = self.current_room() else { return };
        self.send(ClientCommand::StartGame { room_id });
    }

    /// Joins the indicated room.
    pub fn join_game(&mut self, room_id: &str) {
        if !self.has_user() {
            return;
        }
        self.send(ClientCommand::JoinRoom {
            room_id: room_id.to_string(),
        });
    }

    pub fn submit_guess(&mut self, guess: &str) {
        let Some(room_id) = self.current_room() else { return };
        self.send(ClientCommand::SubmitGuess {
            room_id,
            guess: guess.to_string(),
        });
    }

    pub fn skip(&mut self) {
        let Some(room_id) = self.current_room() else { return };
        self.send(ClientCommand::Skip { room_id });
    }

    /// Sends the locally set round duration to the server.
    pub fn edit_game(&mut self) {
        let Some(room_id) = self.current_room() else { return };
        self.send(ClientCommand::EditRoom {
            room_id,
            game_duration: self.core.state.expected_duration,
        });
    }

    /// Re-enters the current room after a round ended. Scores are zeroed right away, the
    /// server confirms with a fresh `room_join`.
    pub fn reset_state(&mut self) {
        let Some(room_id) = self.current_room() else { return };
        let state = &mut self.core.state;
        state.scores.clear();
        state.score = 0.0;
        state.phase = RoundPhase::RoomConfig;
        self.join_game(&room_id);
    }

    fn send(&mut self, command: ClientCommand) {
        tracing::debug!(command = command.name(), "Sending command.");
        self.socket.send(command);
    }

    fn has_user(&self) -> bool {
        if self.core.state.has_user() {
            return true;
        }
        tracing::warn!("User id is not set yet, cannot carry on.");
        false
    }

    /// The room id if we have a user and a room, logs otherwise.
    fn current_room(&self) -> Option<String> {
        if !self.has_user() {
            return None;
        }
        if !self.core.state.has_room() {
            tracing::warn!("Room id is not set, cannot carry on.");
            return None;
        }
        Some(self.core.state.room_id.clone())
    }
}
