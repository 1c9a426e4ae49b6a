//! Client -> Server frames.

use serde::{Deserialize, Serialize};

/// The authentication frame. It is the only frame without a `command` field and is sent once,
/// ahead of everything else, right after the connection got established.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authenticate {
    /// The session token handed out by the login flow.
    pub jwt: String,
}

/// The game commands we can send to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Asks the server to allocate a new room owned by us. The answer is a `room_join`.
    CreateRoom,
    /// Enters an existing room.
    JoinRoom { room_id: String },
    /// Starts the round in the room (owner only, checked by the server).
    StartGame { room_id: String },
    /// Submits a guess for the current emote.
    SubmitGuess { room_id: String, guess: String },
    /// Gives up on the current emote.
    Skip { room_id: String },
    /// Changes the round duration in seconds.
    EditRoom { room_id: String, game_duration: u64 },
}

impl ClientCommand {
    /// The wire name of the command, handy for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::CreateRoom => "create_room",
            ClientCommand::JoinRoom { .. } => "join_room",
            ClientCommand::StartGame { .. } => "start_game",
            ClientCommand::SubmitGuess { .. } => "submit_guess",
            ClientCommand::Skip { .. } => "skip",
            ClientCommand::EditRoom { .. } => "edit_room",
        }
    }
}

/// Everything that can travel from the client to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientFrame {
    Authenticate(Authenticate),
    Command(ClientCommand),
}

impl From<Authenticate> for ClientFrame {
    fn from(value: Authenticate) -> Self {
        ClientFrame::Authenticate(value)
    }
}

impl From<ClientCommand> for ClientFrame {
    fn from(value: ClientCommand) -> Self {
        ClientFrame::Command(value)
    }
}
