//! Server -> Client frames.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The emote that has to be guessed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emote {
    /// The name of the emote where every character not yet guessed is masked out.
    pub matched_chars: String,
    /// Where the image of the emote can be fetched.
    pub url: String,
}

/// The score table of a room in the order the server sent it.
///
/// The server sends an object keyed by player, older builds sent a list of single entry objects
/// and some test servers send plain pairs. All of them end up as an ordered list of pairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ScoreboardWire", into = "ScoreboardWire")]
pub struct Scoreboard(pub Vec<(String, f64)>);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScoreboardWire {
    Map(IndexMap<String, f64>),
    Pairs(Vec<(String, f64)>),
    Maps(Vec<IndexMap<String, f64>>),
}

impl From<ScoreboardWire> for Scoreboard {
    fn from(value: ScoreboardWire) -> Self {
        match value {
            ScoreboardWire::Map(map) => Scoreboard(map.into_iter().collect()),
            ScoreboardWire::Pairs(pairs) => Scoreboard(pairs),
            ScoreboardWire::Maps(maps) => Scoreboard(maps.into_iter().flatten().collect()),
        }
    }
}

impl From<Scoreboard> for ScoreboardWire {
    fn from(value: Scoreboard) -> Self {
        ScoreboardWire::Map(value.0.into_iter().collect())
    }
}

impl From<Scoreboard> for Vec<(String, f64)> {
    fn from(value: Scoreboard) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserData {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomJoinData {
    pub room_id: String,
    #[serde(default)]
    pub scores: Scoreboard,
    /// Round duration in seconds, absent on servers that do not support editing rooms.
    #[serde(default)]
    pub game_duration: Option<u64>,
    #[serde(default)]
    pub is_owner: bool,
    /// Names of the players currently in the room, only sent by some server builds.
    #[serde(default)]
    pub player_list: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmoteData {
    pub emote: Emote,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuessData {
    /// The authoritative mask after the last guess.
    pub matched_chars: String,
    /// Our running score after the last guess.
    pub score: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverData {
    /// The room the server prepared for the next round.
    #[serde(default)]
    pub new_room_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameUpdateData {
    pub scores: Scoreboard,
}

/// The error classes the server reports. Unknown classes are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorType {
    AuthFailed,
    RoomJoinFailed,
    RoomDisbanded,
    Other(String),
}

impl ErrorType {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorType::AuthFailed => "auth_failed",
            ErrorType::RoomJoinFailed => "room_join_failed",
            ErrorType::RoomDisbanded => "room_disbanded",
            ErrorType::Other(other) => other,
        }
    }
}

impl From<String> for ErrorType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "auth_failed" => ErrorType::AuthFailed,
            "room_join_failed" => ErrorType::RoomJoinFailed,
            "room_disbanded" => ErrorType::RoomDisbanded,
            _ => ErrorType::Other(value),
        }
    }
}

impl From<ErrorType> for String {
    fn from(value: ErrorType) -> Self {
        match value {
            ErrorType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub error_type: ErrorType,
    #[serde(default)]
    pub error_msg: String,
}

/// Everything the server may send us.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ServerEvent {
    NewUser(NewUserData),
    RoomJoin(RoomJoinData),
    Emote(EmoteData),
    GuessResponse(GuessData),
    GameStarted,
    GameOver(GameOverData),
    GameUpdate(GameUpdateData),
    Error(ErrorData),
}

impl ServerEvent {
    /// The discriminant of the event, used as key for listener lookup.
    pub fn kind(&self) -> EventKind {
        match self {
            ServerEvent::NewUser(_) => EventKind::NewUser,
            ServerEvent::RoomJoin(_) => EventKind::RoomJoin,
            ServerEvent::Emote(_) => EventKind::Emote,
            ServerEvent::GuessResponse(_) => EventKind::GuessResponse,
            ServerEvent::GameStarted => EventKind::GameStarted,
            ServerEvent::GameOver(_) => EventKind::GameOver,
            ServerEvent::GameUpdate(_) => EventKind::GameUpdate,
            ServerEvent::Error(_) => EventKind::Error,
        }
    }
}

/// The values the `command` field of a [`ServerEvent`] can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewUser,
    RoomJoin,
    Emote,
    GuessResponse,
    GameStarted,
    GameOver,
    GameUpdate,
    Error,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::NewUser,
        EventKind::RoomJoin,
        EventKind::Emote,
        EventKind::GuessResponse,
        EventKind::GameStarted,
        EventKind::GameOver,
        EventKind::GameUpdate,
        EventKind::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::NewUser => "new_user",
            EventKind::RoomJoin => "room_join",
            EventKind::Emote => "emote",
            EventKind::GuessResponse => "guess_response",
            EventKind::GameStarted => "game_started",
            EventKind::GameOver => "game_over",
            EventKind::GameUpdate => "game_update",
            EventKind::Error => "error",
        }
    }

    /// Maps a wire discriminant to its kind, `None` for commands we do not know.
    pub fn from_command(command: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == command)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
