//! The client side picture of the game. Only the session handlers and actions write to it,
//! front ends read it after every heartbeat.

use protocol::Emote;

/// The round duration in seconds until the server tells us otherwise.
pub const DEFAULT_GAME_DURATION_SECS: u64 = 100;

/// Where the room we are in stands.
///
/// ```text
/// RoomInit ──room_join──► RoomConfig ──emote──► Started ──game_over──► RoomConfig ...
///     ▲                                                                     │
///     └─────────────────────────── room_disbanded ◄─────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundPhase {
    /// Not in a room.
    #[default]
    RoomInit,
    /// In a room, waiting for the owner to start.
    RoomConfig,
    /// Emotes are coming in.
    Started,
    /// The round ended and the result is shown. Only entered when the session is configured to
    /// pause on game over, otherwise the session goes straight back to `RoomConfig`.
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub phase: RoundPhase,
    /// The last guess was wrong. Transient, cleared by the next emote or after a short while.
    pub display_wrong: bool,
    /// Assigned by the server, empty until then.
    pub user_id: String,
    /// The room we are in, empty if none.
    pub room_id: String,
    pub is_owner: bool,
    pub current_emote: Emote,
    /// What the user typed so far.
    pub guess: String,
    pub score: f64,
    /// Everybody's score in server order.
    pub scores: Vec<(String, f64)>,
    pub players: Vec<String>,
    /// Round duration in seconds.
    pub expected_duration: u64,
    pub connected: bool,
}

impl GameState {
    pub fn new(expected_duration: u64) -> Self {
        GameState {
            phase: RoundPhase::RoomInit,
            display_wrong: false,
            user_id: String::new(),
            room_id: String::new(),
            is_owner: false,
            current_emote: Emote::default(),
            guess: String::new(),
            score: 0.0,
            scores: Vec::new(),
            players: Vec::new(),
            expected_duration,
            connected: false,
        }
    }

    pub fn has_user(&self) -> bool {
        !self.user_id.is_empty()
    }

    pub fn has_room(&self) -> bool {
        !self.room_id.is_empty()
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(DEFAULT_GAME_DURATION_SECS)
    }
}
