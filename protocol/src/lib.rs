//! The frames we exchange with the game server. They are used consistently by the client library, the
//! front ends and the test servers.
//!
//! Every frame is one JSON text message on the web socket. Frames going to the server are
//! [`ClientFrame`]s, frames coming from the server are [`ServerEvent`]s. Both (except the authentication
//! frame) carry their discriminant in the `command` field.

pub mod codec;
pub mod commands;
pub mod events;

pub use codec::{DecodeError, EncodeError, decode_event, encode_frame};
pub use commands::{Authenticate, ClientCommand, ClientFrame};
pub use events::{
    Emote, EmoteData, ErrorData, ErrorType, EventKind, GameOverData, GameUpdateData, GuessData,
    NewUserData, RoomJoinData, Scoreboard, ServerEvent,
};
