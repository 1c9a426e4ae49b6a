//! Client side of the emote guessing game.
//!
//! The overall architecture is like this:
//! Frontend -> Session -> GameSocket -> game server.
//! The frontend works heartbeat driven: it calls [`session::Session::update`] once a frame, which
//! processes everything the server sent since the last frame, and then renders from
//! [`session::Session::state`]. User interactions go to the action methods of the session, which
//! validate them and hand the resulting commands to the socket.
//!
//! The modules in order of the data flow:
//! * [`session`]: actions and the state the front end renders from.
//! * `event_handlers`: how every server event changes that state.
//! * [`transport_layer`]: backlog, authentication and dispatch by event kind.
//! * [`web_socket_interface`]: the actual web socket.
//! * [`traits`]: the seams to the connection and to the front end.

pub mod config;
pub mod error;
mod event_handlers;
pub mod game_state;
pub mod session;
pub mod timer;
pub mod traits;
pub mod transport_layer;
pub mod web_socket_interface;

#[cfg(test)]
mod test_support;

pub use config::ClientConfig;
pub use game_state::{GameState, RoundPhase};
pub use session::{Session, SessionCore};
pub use traits::Frontend;
