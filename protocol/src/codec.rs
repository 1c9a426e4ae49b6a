//! JSON encoding of outgoing frames and validating decode of incoming ones.
//!
//! Decoding fails closed: an incoming frame is either a fully typed [`ServerEvent`] or an error that
//! tells the caller why it got rejected. Nothing is ever handed on half checked.

use crate::events::{EventKind, ServerEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why an incoming frame got rejected.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("frame has no string `command` field")]
    MissingCommand,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("payload of `{command}` does not match its schema: {source}")]
    Shape {
        command: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("could not serialize frame: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serializes an outgoing frame into the text that goes on the wire.
pub fn encode_frame<T: Serialize + ?Sized>(frame: &T) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(frame)?)
}

/// Only the discriminant of a frame, everything else is skipped.
#[derive(Deserialize)]
struct FrameHead {
    #[serde(default)]
    command: Value,
}

/// Parses and validates an incoming text frame.
///
/// The discriminant is looked at first, so a frame of a kind we do not know yet is reported as
/// [`DecodeError::UnknownCommand`] and not as a schema violation. The payload is then decoded
/// from the original text, so objects keep the order the server wrote them in.
pub fn decode_event(text: &str) -> Result<ServerEvent, DecodeError> {
    let head: FrameHead = serde_json::from_str(text).map_err(DecodeError::Malformed)?;
    let command = head.command.as_str().ok_or(DecodeError::MissingCommand)?;
    let kind = EventKind::from_command(command)
        .ok_or_else(|| DecodeError::UnknownCommand(command.to_string()))?;

    serde_json::from_str(text).map_err(|source| DecodeError::Shape {
        command: kind,
        source,
    })
}
