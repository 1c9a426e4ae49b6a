//! Settings the embedding application hands to the session.
//! They can come from a JSON file, every missing entry falls back to its default.

use crate::error::ConfigError;
use crate::game_state::DEFAULT_GAME_DURATION_SECS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// The web socket endpoint of the game server.
    pub server_uri: String,
    /// Where to send the user when the server rejects the session token.
    pub login_uri: String,
    /// Round duration shown (and sent with `edit_room`) before a room told us its own.
    pub default_duration_secs: u64,
    /// How long the wrong guess feedback stays up. Zero keeps it until the next emote.
    pub wrong_guess_flash_secs: f32,
    /// Stay in the game over phase after a round until the user resets, instead of going
    /// straight back to the room configuration.
    pub pause_on_game_over: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_uri: "ws://127.0.0.1:8000/ws".to_string(),
            login_uri: "/login".to_string(),
            default_duration_secs: DEFAULT_GAME_DURATION_SECS,
            wrong_guess_flash_secs: 1.0,
            pause_on_game_over: false,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json_content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config =
            ClientConfig::from_json(r#"{"server_uri":"wss://emotes.example/ws","pause_on_game_over":true}"#)
                .unwrap();

        assert_eq!(config.server_uri, "wss://emotes.example/ws");
        assert!(config.pause_on_game_over);
        assert_eq!(config.login_uri, "/login");
        assert_eq!(config.default_duration_secs, DEFAULT_GAME_DURATION_SECS);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = ClientConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }
}
