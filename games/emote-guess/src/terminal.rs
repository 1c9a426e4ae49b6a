use backbone_lib::game_state::{GameState, RoundPhase};
use backbone_lib::traits::Frontend;

/// Prints alerts to the terminal. A navigation request ends the program, there is no login page
/// to go to on a terminal.
#[derive(Default)]
pub struct TerminalFrontend {
    pub navigation: Option<String>,
}

impl Frontend for TerminalFrontend {
    fn alert(&mut self, message: &str) {
        println!("!! {message}");
    }

    fn navigate(&mut self, location: &str) {
        println!("!! The server rejected the session token, log in again at {location}");
        self.navigation = Some(location.to_string());
    }
}

/// One line summary of what the user should see right now.
pub fn render_status(state: &GameState) -> String {
    if !state.connected {
        return "connecting to the game server ...".to_string();
    }
    if !state.has_user() {
        return "waiting for the server to accept the session ...".to_string();
    }

    match state.phase {
        RoundPhase::RoomInit => "not in a room, /create one or /join <room>".to_string(),
        RoundPhase::RoomConfig => {
            let role = if state.is_owner {
                ", /start when everybody is in"
            } else {
                ", waiting for the owner to start"
            };
            format!(
                "room {} | {}s rounds | {}{role}",
                state.room_id,
                state.expected_duration,
                render_scores(&state.scores)
            )
        }
        RoundPhase::Started => {
            let verdict = if state.display_wrong { " | wrong!" } else { "" };
            format!(
                "emote {} ({}) | score {}{verdict}",
                state.current_emote.matched_chars, state.current_emote.url, state.score
            )
        }
        RoundPhase::GameOver => format!(
            "game over in room {} | {} | /again to play on",
            state.room_id,
            render_scores(&state.scores)
        ),
    }
}

fn render_scores(scores: &[(String, f64)]) -> String {
    if scores.is_empty() {
        return "no scores yet".to_string();
    }
    scores
        .iter()
        .map(|(player, score)| format!("{player}: {score}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> GameState {
        GameState {
            connected: true,
            user_id: "u1".to_string(),
            room_id: "R1".to_string(),
            phase: RoundPhase::RoomConfig,
            expected_duration: 60,
            scores: vec![("u2".to_string(), 4.0), ("u1".to_string(), 1.5)],
            ..GameState::default()
        }
    }

    #[test]
    fn waits_for_connection_and_user() {
        assert!(render_status(&GameState::default()).starts_with("connecting"));
        let state = GameState {
            connected: true,
            ..GameState::default()
        };
        assert!(render_status(&state).starts_with("waiting for the server"));
    }

    #[test]
    fn room_config_shows_scores_in_order() {
        let status = render_status(&joined());
        assert_eq!(
            status,
            "room R1 | 60s rounds | u2: 4, u1: 1.5, waiting for the owner to start"
        );
    }

    #[test]
    fn running_round_flags_wrong_guesses() {
        let mut state = joined();
        state.phase = RoundPhase::Started;
        state.current_emote.matched_chars = "_o_".to_string();
        state.current_emote.url = "https://cdn/kappa".to_string();
        state.score = -0.2;
        assert_eq!(render_status(&state), "emote _o_ (https://cdn/kappa) | score -0.2");

        state.display_wrong = true;
        assert!(render_status(&state).ends_with("| wrong!"));
    }

    #[test]
    fn navigation_is_remembered() {
        let mut frontend = TerminalFrontend::default();
        frontend.alert("room owner left room");
        assert_eq!(frontend.navigation, None);
        frontend.navigate("/login");
        assert_eq!(frontend.navigation.as_deref(), Some("/login"));
    }
}
