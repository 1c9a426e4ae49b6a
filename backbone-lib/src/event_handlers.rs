//! The reactions to server events. Each handler translates one event kind into a change of the
//! [`GameState`](crate::game_state::GameState) and is registered on the socket by the session.

use crate::game_state::RoundPhase;
use crate::session::SessionCore;
use crate::timer::TimerKind;
use crate::traits::Frontend;
use protocol::{ErrorType, EventKind, ServerEvent};

/// The handlers in the order they get registered.
pub(crate) fn default_handlers<F: Frontend>() -> [(EventKind, fn(&mut SessionCore<F>, &ServerEvent)); 8] {
    [
        (EventKind::NewUser, on_new_user::<F>),
        (EventKind::RoomJoin, on_room_join::<F>),
        (EventKind::Emote, on_emote::<F>),
        (EventKind::GuessResponse, on_guess_response::<F>),
        (EventKind::GameStarted, on_game_started::<F>),
        (EventKind::GameOver, on_game_over::<F>),
        (EventKind::GameUpdate, on_game_update::<F>),
        (EventKind::Error, on_error::<F>),
    ]
}

fn on_new_user<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::NewUser(data) = event else { return };
    tracing::info!(user_id = %data.user_id, "Got user id.");
    core.state.user_id = data.user_id.clone();
}

fn on_room_join<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::RoomJoin(data) = event else { return };
    let state = &mut core.state;
    state.room_id = data.room_id.clone();
    state.score = 0.0;
    state.scores = data.scores.0.clone();
    if let Some(duration) = data.game_duration {
        state.expected_duration = duration;
    }
    state.is_owner = data.is_owner;
    if let Some(players) = &data.player_list {
        state.players = players.clone();
    }
    state.phase = RoundPhase::RoomConfig;
    tracing::info!(room_id = %data.room_id, is_owner = data.is_owner, "Joined room.");
}

fn on_emote<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::Emote(data) = event else { return };
    let state = &mut core.state;
    if state.phase == RoundPhase::RoomConfig {
        state.phase = RoundPhase::Started;
        state.score = 0.0;
    }
    state.current_emote = data.emote.clone();
    state.guess.clear();
    state.display_wrong = false;
    core.timer.cancel_timer(TimerKind::WrongGuessFlash);
}

fn on_guess_response<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::GuessResponse(data) = event else { return };
    let state = &mut core.state;
    state.current_emote.matched_chars = data.matched_chars.clone();
    state.score = data.score;
    state.display_wrong = true;

    let flash = core.settings.wrong_guess_flash_secs;
    if flash > 0.0 {
        core.timer.start_timer(TimerKind::WrongGuessFlash, flash);
    }
}

fn on_game_started<F: Frontend>(core: &mut SessionCore<F>, _: &ServerEvent) {
    // The first emote moves the phase, this is only a heads up.
    tracing::debug!(room_id = %core.state.room_id, "Game started.");
}

fn on_game_over<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::GameOver(data) = event else { return };
    let state = &mut core.state;
    state.phase = if core.settings.pause_on_game_over {
        RoundPhase::GameOver
    } else {
        RoundPhase::RoomConfig
    };
    state.display_wrong = false;
    core.timer.cancel_timer(TimerKind::WrongGuessFlash);

    match data.new_room_id.as_deref() {
        Some(new_room_id) if !new_room_id.is_empty() => {
            tracing::info!(old = %state.room_id, new = new_room_id, "Game over, room moved.");
            state.room_id = new_room_id.to_string();
        }
        _ => tracing::info!(room_id = %state.room_id, "Game over."),
    }
}

fn on_game_update<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::GameUpdate(data) = event else { return };
    core.state.scores = data.scores.0.clone();
}

fn on_error<F: Frontend>(core: &mut SessionCore<F>, event: &ServerEvent) {
    let ServerEvent::Error(data) = event else { return };
    match &data.error_type {
        ErrorType::AuthFailed => {
            tracing::error!(error_msg = %data.error_msg, "Authentication failed.");
            let login_uri = core.settings.login_uri.clone();
            core.frontend.navigate(&login_uri);
        }
        ErrorType::RoomJoinFailed => {
            tracing::warn!(error_msg = %data.error_msg, "Could not join room.");
            core.frontend.alert(&data.error_msg);
            core.state.room_id.clear();
        }
        ErrorType::RoomDisbanded => {
            tracing::warn!(error_msg = %data.error_msg, "Room got disbanded.");
            core.frontend.alert(&data.error_msg);
            core.state.phase = RoundPhase::RoomInit;
            core.state.room_id.clear();
        }
        ErrorType::Other(error_type) => {
            tracing::warn!(%error_type, error_msg = %data.error_msg, "Unhandled error type.");
        }
    }
}
