//! Turns the lines typed into the terminal into session actions.
//!
//! Everything starting with a slash is a command, any other text is a guess.

/// One thing the user asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserCommand {
    CreateRoom,
    JoinRoom(String),
    StartGame,
    Guess(String),
    Skip,
    /// Sets the local round duration without sending it.
    Duration(u64),
    /// Sends the local round duration to the server.
    EditRoom,
    /// Back into the room after a round.
    Again,
    State,
    Help,
    Quit,
}

pub const HELP: &str = "\
/create          create a new room
/join <room>     join a room
/start           start the round (room owner)
/skip            skip the current emote
/duration <sec>  set the round duration
/edit            send the round duration to the server (room owner)
/again           go back into the room after a round
/state           print the current state
/help            print this text
/quit            leave
anything else    guess the current emote";

/// Parses one line. Blank lines yield `None`, unusable ones an error text for the user.
pub fn parse_line(line: &str) -> Result<Option<UserCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(command_line) = line.strip_prefix('/') else {
        return Ok(Some(UserCommand::Guess(line.to_string())));
    };

    let mut words = command_line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let argument = words.next();

    let parsed = match (command, argument) {
        ("create", None) => UserCommand::CreateRoom,
        ("join", Some(room_id)) => UserCommand::JoinRoom(room_id.to_string()),
        ("join", None) => return Err("/join needs a room id".to_string()),
        ("start", None) => UserCommand::StartGame,
        ("skip", None) => UserCommand::Skip,
        ("duration", Some(seconds)) => match seconds.parse::<u64>() {
            Ok(seconds) if seconds > 0 => UserCommand::Duration(seconds),
            _ => return Err(format!("`{seconds}` is not a positive number of seconds")),
        },
        ("duration", None) => return Err("/duration needs a number of seconds".to_string()),
        ("edit", None) => UserCommand::EditRoom,
        ("again", None) => UserCommand::Again,
        ("state", None) => UserCommand::State,
        ("help", None) => UserCommand::Help,
        ("quit", None) => UserCommand::Quit,
        (_, _) => return Err(format!("unknown command `/{command_line}`, try /help")),
    };
    if words.next().is_some() {
        return Err(format!("too many arguments for /{command}"));
    }
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_guess() {
        assert_eq!(
            parse_line("  pogchamp \n"),
            Ok(Some(UserCommand::Guess("pogchamp".to_string())))
        );
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_line("/join R-17"),
            Ok(Some(UserCommand::JoinRoom("R-17".to_string())))
        );
        assert_eq!(parse_line("/duration 45"), Ok(Some(UserCommand::Duration(45))));
        assert_eq!(parse_line("/create"), Ok(Some(UserCommand::CreateRoom)));
        assert_eq!(parse_line("/quit"), Ok(Some(UserCommand::Quit)));
    }

    #[test]
    fn bad_commands_are_explained() {
        assert!(parse_line("/join").is_err());
        assert!(parse_line("/duration soon").is_err());
        assert!(parse_line("/duration 0").is_err());
        assert!(parse_line("/start now").is_err());
        assert!(parse_line("/teleport").unwrap_err().contains("/help"));
        assert!(parse_line("/").is_err());
    }
}
