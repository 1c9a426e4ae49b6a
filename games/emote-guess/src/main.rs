mod input;
mod terminal;

use crate::input::{HELP, UserCommand, parse_line};
use crate::terminal::{TerminalFrontend, render_status};
use anyhow::Context;
use backbone_lib::{ClientConfig, Session};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Guess emotes against the game server from a terminal.
#[derive(Parser)]
struct Args {
    /// JSON file with the client configuration
    #[arg(long, env = "EMOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Web socket endpoint of the game server, overrides the configuration
    #[arg(long, env = "EMOTE_SERVER_URI")]
    server_uri: Option<String>,

    /// Session token the server authenticates us with
    #[arg(long, env = "EMOTE_SESSION_TOKEN")]
    session_token: String,

    /// Where to log in again when the token gets rejected, overrides the configuration
    #[arg(long, env = "EMOTE_LOGIN_URI")]
    login_uri: Option<String>,

    /// Heartbeat interval in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
/// Connects, then runs the heartbeat and reads commands from stdin until the user quits or the
/// server sends us to the login page.
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emote_guess=info,backbone_lib=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(server_uri) = args.server_uri {
        config.server_uri = server_uri;
    }
    if let Some(login_uri) = args.login_uri {
        config.login_uri = login_uri;
    }

    let mut session = Session::connect(&config, &args.session_token, TerminalFrontend::default())
        .with_context(|| format!("could not reach {}", config.server_uri))?;
    println!("{HELP}");

    let mut ticker = tokio::time::interval(Duration::from_millis(args.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();
    let mut last_status = String::new();

    loop {
        tokio::select! {
            now = ticker.tick() => {
                session.update(now.duration_since(last_tick).as_secs_f32());
                last_tick = now;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("could not read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(UserCommand::Quit)) => break,
                    Ok(Some(command)) => apply(&mut session, command),
                    Ok(None) => {}
                    Err(message) => println!("{message}"),
                }
            }
        }

        if let Some(location) = &session.frontend().navigation {
            tracing::info!(location = %location, "Leaving for the login page.");
            break;
        }
        let status = render_status(session.state());
        if status != last_status {
            println!("{status}");
            last_status = status;
        }
    }
    Ok(())
}

fn apply(session: &mut Session<TerminalFrontend>, command: UserCommand) {
    match command {
        UserCommand::CreateRoom => session.create_room(),
        UserCommand::JoinRoom(room_id) => session.join_game(&room_id),
        UserCommand::StartGame => session.start_game(),
        UserCommand::Guess(guess) => {
            session.set_guess(&guess);
            session.submit_guess(&guess);
        }
        UserCommand::Skip => session.skip(),
        UserCommand::Duration(seconds) => session.set_expected_duration(seconds),
        UserCommand::EditRoom => session.edit_game(),
        UserCommand::Again => session.reset_state(),
        UserCommand::State => println!("{:#?}", session.state()),
        UserCommand::Help => println!("{HELP}"),
        UserCommand::Quit => {}
    }
}
