use std::{error::Error, sync::Arc, time::Duration};

use clap::Parser;
use log::{error, warn};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc::{self, UnboundedSender},
};

use cli_player::CliCommand;
use mafia_client::{ChannelTransport, GameSession, ServerHandle, SessionConfig};
use mafia_core::{GameError, GameResult, PlayerAction, Role};

mod cli_player;

/// Plays one game of mafia in the terminal. Server events are replayed from
/// stdin as JSON lines and interleaved with the local player's commands.
#[derive(Parser, Debug)]
#[command(name = "mafia", version)]
struct Args {
    /// Nickname of the local player
    #[arg(long)]
    nickname: String,

    /// Role dealt to the local player
    #[arg(long)]
    role: String,

    /// Comma separated nicknames of everyone in the lobby
    #[arg(long, value_delimiter = ',', required = true)]
    players: Vec<String>,

    /// Advance the game after each resolved phase
    #[arg(long)]
    host: bool,

    /// Grace period before the host advances the game
    #[arg(long, default_value_t = 2000)]
    advance_delay_ms: u64,
}

impl Args {
    fn session_config(&self) -> GameResult<SessionConfig> {
        let role = Role::parse(&self.role)?;
        Ok(SessionConfig::new(self.nickname.clone(), role, self.players.clone())
            .with_host(self.host)
            .with_advance_delay(Duration::from_millis(self.advance_delay_ms)))
    }
}

/// Feeds stdin into the game: JSON lines play the server, everything else is
/// a command of the local player. Prints whatever the client sends back.
async fn relay(mut server: ServerHandle, player_actions: UnboundedSender<PlayerAction>) {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut reading = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if reading => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<CliCommand>() {
                    Ok(CliCommand::Server(message)) => {
                        if let Err(e) = server.push(message) {
                            warn!("Dropping server event: {}", e);
                        }
                    }
                    Ok(CliCommand::Player(action)) => {
                        if player_actions.send(action).is_err() {
                            reading = false;
                        }
                    }
                    Ok(CliCommand::Help) => println!("{}", cli_player::help()),
                    Ok(CliCommand::Rules) => println!("{}", cli_player::rules()),
                    Ok(CliCommand::Roles) => println!("{}", cli_player::roles()),
                    Ok(CliCommand::Quit) => {
                        server.close();
                        reading = false;
                    }
                    Err(e) => println!("{}, type h for help", e.0),
                },
                Ok(None) => {
                    server.close();
                    reading = false;
                }
                Err(e) => {
                    error!("Could not read stdin: {}", e);
                    server.close();
                    reading = false;
                }
            },
            sent = server.next_emitted() => match sent {
                Some(message) => println!("-> {} {}", message.event, message.payload),
                None => break,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.session_config()?;
    let roster = config.players.clone();

    let (transport, server) = ChannelTransport::pair();
    let session = GameSession::start(config, Arc::new(transport)).await?;

    println!("{}", cli_player::help());
    println!(
        "{}",
        cli_player::format_snapshot(&session.snapshot().await, &roster)
    );
    session
        .subscribe(move |state| println!("{}", cli_player::format_snapshot(state, &roster)))
        .await;

    let (player_tx, player_rx) = mpsc::unbounded_channel();
    let relay = tokio::spawn(relay(server, player_tx));

    let outcome = session.run(player_rx).await;
    relay.abort();

    match outcome {
        Ok(snapshot) => {
            println!("Game over, {}", snapshot.status);
            Ok(())
        }
        Err(GameError::TransportClosed) => {
            println!("Left the game before it ended");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
