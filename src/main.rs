//! Tic-tac-toe - terminal driver for the engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_engine::{EngineConfig, GameEvent, Mode, Player, Session, Snapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "1-9 play a square | r reset | j N jump to step N | m toggle mode | n X|O NAME rename | q quit";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            vs_computer,
            seed,
            delay_ms,
        } => {
            let config = load_config(config.as_deref(), vs_computer, seed, delay_ms)?;
            run_play(config).await
        }
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Builds the engine config: file first, then command-line overrides.
#[instrument]
fn load_config(
    path: Option<&std::path::Path>,
    vs_computer: bool,
    seed: Option<u64>,
    delay_ms: Option<u64>,
) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            debug!("No config file given, using defaults");
            EngineConfig::default()
        }
    };
    if vs_computer {
        config = config.with_mode(Mode::VsComputer);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_computer_delay_ms(delay_ms);
    }
    Ok(config)
}

/// Reads commands from stdin until `q` or end of input.
async fn run_play(config: EngineConfig) -> Result<()> {
    let session = Session::new(&config);
    let mut events = session.subscribe().await;

    println!("{HELP}");
    print_snapshot(&session.snapshot().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next() {
            Some("q") => break,
            Some("r") => session.on_reset().await,
            Some("m") => {
                let mode = session.snapshot().await.mode.toggle();
                session.on_mode_change(mode).await;
            }
            Some("j") => match words.next().and_then(|w| w.parse::<usize>().ok()) {
                Some(step) => {
                    if !session.on_jump(step).await {
                        println!("No step {step}");
                    }
                }
                None => println!("Usage: j N"),
            },
            Some("n") => {
                let player = match words.next() {
                    Some("X") | Some("x") => Player::X,
                    Some("O") | Some("o") => Player::O,
                    _ => {
                        println!("Usage: n X|O NAME");
                        continue;
                    }
                };
                let name = words.collect::<Vec<_>>().join(" ");
                session.set_player_name(player, name).await;
            }
            Some(cell) => match cell.parse::<usize>() {
                Ok(n @ 1..=9) => {
                    let outcome = session.on_cell_click(n - 1).await;
                    if !outcome.is_accepted() {
                        println!("{outcome:?}");
                    }
                    session.settle().await;
                }
                _ => println!("{HELP}"),
            },
            None => continue,
        }
        report_events(&mut events);
        print_snapshot(&session.snapshot().await);
    }

    info!("Leaving game");
    Ok(())
}

fn report_events(events: &mut mpsc::UnboundedReceiver<GameEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            GameEvent::MoveMade { player, position } => println!("{player} -> {position}"),
            GameEvent::GameOver { winner: Some(name) } => println!("{name} wins!"),
            GameEvent::GameOver { winner: None } => println!("Cat game."),
            GameEvent::StateChanged(_) => {}
        }
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    println!();
    println!("{}", snapshot.board.display());
    println!(
        "{} | {} {}: {} | {} {}: {} | step {}/{}",
        snapshot.status(),
        Player::X,
        snapshot.player_x,
        snapshot.scores.x,
        Player::O,
        snapshot.player_o,
        snapshot.scores.o,
        snapshot.step,
        snapshot.history_len - 1,
    );
}
