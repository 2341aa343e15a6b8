//! Turn engine: move validation, scoring, time travel and computer tickets.
//!
//! The engine owns a single [`GameState`] value. Every transition builds the
//! next value from the current one and swaps it in whole; subscribers are
//! told about each swap through [`GameEvent`]s.

use crate::config::EngineConfig;
use crate::heuristic::ComputerOpponent;
use crate::history::History;
use crate::invariants;
use crate::position::Position;
use crate::rules::{self, Win};
use crate::types::{Board, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Who plays O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    #[strum(to_string = "two players")]
    TwoPlayer,
    /// The human plays X against the computer.
    #[strum(to_string = "vs computer")]
    VsComputer,
}

impl Mode {
    /// Switches between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Mode::TwoPlayer => Mode::VsComputer,
            Mode::VsComputer => Mode::TwoPlayer,
        }
    }
}

/// Whether moves are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    InPlay,
    /// A line was completed or the board filled up.
    Ended,
}

/// Games won per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Wins for X's owner.
    pub x: u32,
    /// Wins for O's owner (the computer in single-player mode).
    pub o: u32,
}

impl Scores {
    /// Returns the scores with one more win for `player`.
    pub fn record(self, player: Player) -> Self {
        match player {
            Player::X => Self { x: self.x + 1, ..self },
            Player::O => Self { o: self.o + 1, ..self },
        }
    }

    /// Wins recorded for `player`.
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }
}

/// Display names chosen by the players.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerNames {
    x: Option<String>,
    o: Option<String>,
}

impl PlayerNames {
    /// Name shown for `player` under `mode`.
    pub fn display_name(&self, player: Player, mode: Mode) -> String {
        let chosen = match player {
            Player::X => &self.x,
            Player::O => &self.o,
        };
        match (chosen, player, mode) {
            (Some(name), _, _) => name.clone(),
            (None, Player::O, Mode::VsComputer) => "Computer".to_string(),
            (None, player, _) => format!("Player {}", player),
        }
    }

    fn with(&self, player: Player, name: String) -> Self {
        let mut next = self.clone();
        match player {
            Player::X => next.x = Some(name),
            Player::O => next.o = Some(name),
        }
        next
    }
}

/// Why a command was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RejectReason {
    /// The game has ended.
    #[display("Game is already over")]
    GameOver,

    /// The square is already taken.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The computer owns this turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Player),

    /// Cell index outside 0-8.
    #[display("No square at index {}", _0)]
    OutOfBounds(usize),

    /// The board changed after the computer's move was scheduled.
    #[display("Computer move is stale")]
    Stale,
}

/// Result of a move command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed.
    Rejected(RejectReason),
    /// The mark was placed and the game goes on.
    Played {
        /// Who moved.
        player: Player,
        /// Where.
        position: Position,
    },
    /// The mark was placed and the computer should answer.
    ComputerToMove(ComputerTicket),
    /// The mark completed a line.
    Won(Win),
    /// The mark filled the board without completing a line.
    Draw,
}

impl MoveOutcome {
    /// True when the board changed.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }
}

/// Permission for the computer to answer a specific board.
///
/// Redeeming it with [`GameEngine::play_computer`] is a no-op once a reset,
/// jump or mode change has happened since it was issued.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ComputerTicket {
    /// Generation the ticket was issued in.
    generation: u64,
    /// Board the computer must answer.
    board: Board,
}

/// Notification sent to subscribers after each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed.
    MoveMade {
        /// Who moved.
        player: Player,
        /// Where.
        position: Position,
    },
    /// The game ended; `None` means a draw.
    GameOver {
        /// Display name of the winner.
        winner: Option<String>,
    },
    /// New state to render.
    StateChanged(Snapshot),
}

/// Read-only view for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Displayed board.
    pub board: Board,
    /// Whether moves are accepted.
    pub phase: Phase,
    /// Symbol to move on the displayed board.
    pub to_move: Player,
    /// Win counters.
    pub scores: Scores,
    /// Display name of the last game's winner.
    pub winner: Option<String>,
    /// Completed line on the displayed board, for highlighting.
    pub winning_line: Option<Win>,
    /// Displayed history step.
    pub step: usize,
    /// Number of boards in the history.
    pub history_len: usize,
    /// Current mode.
    pub mode: Mode,
    /// Display name of X.
    pub player_x: String,
    /// Display name of O.
    pub player_o: String,
}

impl Snapshot {
    /// One-line status for the board header.
    pub fn status(&self) -> String {
        match (self.winning_line, self.phase) {
            (Some(win), _) => {
                let name = match win.player {
                    Player::X => &self.player_x,
                    Player::O => &self.player_o,
                };
                format!("Winner: {} {}", win.player, name)
            }
            (None, Phase::Ended) => match &self.winner {
                Some(name) => format!("Game over. {} won", name),
                None => "Draw".to_string(),
            },
            (None, Phase::InPlay) => format!("Next player: {}", self.to_move),
        }
    }
}

/// Complete engine state. Replaced wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// Boards of the timeline and the displayed step.
    history: History,
    /// Whether moves are accepted.
    phase: Phase,
    /// Win counters.
    scores: Scores,
    /// Chosen display names.
    names: PlayerNames,
    /// Display name recorded when the last game was won.
    winner: Option<String>,
    /// Current mode.
    mode: Mode,
    /// Bumped by reset, jump and mode change.
    generation: u64,
}

impl GameState {
    /// Creates a fresh game in `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            history: History::new(),
            phase: Phase::InPlay,
            scores: Scores::default(),
            names: PlayerNames::default(),
            winner: None,
            mode,
            generation: 0,
        }
    }

    /// Symbol to move on the displayed board.
    pub fn to_move(&self) -> Player {
        self.history.to_move()
    }

    /// Places the active symbol at `pos` and applies the rules.
    ///
    /// Does not check whose turn it is; callers decide who may move.
    fn place(&self, pos: Position) -> Result<(Self, MoveOutcome), RejectReason> {
        if self.phase == Phase::Ended {
            return Err(RejectReason::GameOver);
        }
        if !self.history.current().is_empty(pos) {
            return Err(RejectReason::SquareOccupied(pos));
        }

        let player = self.to_move();
        let mut next = Self {
            history: self.history.with_move(pos, player),
            ..self.clone()
        };

        let outcome = if let Some(win) = rules::evaluate(next.history.current()) {
            next.scores = next.scores.record(win.player);
            next.phase = Phase::Ended;
            next.winner = Some(next.names.display_name(win.player, next.mode));
            MoveOutcome::Won(win)
        } else if rules::is_full(next.history.current()) {
            next.phase = Phase::Ended;
            next.winner = None;
            MoveOutcome::Draw
        } else {
            MoveOutcome::Played {
                player,
                position: pos,
            }
        };

        Ok((next, outcome))
    }

    fn snapshot(&self) -> Snapshot {
        let board = self.history.current().clone();
        Snapshot {
            winning_line: rules::evaluate(&board),
            board,
            phase: self.phase,
            to_move: self.to_move(),
            scores: self.scores,
            winner: self.winner.clone(),
            step: self.history.step(),
            history_len: self.history.len(),
            mode: self.mode,
            player_x: self.names.display_name(Player::X, self.mode),
            player_o: self.names.display_name(Player::O, self.mode),
        }
    }
}

/// Owns the game state, the computer opponent and the subscriber list.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    computer: ComputerOpponent,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl GameEngine {
    /// Creates an engine from configuration.
    #[instrument(skip(config), fields(mode = ?config.mode()))]
    pub fn new(config: &EngineConfig) -> Self {
        let mut state = GameState::new(*config.mode());
        if let Some(name) = config.player_x_name() {
            state.names = state.names.with(Player::X, name.clone());
        }
        if let Some(name) = config.player_o_name() {
            state.names = state.names.with(Player::O, name.clone());
        }
        let computer = match config.seed() {
            Some(seed) => ComputerOpponent::seeded(*seed),
            None => ComputerOpponent::new(),
        };
        Self {
            state,
            computer,
            subscribers: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// View of the current state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Registers a new listener for state changes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Applies a human click on `pos`.
    ///
    /// Invalid clicks change nothing and come back as
    /// [`MoveOutcome::Rejected`]. In single-player mode a continuing game
    /// yields a [`ComputerTicket`] for the answer.
    #[instrument(skip(self), fields(step = self.state.history.step(), mode = ?self.state.mode))]
    pub fn apply_move(&mut self, pos: Position) -> MoveOutcome {
        let state = &self.state;
        if state.phase == Phase::InPlay
            && state.mode == Mode::VsComputer
            && state.to_move() != Player::X
        {
            debug!("Click while the computer is to move");
            return MoveOutcome::Rejected(RejectReason::NotYourTurn(Player::X));
        }

        let player = state.to_move();
        let (next, outcome) = match state.place(pos) {
            Ok(placed) => placed,
            Err(reason) => {
                debug!(%reason, "Move rejected");
                return MoveOutcome::Rejected(reason);
            }
        };

        let computer_answers =
            matches!(outcome, MoveOutcome::Played { .. }) && next.mode == Mode::VsComputer;
        let ticket = ComputerTicket {
            generation: next.generation,
            board: next.history.current().clone(),
        };
        self.commit_move(next, player, pos, &outcome);

        if computer_answers {
            debug!(generation = ticket.generation, "Computer to move");
            MoveOutcome::ComputerToMove(ticket)
        } else {
            outcome
        }
    }

    /// Plays the computer's answer described by `ticket`.
    ///
    /// Stale tickets are ignored.
    #[instrument(skip(self, ticket), fields(ticket_generation = ticket.generation, generation = self.state.generation))]
    pub fn play_computer(&mut self, ticket: &ComputerTicket) -> MoveOutcome {
        let state = &self.state;
        if ticket.generation != state.generation
            || ticket.board != *state.history.current()
            || state.phase != Phase::InPlay
        {
            warn!("Ignoring stale computer move");
            return MoveOutcome::Rejected(RejectReason::Stale);
        }
        debug_assert_eq!(state.to_move(), Player::O, "computer plays O");

        let Some(pos) = self.computer.pick_move(&ticket.board, Player::O) else {
            warn!("Computer found no free square");
            return MoveOutcome::Rejected(RejectReason::GameOver);
        };

        match state.place(pos) {
            Ok((next, outcome)) => {
                debug!(position = %pos, "Computer moved");
                self.commit_move(next, Player::O, pos, &outcome);
                outcome
            }
            Err(reason) => MoveOutcome::Rejected(reason),
        }
    }

    /// Shows history step `step`.
    ///
    /// `step` must be below the history length; debug builds panic
    /// otherwise and release builds ignore the call. Later boards are kept
    /// until the next move.
    ///
    /// Every accepted jump bumps the generation and publishes a new
    /// snapshot, even when `step` is already displayed, so an outstanding
    /// [`ComputerTicket`] goes stale.
    #[instrument(skip(self), fields(len = self.state.history.len()))]
    pub fn jump_to(&mut self, step: usize) -> bool {
        debug_assert!(
            step < self.state.history.len(),
            "jump target {step} outside history of {}",
            self.state.history.len()
        );
        let Some(history) = self.state.history.jumped_to(step) else {
            warn!("Jump target out of range");
            return false;
        };
        let next = GameState {
            history,
            generation: self.state.generation + 1,
            ..self.state.clone()
        };
        debug!(to_move = %next.to_move(), "Jumped");
        self.commit(next, Vec::new());
        true
    }

    /// Starts a new game on an empty board. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let next = GameState {
            history: History::new(),
            phase: Phase::InPlay,
            winner: None,
            generation: self.state.generation + 1,
            ..self.state.clone()
        };
        info!(scores = ?next.scores, "Board reset");
        self.commit(next, Vec::new());
    }

    /// Switches mode, clearing scores and resetting the board.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        info!(from = %self.state.mode, to = %mode, "Mode changed");
        self.state = GameState {
            mode,
            scores: Scores::default(),
            ..self.state.clone()
        };
        self.reset();
    }

    /// Records a display name. Game logic is unaffected.
    #[instrument(skip(self, name))]
    pub fn set_player_name(&mut self, player: Player, name: impl Into<String>) {
        let name = name.into();
        debug!(%name, "Player renamed");
        let next = GameState {
            names: self.state.names.with(player, name),
            ..self.state.clone()
        };
        self.commit(next, Vec::new());
    }

    fn commit_move(&mut self, next: GameState, player: Player, position: Position, outcome: &MoveOutcome) {
        let mut events = vec![GameEvent::MoveMade { player, position }];
        match outcome {
            MoveOutcome::Won(win) => {
                info!(winner = %win.player, line = win.line.index(), scores = ?next.scores, "Game won");
                events.push(GameEvent::GameOver {
                    winner: next.winner.clone(),
                });
            }
            MoveOutcome::Draw => {
                info!("Game drawn");
                events.push(GameEvent::GameOver { winner: None });
            }
            _ => {}
        }
        self.commit(next, events);
    }

    fn commit(&mut self, next: GameState, mut events: Vec<GameEvent>) {
        invariants::debug_check(&next.history);
        self.state = next;
        events.push(GameEvent::StateChanged(self.state.snapshot()));
        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
