//! Tic-tac-toe engine for a rendered game board.
//!
//! The crate holds everything a board component needs except the drawing:
//! rules, move history with time travel, scoring, and a computer opponent
//! that answers after a short delay.
//!
//! # Architecture
//!
//! - **Rules**: pure win and draw evaluation over a [`Board`]
//! - **Engine**: turn validation, history, scores, computer tickets
//! - **Heuristic**: win, else block, else a random free square
//! - **Session**: async entry points and the cancellable computer timer
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_engine::{EngineConfig, Mode, Session};
//!
//! # async fn example() {
//! let session = Session::new(&EngineConfig::default().with_mode(Mode::VsComputer));
//! session.on_cell_click(4).await;
//! session.settle().await;
//! println!("{}", session.snapshot().await.status());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod heuristic;
mod history;
mod invariants;
mod position;
mod rules;
mod session;
mod types;

#[cfg(test)]
mod test_support;

// Crate-level exports - Board types
pub use position::Position;
pub use types::{Board, Player, Square};

// Crate-level exports - Rules
pub use rules::{Line, Win, check_winner, evaluate, is_draw, is_full};

// Crate-level exports - History and invariants
pub use history::History;
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, HistoryInvariants, Invariant,
    InvariantSet, InvariantViolation, MonotonicBoardInvariant,
};

// Crate-level exports - Computer opponent
pub use heuristic::{ComputerOpponent, choose_move, find_completion};

// Crate-level exports - Engine
pub use engine::{
    ComputerTicket, GameEngine, GameEvent, GameState, Mode, MoveOutcome, Phase, PlayerNames,
    RejectReason, Scores, Snapshot,
};

// Crate-level exports - Session and configuration
pub use config::{ConfigError, EngineConfig};
pub use session::Session;
