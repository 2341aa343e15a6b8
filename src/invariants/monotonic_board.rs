//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::history::History;
use crate::types::Square;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Along the stored timeline, a square that is occupied on one board is
/// occupied by the same player on every later board.
pub struct MonotonicBoardInvariant;

impl Invariant<History> for MonotonicBoardInvariant {
    fn holds(history: &History) -> bool {
        history.boards().windows(2).all(|pair| {
            pair[0]
                .squares()
                .iter()
                .zip(pair[1].squares())
                .all(|(before, after)| *before == Square::Empty || before == after)
        })
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
