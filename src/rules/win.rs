//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the 8 winning triples, numbered 0-7 in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line(u8);

/// Cells of every line: rows, then columns, then diagonals.
const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

impl Line {
    /// All lines in scan order.
    pub fn all() -> impl Iterator<Item = Line> {
        (0..LINES.len() as u8).map(Line)
    }

    /// Returns the line with the given index, if it exists.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < LINES.len()).then(|| Line(index as u8))
    }

    /// Index of this line (0-7).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The three cells of this line.
    pub fn cells(self) -> [Position; 3] {
        LINES[self.index()]
    }
}

/// A completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Player holding all three cells.
    pub player: Player,
    /// Which line was completed.
    pub line: Line,
}

/// Evaluates the board for a winner.
///
/// Returns the first line in scan order whose three cells hold the same
/// player. A full board without such a line yields `None`.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Win> {
    Line::all().find_map(|line| {
        let [a, b, c] = line.cells();
        match board.get(a) {
            Square::Occupied(player) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some(Win { player, line })
            }
            _ => None,
        }
    })
}

/// Returns the winning player, if any.
pub fn check_winner(board: &Board) -> Option<Player> {
    evaluate(board).map(|win| win.player)
}
