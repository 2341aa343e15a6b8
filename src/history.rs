//! Board history with time travel.

use crate::position::Position;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Every board of the current timeline plus the displayed step.
///
/// Entry 0 is always the empty board. Jumping back keeps later entries
/// until the next move overwrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    boards: Vec<Board>,
    step: usize,
}

impl History {
    /// Creates a history holding only the empty board.
    pub fn new() -> Self {
        Self {
            boards: vec![Board::new()],
            step: 0,
        }
    }

    /// Builds a history from raw parts without any checks.
    #[cfg(test)]
    pub(crate) fn from_parts(boards: Vec<Board>, step: usize) -> Self {
        Self { boards, step }
    }

    /// The displayed board.
    pub fn current(&self) -> &Board {
        &self.boards[self.step]
    }

    /// Index of the displayed board.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of boards in the log, including the empty start.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Always false; the empty start board is never removed.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// All boards in order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Player whose turn it is at the displayed step.
    pub fn to_move(&self) -> Player {
        Player::for_step(self.step)
    }

    /// Returns a history displaying `step`, or `None` when out of range.
    #[instrument(skip(self), fields(len = self.boards.len()))]
    pub fn jumped_to(&self, step: usize) -> Option<Self> {
        if step >= self.boards.len() {
            return None;
        }
        Some(Self {
            boards: self.boards.clone(),
            step,
        })
    }

    /// Returns a history with `player` marking `pos` on the displayed board.
    ///
    /// Boards after the displayed step are discarded first.
    #[instrument(skip(self), fields(step = self.step, len = self.boards.len()))]
    pub fn with_move(&self, pos: Position, player: Player) -> Self {
        let next = self.current().with_mark(pos, player);
        let mut boards = self.boards[..=self.step].to_vec();
        if boards.len() < self.boards.len() {
            debug!(
                discarded = self.boards.len() - boards.len(),
                "Overwriting future boards"
            );
        }
        boards.push(next);
        let step = boards.len() - 1;
        Self { boards, step }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
