//! Computer opponent: win if possible, else block, else a random free cell.

use crate::position::Position;
use crate::rules::Line;
use crate::types::{Board, Player, Square};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Returns the empty cell that would complete a line for `player`.
///
/// Lines are scanned in rule order; a line qualifies when exactly two of
/// its cells hold `player` and the third is empty.
#[instrument(skip(board))]
pub fn find_completion(board: &Board, player: Player) -> Option<Position> {
    Line::all().find_map(|line| {
        let cells = line.cells();
        let held = cells
            .iter()
            .filter(|pos| board.get(**pos) == Square::Occupied(player))
            .count();
        if held != 2 {
            return None;
        }
        cells.into_iter().find(|pos| board.is_empty(*pos))
    })
}

/// Chooses a move for `me`.
///
/// Returns `None` only on a full board, which callers must never ask about.
#[instrument(skip(board, rng))]
pub fn choose_move<R: rand::Rng + ?Sized>(
    board: &Board,
    me: Player,
    opponent: Player,
    rng: &mut R,
) -> Option<Position> {
    if let Some(pos) = find_completion(board, me) {
        debug!(position = %pos, "Completing own line");
        return Some(pos);
    }
    if let Some(pos) = find_completion(board, opponent) {
        debug!(position = %pos, "Blocking opponent line");
        return Some(pos);
    }
    let open = Position::valid_moves(board);
    debug_assert!(!open.is_empty(), "computer asked to move on a full board");
    let pos = open.choose(rng).copied();
    debug!(position = ?pos, open = open.len(), "Random move");
    pos
}

/// Computer player owning its random source.
#[derive(Debug, Clone)]
pub struct ComputerOpponent {
    rng: StdRng,
}

impl ComputerOpponent {
    /// Creates an opponent seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an opponent with a reproducible sequence of random moves.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a move for `me` against `me.opponent()`.
    pub fn pick_move(&mut self, board: &Board, me: Player) -> Option<Position> {
        choose_move(board, me, me.opponent(), &mut self.rng)
    }
}

impl Default for ComputerOpponent {
    fn default() -> Self {
        Self::new()
    }
}
