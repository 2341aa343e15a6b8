//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::Invariant;
use crate::history::History;
use crate::types::Player;

/// Invariant: Players alternate turns.
///
/// Board n holds one more mark of `Player::for_step(n - 1)` than board
/// n - 1, so X always opens and the counts never drift apart.
pub struct AlternatingTurnInvariant;

impl Invariant<History> for AlternatingTurnInvariant {
    fn holds(history: &History) -> bool {
        history.boards().windows(2).enumerate().all(|(i, pair)| {
            let mover = Player::for_step(i);
            pair[1].count(mover) == pair[0].count(mover) + 1
                && pair[1].count(mover.opponent()) == pair[0].count(mover.opponent())
        })
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
