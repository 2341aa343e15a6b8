//! History consistency invariant: one ply per entry.

use super::Invariant;
use crate::history::History;

/// Invariant: Entry n holds exactly n marks and the step is in range.
///
/// Entry 0 is the empty board. Together with [`super::MonotonicBoardInvariant`]
/// this means consecutive entries differ in exactly one square.
pub struct HistoryConsistentInvariant;

impl Invariant<History> for HistoryConsistentInvariant {
    fn holds(history: &History) -> bool {
        !history.boards().is_empty()
            && history.step() < history.len()
            && history
                .boards()
                .iter()
                .enumerate()
                .all(|(n, board)| board.occupied() == n)
    }

    fn description() -> &'static str {
        "Each history entry adds exactly one mark"
    }
}
