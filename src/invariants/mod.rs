//! Invariants of the board history.
//!
//! Each invariant is a logical property of a [`History`] that every
//! engine transition must preserve. They are checked in debug builds after
//! each transition and can be tested independently.

use crate::history::History;

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: &'static str,
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All history invariants as a composable set.
pub type HistoryInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

/// Panics in debug builds when any history invariant is broken.
pub fn debug_check(history: &History) {
    if cfg!(debug_assertions) {
        if let Err(violations) = HistoryInvariants::check_all(history) {
            let descriptions = violations
                .iter()
                .map(|v| v.description)
                .collect::<Vec<_>>()
                .join("; ");
            panic!("history invariant violated: {descriptions}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::types::Player;

    #[test]
    fn test_invariant_set_holds_for_new_history() {
        assert!(HistoryInvariants::check_all(&History::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_branching() {
        let history = History::new()
            .with_move(Position::TopLeft, Player::X)
            .with_move(Position::Center, Player::O)
            .with_move(Position::TopRight, Player::X)
            .jumped_to(1)
            .expect("in range")
            .with_move(Position::BottomLeft, Player::O);
        assert!(HistoryInvariants::check_all(&history).is_ok());
        debug_check(&history);
    }
}
