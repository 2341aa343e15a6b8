//! Game rules for tic-tac-toe.
//!
//! Pure functions over a borrowed board. Rules are kept apart from the
//! turn engine so the computer opponent and the invariants can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Line, Win, check_winner, evaluate};
