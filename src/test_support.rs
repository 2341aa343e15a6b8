//! Helpers shared by unit tests.

use crate::types::{Board, Player, Square};

/// Builds a board from a 9-char pattern: `X`, `O`, anything else is empty.
pub fn board_of(cells: &str) -> Board {
    let mut squares = [Square::Empty; 9];
    for (square, c) in squares.iter_mut().zip(cells.chars()) {
        *square = match c {
            'X' => Square::Occupied(Player::X),
            'O' => Square::Occupied(Player::O),
            _ => Square::Empty,
        };
    }
    Board::from_squares(squares)
}
