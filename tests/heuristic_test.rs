//! Tests for the computer opponent's move choice.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_engine::{Board, Player, Position, Square, choose_move};

const X: Square = Square::Occupied(Player::X);
const O: Square = Square::Occupied(Player::O);
const E: Square = Square::Empty;

fn pick(squares: [Square; 9], me: Player) -> Option<Position> {
    let mut rng = StdRng::seed_from_u64(0);
    choose_move(&Board::from_squares(squares), me, me.opponent(), &mut rng)
}

#[test]
fn test_blocks_open_threat() {
    // O has no two-in-line of its own, so it must stop X at the top right.
    let squares = [X, X, E, O, E, E, E, E, E];
    assert_eq!(pick(squares, Player::O), Some(Position::TopRight));
}

#[test]
fn test_own_two_in_line_beats_block() {
    let squares = [X, X, E, O, O, E, E, E, E];
    assert_eq!(pick(squares, Player::O), Some(Position::MiddleRight));
}

#[test]
fn test_completes_own_line_for_x() {
    let squares = [X, X, E, O, O, E, E, E, E];
    assert_eq!(pick(squares, Player::X), Some(Position::TopRight));
}

#[test]
fn test_first_line_in_scan_order_is_taken() {
    // O can win on the middle row or the left column; rows come first.
    let squares = [O, X, E, O, O, E, E, X, X];
    assert_eq!(pick(squares, Player::O), Some(Position::MiddleRight));
}

#[test]
fn test_empty_board_gets_random_square() {
    let mut seen = std::collections::HashSet::new();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let pos = choose_move(&Board::new(), Player::O, Player::X, &mut rng).expect("free square");
        seen.insert(pos);
    }
    assert!(seen.len() > 1, "random fallback should spread over squares");
}
