//! Tests for board positions and win evaluation.

use tictactoe_engine::{Board, Line, Player, Position, evaluate, is_draw, is_full};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_valid_moves_empty_board() {
    assert_eq!(Position::valid_moves(&Board::new()).len(), 9);
}

#[test]
fn test_lines_follow_rows_columns_diagonals() {
    let cells: Vec<[usize; 3]> = Line::all()
        .map(|line| line.cells().map(Position::to_index))
        .collect();
    assert_eq!(
        cells,
        vec![
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ]
    );
}

#[test]
fn test_column_win_reports_line_index() {
    let board = Board::new()
        .with_mark(Position::TopCenter, Player::O)
        .with_mark(Position::Center, Player::O)
        .with_mark(Position::BottomCenter, Player::O)
        .with_mark(Position::TopLeft, Player::X);
    let win = evaluate(&board).expect("column win");
    assert_eq!(win.player, Player::O);
    assert_eq!(win.line.index(), 4);
    assert!(!is_full(&board));
    assert!(!is_draw(&board));
}
