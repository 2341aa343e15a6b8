//! End-to-end scenarios for the turn engine.

use tictactoe_engine::{
    EngineConfig, GameEngine, GameEvent, Mode, MoveOutcome, Phase, Player, Position,
    RejectReason, Scores,
};

fn two_player() -> GameEngine {
    GameEngine::default()
}

fn vs_computer(seed: u64) -> GameEngine {
    GameEngine::new(&EngineConfig::default().with_mode(Mode::VsComputer).with_seed(seed))
}

fn play(engine: &mut GameEngine, indices: &[usize]) -> Vec<MoveOutcome> {
    indices
        .iter()
        .map(|&i| engine.apply_move(Position::from_index(i).expect("valid index")))
        .collect()
}

#[test]
fn test_two_player_alternation() {
    let mut engine = two_player();
    play(&mut engine, &[4, 0]);

    let board = engine.state().history().current();
    assert_eq!(board.get(Position::Center).player(), Some(Player::X));
    assert_eq!(board.get(Position::TopLeft).player(), Some(Player::O));
    assert_eq!(engine.state().to_move(), Player::X);
}

#[test]
fn test_occupied_square_is_a_no_op() {
    let mut engine = two_player();
    play(&mut engine, &[4]);
    let before = engine.state().clone();

    let outcome = engine.apply_move(Position::Center);
    assert_eq!(
        outcome,
        MoveOutcome::Rejected(RejectReason::SquareOccupied(Position::Center))
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_human_cannot_move_for_the_computer() {
    let mut engine = vs_computer(1);
    let first = engine.apply_move(Position::TopLeft);
    assert!(matches!(first, MoveOutcome::ComputerToMove(_)));

    let second = engine.apply_move(Position::TopCenter);
    assert_eq!(
        second,
        MoveOutcome::Rejected(RejectReason::NotYourTurn(Player::X))
    );
    assert_eq!(engine.state().history().len(), 2);
    assert!(engine.state().history().current().is_empty(Position::TopCenter));
}

#[test]
fn test_win_scores_and_ends_game() {
    let mut engine = two_player();
    engine.set_player_name(Player::X, "Ada");
    let outcomes = play(&mut engine, &[0, 3, 1, 4, 2]);

    match outcomes.last() {
        Some(MoveOutcome::Won(win)) => {
            assert_eq!(win.player, Player::X);
            assert_eq!(win.line.index(), 0);
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert_eq!(*engine.state().phase(), Phase::Ended);
    assert_eq!(*engine.state().scores(), Scores { x: 1, o: 0 });
    assert_eq!(engine.state().winner().as_deref(), Some("Ada"));
    assert_eq!(engine.snapshot().status(), "Winner: X Ada");

    let len = engine.state().history().len();
    assert_eq!(
        engine.apply_move(Position::BottomRight),
        MoveOutcome::Rejected(RejectReason::GameOver)
    );
    assert_eq!(engine.state().history().len(), len);
}

#[test]
fn test_o_win_scores_for_o() {
    let mut engine = two_player();
    play(&mut engine, &[0, 2, 1, 4, 8, 6]);
    assert_eq!(*engine.state().scores(), Scores { x: 0, o: 1 });
    assert_eq!(engine.state().winner().as_deref(), Some("Player O"));
}

#[test]
fn test_full_board_without_line_is_a_draw() {
    let mut engine = two_player();
    let outcomes = play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    assert_eq!(outcomes.last(), Some(&MoveOutcome::Draw));
    assert_eq!(*engine.state().phase(), Phase::Ended);
    assert_eq!(engine.state().winner(), &None);
    assert_eq!(*engine.state().scores(), Scores::default());
    assert_eq!(engine.snapshot().status(), "Draw");
}

#[test]
fn test_reset_keeps_scores() {
    let mut engine = two_player();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.reset();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, Phase::InPlay);
    assert_eq!(snapshot.history_len, 1);
    assert_eq!(snapshot.to_move, Player::X);
    assert_eq!(snapshot.scores, Scores { x: 1, o: 0 });
    assert_eq!(snapshot.winner, None);
}

#[test]
fn test_mode_change_clears_scores() {
    let mut engine = two_player();
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.set_mode(Mode::VsComputer);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.scores, Scores::default());
    assert_eq!(snapshot.history_len, 1);
    assert_eq!(snapshot.player_o, "Computer");
}

#[test]
fn test_jump_then_move_truncates_history() {
    let mut engine = two_player();
    play(&mut engine, &[0, 4, 8, 2]);
    assert_eq!(engine.state().history().len(), 5);

    assert!(engine.jump_to(1));
    assert_eq!(engine.state().history().len(), 5);
    assert_eq!(engine.state().to_move(), Player::O);

    let outcome = engine.apply_move(Position::BottomLeft);
    assert!(outcome.is_accepted());
    assert_eq!(engine.state().history().len(), 3);
    let board = engine.state().history().current();
    assert_eq!(board.get(Position::BottomLeft).player(), Some(Player::O));
    assert!(board.is_empty(Position::Center));
    assert!(board.is_empty(Position::BottomRight));
}

#[test]
fn test_jump_forward_again_without_moving() {
    let mut engine = two_player();
    play(&mut engine, &[0, 4, 8]);
    assert!(engine.jump_to(0));
    assert!(engine.jump_to(3));
    assert_eq!(engine.state().history().current().occupied(), 3);
    assert_eq!(engine.state().to_move(), Player::O);
}

#[test]
fn test_computer_games_keep_score_consistent() {
    for seed in 0..20 {
        let mut engine = vs_computer(seed);
        while *engine.state().phase() == Phase::InPlay {
            let pos = Position::valid_moves(engine.state().history().current())[0];
            match engine.apply_move(pos) {
                MoveOutcome::ComputerToMove(ticket) => {
                    assert!(engine.play_computer(&ticket).is_accepted());
                }
                MoveOutcome::Rejected(reason) => panic!("human move rejected: {reason}"),
                _ => {}
            }
        }

        let snapshot = engine.snapshot();
        let expected = match snapshot.winning_line {
            Some(win) => Scores::default().record(win.player),
            None => Scores::default(),
        };
        assert_eq!(snapshot.scores, expected, "seed {seed}");
        if snapshot.winning_line.map(|w| w.player) == Some(Player::O) {
            assert_eq!(snapshot.winner.as_deref(), Some("Computer"));
        }
    }
}

#[test]
fn test_subscribers_see_moves_and_game_over() {
    let mut engine = two_player();
    let mut events = engine.subscribe();
    play(&mut engine, &[0, 3, 1, 4, 2]);

    let received: Vec<GameEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    let moves = received
        .iter()
        .filter(|e| matches!(e, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves, 5);
    assert!(received.contains(&GameEvent::GameOver {
        winner: Some("Player X".to_string())
    }));
    match received.last() {
        Some(GameEvent::StateChanged(snapshot)) => assert_eq!(snapshot.phase, Phase::Ended),
        other => panic!("expected a final snapshot, got {other:?}"),
    }
}

#[test]
fn test_snapshot_serializes_for_renderer() {
    let mut engine = two_player();
    play(&mut engine, &[4]);
    let json = serde_json::to_value(engine.snapshot()).expect("serializable");
    assert_eq!(json["step"], 1);
    assert_eq!(json["to_move"], "O");
    assert_eq!(json["mode"], "two_player");
}
