//! Full turns through the public API: human clicks, delayed opponent turns
//! and resets, with the random opponent in the loop.

use chess_core::{pseudo_moves, Board, Color, Difficulty, OpponentPolicy, Square};
use chess_game::{GameSnapshot, GameState, OpponentOutcome, SelectOutcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use random_opponent::RandomOpponent;

fn s(coord: &str) -> Square {
    Square::from_coord(coord).unwrap()
}

fn pieces_on_board(board: &Board) -> usize {
    board.occupied_by(Color::White).len() + board.occupied_by(Color::Black).len()
}

#[test]
fn test_king_pawn_opening_then_opponent_reply() {
    let mut game = GameState::new(Difficulty::Hard);
    let mut opponent = RandomOpponent::with_seed(Difficulty::Hard, 2024);

    assert!(matches!(
        game.select_square(s("e2")),
        SelectOutcome::Selected { .. }
    ));
    assert!(matches!(
        game.select_square(s("e4")),
        SelectOutcome::Moved { captured: None, .. }
    ));

    // The pawn left e2; clicking there now does nothing because black is due.
    assert!(game.board().is_empty(Square::new(6, 4).unwrap()));
    assert_eq!(game.select_square(s("e2")), SelectOutcome::Ignored);

    let ticket = game.begin_opponent_turn().unwrap();
    match game.resolve_opponent_turn(ticket, &mut opponent) {
        OpponentOutcome::Moved { mv, .. } => {
            assert_eq!(
                Board::startpos().piece_at(mv.from).map(|p| p.color),
                Some(Color::Black)
            );
        }
        other => panic!("opponent did not move: {other:?}"),
    }
    assert!(game.white_to_move());
    assert_eq!(game.select_square(s("e2")), SelectOutcome::Cleared);
}

#[test]
fn test_hard_opponent_takes_available_capture() {
    // Black's only piece, the queen on d8, can take the rook on d1.
    for seed in 0..50 {
        let board = Board::from_diagram("3q4/8/8/8/8/8/8/R2R3K").unwrap();
        let mut game = GameState::with_board(board, Difficulty::Hard);
        game.apply_move(s("a1"), s("a2")).unwrap();

        let mut opponent = RandomOpponent::with_seed(game.difficulty(), seed);
        match game.apply_opponent_turn(&mut opponent) {
            OpponentOutcome::Moved { mv, captured } => {
                assert_eq!(mv.to, s("d1"));
                assert!(captured.is_some());
            }
            other => panic!("seed {seed}: {other:?}"),
        }
        assert_eq!(game.captured().black, vec!['♖']);
    }
}

#[test]
fn test_stalled_opponent_keeps_turn() {
    // Black's lone pawn is blocked, so every sample fails.
    let board = Board::from_diagram("8/p7/P7/8/8/8/8/7K").unwrap();
    let mut game = GameState::with_board(board, Difficulty::Easy);
    game.apply_move(s("h1"), s("g1")).unwrap();
    let before = game.clone();

    let mut opponent = RandomOpponent::with_seed(Difficulty::Easy, 5);
    assert_eq!(game.apply_opponent_turn(&mut opponent), OpponentOutcome::Stalled);
    assert_eq!(game, before);
    assert_eq!(game.status_line(), "AI THINKING...");
    assert_eq!(game.select_square(s("g1")), SelectOutcome::Ignored);
}

#[test]
fn test_reset_during_pending_turn() {
    let mut game = GameState::default();
    let mut opponent = RandomOpponent::with_seed(Difficulty::Medium, 9);

    game.select_square(s("d2"));
    game.select_square(s("d4"));
    let ticket = game.begin_opponent_turn().unwrap();

    game.reset();
    opponent.new_game();

    assert_eq!(
        game.resolve_opponent_turn(ticket, &mut opponent),
        OpponentOutcome::Stale
    );
    assert_eq!(game.board(), &Board::startpos());
    assert!(game.white_to_move());
}

#[test]
fn test_random_games_preserve_invariants() {
    let mut rng = StdRng::seed_from_u64(77);

    for difficulty in Difficulty::ALL {
        let mut game = GameState::new(difficulty);
        let mut opponent = RandomOpponent::with_seed(difficulty, 1234);
        let mut last_tallies = (0, 0);

        for _ in 0..60 {
            if game.white_to_move() {
                let moves = pseudo_moves(game.board(), Color::White);
                let Some(mv) = moves.choose(&mut rng).copied() else {
                    break;
                };
                assert!(matches!(
                    game.select_square(mv.from),
                    SelectOutcome::Selected { .. }
                ));
                assert!(matches!(
                    game.select_square(mv.to),
                    SelectOutcome::Moved { .. }
                ));
                assert!(!game.white_to_move());
            } else {
                match game.apply_opponent_turn(&mut opponent) {
                    OpponentOutcome::Moved { .. } => assert!(game.white_to_move()),
                    OpponentOutcome::Stalled => break,
                    other => panic!("unexpected {other:?}"),
                }
            }

            let tallies = (game.captured().white.len(), game.captured().black.len());
            assert!(tallies.0 >= last_tallies.0 && tallies.1 >= last_tallies.1);
            last_tallies = tallies;
            assert_eq!(pieces_on_board(game.board()) + tallies.0 + tallies.1, 32);

            let snap = GameSnapshot::from(&game);
            assert_eq!(Board::from_diagram(&snap.board).unwrap(), *game.board());
        }
    }
}
