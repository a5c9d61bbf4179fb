//! Property-based tests using proptest.

use crate::board::{Board, Move, Piece, UnmakeInfo};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play `num_moves` random legal moves from the start position, returning
/// the UCI notation of each move played.
fn random_game(board: &mut Board, seed: u64, num_moves: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut played = Vec::new();
    for _ in 0..num_moves {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.do_move(mv);
        played.push(mv.to_string());
    }
    played
}

proptest! {
    /// do_move followed by undo_move restores the board exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let initial = board.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut history: Vec<(Move, UnmakeInfo)> = Vec::new();

        for _ in 0..num_moves {
            let moves = board.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            let info = board.do_move(mv);
            prop_assert_eq!(board.hash(), board.compute_hash());
            history.push((mv, info));
        }

        while let Some((mv, info)) = history.pop() {
            board.undo_move(mv, info);
        }
        prop_assert_eq!(board, initial);
    }

    /// FEN round-trip preserves any reachable position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_game(&mut board, seed, num_moves);
        let reparsed = Board::try_from_fen(&board.to_fen()).unwrap();
        prop_assert_eq!(reparsed, board);
    }

    /// Replaying the same UCI move list twice yields the same position, and
    /// matches the position reached by playing the generated moves directly
    #[test]
    fn prop_replay_is_deterministic(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut played = Board::new();
        let notation = random_game(&mut played, seed, num_moves);

        let mut first = Board::new();
        first.apply_uci_moves(&notation).unwrap();
        let mut second = Board::new();
        second.apply_uci_moves(&notation).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &played);
    }

    /// Replay inference agrees with move generation on capture and castle flags
    #[test]
    fn prop_inference_matches_generation(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_game(&mut board, seed, num_moves);
        for &mv in board.clone().generate_moves().iter() {
            let inferred = board.parse_uci_move(&mv.to_string()).unwrap();
            prop_assert_eq!(inferred, mv);

            let occupied = board.piece_at(mv.to()).is_some();
            if mv.piece() != Piece::Pawn {
                prop_assert_eq!(inferred.is_capture(), occupied);
            } else if mv.from().file() != mv.to().file() {
                prop_assert!(inferred.is_capture());
            }
            let king_jump = mv.piece() == Piece::King
                && mv.from().index().abs_diff(mv.to().index()) == 2;
            prop_assert_eq!(inferred.is_castle(), king_jump);
        }
    }

    /// Every FEN that parses has a 64-entry mailbox and the named side to move
    #[test]
    fn prop_side_to_move_matches_field(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_game(&mut board, seed, num_moves);
        let fen = board.to_fen();
        let parsed = Board::try_from_fen(&fen).unwrap();
        let white = fen.split_whitespace().nth(1) == Some("w");
        prop_assert_eq!(parsed.mailbox().len(), 64);
        prop_assert_eq!(parsed.side_to_move() == crate::board::Color::White, white);
    }
}
