//! Make/unmake move tests.

use crate::board::{Board, Color, Move, Piece, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn find_move(board: &mut Board, notation: &str) -> Move {
    board
        .generate_moves()
        .iter()
        .copied()
        .find(|m| m.to_string() == notation)
        .unwrap_or_else(|| panic!("expected move {notation} not found"))
}

fn assert_round_trip(fen: &str, notation: &str) {
    let mut board = Board::try_from_fen(fen).unwrap();
    let before = board.clone();
    let mv = find_move(&mut board, notation);
    let info = board.do_move(mv);
    assert_eq!(board.hash(), board.compute_hash(), "hash drift after {notation}");
    board.undo_move(mv, info);
    assert_eq!(board, before, "undo of {notation} did not restore the board");
}

#[test]
fn test_en_passant_make_unmake() {
    let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
    assert_round_trip(fen, "e5f6");

    let mut board = Board::try_from_fen(fen).unwrap();
    let mv = find_move(&mut board, "e5f6");
    board.do_move(mv);
    assert_eq!(board.piece_at(sq("f5")), None);
    assert_eq!(board.piece_at(sq("f6")), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.halfmove_clock(), 0);
}

#[test]
fn test_promotion_make_unmake() {
    let fen = "8/P7/8/8/8/8/8/K1k5 w - - 0 1";
    assert_round_trip(fen, "a7a8q");

    let mut board = Board::try_from_fen(fen).unwrap();
    let mv = find_move(&mut board, "a7a8r");
    board.do_move(mv);
    assert_eq!(board.piece_at(sq("a8")), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(sq("a7")), None);
}

#[test]
fn test_castling_make_unmake() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    assert_round_trip(fen, "e1g1");
    assert_round_trip(fen, "e1c1");

    let mut board = Board::try_from_fen(fen).unwrap();
    let mv = find_move(&mut board, "e1c1");
    board.do_move(mv);
    assert_eq!(board.piece_at(sq("d1")), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(sq("a1")), None);
    assert_eq!(board.castling_rights().to_fen(), "kq");
}

#[test]
fn test_rook_capture_removes_castling_right() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    assert_round_trip(fen, "a1a8");
    let mut board = Board::try_from_fen(fen).unwrap();
    let mv = find_move(&mut board, "a1a8");
    assert!(mv.is_capture());
    board.do_move(mv);
    assert_eq!(board.castling_rights().to_fen(), "Kk");
}

#[test]
fn test_double_push_sets_en_passant_file() {
    let mut board = Board::new();
    board.apply_uci_move("e2e4").unwrap();
    assert_eq!(board.en_passant_file(), Some(4));
    assert_eq!(
        board.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    board.apply_uci_move("g8f6").unwrap();
    assert_eq!(board.en_passant_file(), None);
    assert_eq!(board.halfmove_clock(), 1);
    assert_eq!(board.fullmove_number(), 2);
}

#[test]
fn test_every_kiwipete_move_round_trips() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::try_from_fen(fen).unwrap();
    let before = board.clone();
    for &mv in board.clone().generate_moves().iter() {
        let info = board.do_move(mv);
        assert_eq!(board.hash(), board.compute_hash());
        board.undo_move(mv, info);
        assert_eq!(board, before, "undo of {mv} did not restore the board");
    }
}
