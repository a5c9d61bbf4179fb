//! Chess board representation and game logic.
//!
//! Uses bitboards for move generation and evaluation, and a mailbox view for
//! protocol diagnostics. Supports full chess rules including castling,
//! en passant and promotions.
//!
//! # Example
//! ```
//! use uci_chess::board::Board;
//!
//! let mut board = Board::new();
//! board.apply_uci_moves(["e2e4", "e7e5"]).unwrap();
//! assert_eq!(board.generate_moves().len(), 29);
//! ```

mod attack_tables;
mod error;
mod eval;
mod fen;
mod make_unmake;
mod movegen;
mod notation;
mod perft;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use make_unmake::UnmakeInfo;
pub use perft::PerftCounts;
pub use state::{Board, MailboxEntry, STARTPOS_FEN};
pub use types::{
    mailbox_code, promotion_from_char, Bitboard, CastlingRights, Color, Move, MoveList, Piece,
    Square, EMPTY_CODE, PROMOTION_ORDER,
};

pub(crate) use types::PROMOTION_PIECES;
