//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece` and `Color` - piece kinds and colors
//! - `Square` - 0-63 board index
//! - `Bitboard` - 64-bit set of squares
//! - `Move` and `MoveList` - packed move codec
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::Bitboard;
pub use castling::CastlingRights;
pub use moves::{promotion_from_char, Move, MoveList, PROMOTION_ORDER};
pub use piece::{mailbox_code, Color, Piece, EMPTY_CODE};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;
