//! Long algebraic move replay.
//!
//! UCI move strings carry only squares and an optional promotion letter, so
//! the remaining codec fields are inferred from the board as it stands
//! immediately before the move.

use super::error::MoveParseError;
use super::{promotion_from_char, Board, Move, Piece, Square};

impl Board {
    /// Decode a 4 or 5 character UCI move against the current position.
    ///
    /// - capture: destination occupied, or a pawn changing file by one
    /// - castle: a king moving exactly two squares
    /// - promotion: the trailing letter, through the codec ordering
    ///
    /// Legality is not checked.
    pub fn parse_uci_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = notation.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(MoveParseError::InvalidLength {
                notation: notation.to_string(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        };
        let from = Square::from_chars(chars[0], chars[1]).ok_or_else(invalid_square)?;
        let to = Square::from_chars(chars[2], chars[3]).ok_or_else(invalid_square)?;
        if from == to {
            return Err(invalid_square());
        }

        let (color, piece) = self.piece_at(from).ok_or_else(|| MoveParseError::EmptySquare {
            notation: notation.to_string(),
        })?;
        if color != self.side_to_move {
            return Err(MoveParseError::WrongColor {
                notation: notation.to_string(),
            });
        }

        let trailing = chars.get(4).copied();
        let promotion = promotion_from_char(trailing).ok_or(MoveParseError::InvalidPromotion {
            char: trailing.unwrap_or(' '),
        })?;

        let is_capture = self.piece_at(to).is_some()
            || (piece == Piece::Pawn && from.file().abs_diff(to.file()) == 1);
        let is_castle = piece == Piece::King && from.index().abs_diff(to.index()) == 2;

        Ok(Move::encode(from, to, piece, is_capture)
            .with_castle(is_castle)
            .with_promotion(promotion))
    }

    /// Decode and apply one UCI move. On error the board is unchanged.
    pub fn apply_uci_move(&mut self, notation: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_uci_move(notation)?;
        self.do_move(mv);
        Ok(mv)
    }

    /// Replay a sequence of UCI moves in order.
    ///
    /// Stops at the first malformed move; moves before it stay applied.
    /// Callers that need all-or-nothing replay should work on a copy.
    pub fn apply_uci_moves<I, S>(&mut self, moves: I) -> Result<(), MoveParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for notation in moves {
            self.apply_uci_move(notation.as_ref())?;
        }
        Ok(())
    }
}
