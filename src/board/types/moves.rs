//! Move codec and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURE_BIT: u32 = 1 << 15;
const CASTLE_BIT: u32 = 1 << 16;
const PROMO_SHIFT: u32 = 17;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
const PROMO_MASK: u32 = 0x7;

/// Promotion index ordering. Index 0 means "no promotion".
pub const PROMOTION_ORDER: [Option<Piece>; 5] = [
    None,
    Some(Piece::Knight),
    Some(Piece::Bishop),
    Some(Piece::Rook),
    Some(Piece::Queen),
];

/// Packed move.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: moving piece kind
/// - bit 15:     capture flag
/// - bit 16:     castle flag
/// - bits 17-19: promotion index into [`PROMOTION_ORDER`]
///
/// Only the low 20 bits are ever set.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// Sentinel for "no move". Never applied to a board.
    pub const NULL: Move = Move(0);

    /// Pack the start square, end square, moving piece and capture flag.
    #[inline]
    #[must_use]
    pub const fn encode(from: Square, to: Square, piece: Piece, is_capture: bool) -> Self {
        let mut bits = ((from.index() as u32) << FROM_SHIFT)
            | ((to.index() as u32) << TO_SHIFT)
            | ((piece.index() as u32) << PIECE_SHIFT);
        if is_capture {
            bits |= CAPTURE_BIT;
        }
        Move(bits)
    }

    #[inline]
    #[must_use]
    pub const fn with_castle(self, is_castle: bool) -> Self {
        if is_castle {
            Move(self.0 | CASTLE_BIT)
        } else {
            Move(self.0 & !CASTLE_BIT)
        }
    }

    /// Set the promotion piece. Pawn and king are not promotion targets and
    /// clear the field.
    #[inline]
    #[must_use]
    pub const fn with_promotion(self, promotion: Option<Piece>) -> Self {
        let idx = promotion_index(promotion);
        Move((self.0 & !(PROMO_MASK << PROMO_SHIFT)) | (idx << PROMO_SHIFT))
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQUARE_MASK) as usize)
    }

    /// Kind of the moving piece
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        Piece::from_index(((self.0 >> PIECE_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_BIT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.0 & CASTLE_BIT != 0
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        let idx = ((self.0 >> PROMO_SHIFT) & PROMO_MASK) as usize;
        if idx < PROMOTION_ORDER.len() {
            PROMOTION_ORDER[idx]
        } else {
            None
        }
    }

    /// Captures and promotions
    #[inline]
    #[must_use]
    pub const fn is_tactical(self) -> bool {
        self.is_capture() || self.promotion().is_some()
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Get the raw packed value (for hashing/storage)
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Create from a raw packed value
    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

const fn promotion_index(promotion: Option<Piece>) -> u32 {
    match promotion {
        Some(Piece::Knight) => 1,
        Some(Piece::Bishop) => 2,
        Some(Piece::Rook) => 3,
        Some(Piece::Queen) => 4,
        _ => 0,
    }
}

/// Map the trailing character of a UCI move onto the promotion ordering.
///
/// Returns `Some(None)` for "no promotion" and `None` for a character that
/// names no promotion piece.
#[must_use]
pub fn promotion_from_char(c: Option<char>) -> Option<Option<Piece>> {
    match c {
        None => Some(None),
        Some('n') => Some(PROMOTION_ORDER[1]),
        Some('b') => Some(PROMOTION_ORDER[2]),
        Some('r') => Some(PROMOTION_ORDER[3]),
        Some('q') => Some(PROMOTION_ORDER[4]),
        Some(_) => None,
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({:?} {}{}", self.piece(), self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castle() {
            write!(f, " castle")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}
