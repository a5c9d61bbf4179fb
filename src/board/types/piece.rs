//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece kinds, in mailbox order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// All piece kinds in index order
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    /// Inverse of [`Piece::index`]. Values are taken modulo 6, so a colored
    /// mailbox code (0-11) maps onto its kind.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Piece {
        Piece::ALL[idx % 6]
    }

    /// Parse a piece from a FEN letter, either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// Lowercase letter for this kind
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let c = self.to_char();
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Material value in centipawns.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Piece::Pawn => 100,
            Piece::Knight => 320,
            Piece::Bishop => 330,
            Piece::Rook => 500,
            Piece::Queen => 900,
            Piece::King => 20000,
        }
    }
}

/// Promotion choices, strongest first. Used by move generation.
pub(crate) const PROMOTION_PIECES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank of the square a pawn skips over on a double push.
    #[inline]
    #[must_use]
    pub(crate) const fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 5,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Mailbox code of an empty square.
pub const EMPTY_CODE: i8 = -1;

/// Integer mailbox code: White kinds are 0-5, Black kinds 6-11.
#[inline]
#[must_use]
pub const fn mailbox_code(color: Color, piece: Piece) -> i8 {
    (color.index() * 6 + piece.index()) as i8
}
