//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

/// Four independent castling flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, true);
        self.remove(color, false);
    }

    /// Raw 4-bit mask (Zobrist index)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Set the flag named by a FEN castling letter. Returns false for any
    /// character other than `K Q k q`.
    pub fn set_from_fen_char(&mut self, c: char) -> bool {
        match c {
            'K' => self.0 |= CASTLE_WHITE_K,
            'Q' => self.0 |= CASTLE_WHITE_Q,
            'k' => self.0 |= CASTLE_BLACK_K,
            'q' => self.0 |= CASTLE_BLACK_Q,
            _ => return false,
        }
        true
    }

    /// FEN castling field, `-` when empty.
    #[must_use]
    pub fn to_fen(self) -> String {
        let mut s = String::new();
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                s.push(c);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}
