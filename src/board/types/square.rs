//! Square type: a 0-63 index, a1 = 0 ... h8 = 63.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the board, stored as `8 * rank + file`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const E1: Square = Square(4);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const E8: Square = Square(60);
    pub const H8: Square = Square(63);

    /// Create a square from rank and file (both 0-7).
    #[must_use]
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a square from a 0-63 index. Higher bits are masked off.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square((idx & 63) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank 0-7, 0 = rank 1
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// File 0-7, 0 = file a
    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    #[must_use]
    pub(crate) const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Parse two UCI characters (`e`, `4`) into a square.
    #[must_use]
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square((rank as u8 - b'1') * 8 + (file as u8 - b'a')))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (u8, u8)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square(rank * 8 + file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Square::from_chars(file, rank).ok_or_else(|| SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
            _ => Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            }),
        }
    }
}
