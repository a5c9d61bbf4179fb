//! Bitboard type and operations.

use super::square::Square;

/// A 64-bit set of squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(sq.bit())
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= sq.bit();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !sq.bit();
    }

    /// Iterate over the squares set in this bitboard, lowest index first.
    #[inline]
    #[must_use]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self.0)
    }
}

pub struct BitboardIter(u64);

impl Iterator for BitboardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Square::from_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_yields_set_squares_in_order() {
        let mut bb = Bitboard::EMPTY;
        bb.insert(Square::H8);
        bb.insert(Square::A1);
        bb.insert(Square::E1);
        let squares: Vec<Square> = bb.iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E1, Square::H8]);
        assert_eq!(bb.popcount(), 3);
        bb.remove(Square::E1);
        assert!(!bb.contains(Square::E1));
    }
}
