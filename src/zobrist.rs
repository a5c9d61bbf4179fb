//! Zobrist hashing keys.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[color][piece][square]
    piece_keys: [[[u64; 64]; 6]; 2],
    black_to_move_key: u64,
    // One key per castling-rights mask
    castling_keys: [u64; 16],
    // en_passant_keys[file]
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed so hashes are reproducible across runs
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[[0; 64]; 6]; 2];
        let mut castling_keys = [0; 16];
        let mut en_passant_keys = [0; 8];

        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for key in castling_keys.iter_mut().skip(1) {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move_key
    }

    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[rights.as_u8() as usize & 15]
    }

    #[inline]
    pub(crate) fn en_passant(&self, file: Option<u8>) -> u64 {
        file.map_or(0, |f| self.en_passant_keys[f as usize & 7])
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
