use super::attack_tables::{slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::{mailbox_code, Bitboard, CastlingRights, Color, Piece, Square, EMPTY_CODE};
use crate::zobrist::ZOBRIST;

/// FEN of the standard initial position.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// One mailbox entry: the color and kind on a square, or `None` when empty.
pub type MailboxEntry = Option<(Color, Piece)>;

/// Bitboard position.
///
/// Equality compares the full position including clocks and hash, so
/// `try_from_fen(to_fen(b)) == b` is a meaningful check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: Option<u8>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Board {
    /// The standard initial position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in (0u8..).zip(back_rank) {
            board.set_piece(Square::from_index(file as usize), Color::White, piece);
            board.set_piece(Square::from_index(8 + file as usize), Color::White, Piece::Pawn);
            board.set_piece(Square::from_index(48 + file as usize), Color::Black, Piece::Pawn);
            board.set_piece(Square::from_index(56 + file as usize), Color::Black, piece);
        }
        board.castling_rights = CastlingRights::all();
        board.hash = board.compute_hash();
        board
    }

    pub(crate) fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_file: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// Place a piece, updating the hash. The square must be empty.
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].insert(sq);
        self.occupied[color.index()].insert(sq);
        self.all_occupied.insert(sq);
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    /// Remove a piece, updating the hash.
    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].remove(sq);
        self.occupied[color.index()].remove(sq);
        self.all_occupied.remove(sq);
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> MailboxEntry {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[0].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|p| self.pieces[color.index()][p.index()].contains(sq))
            .map(|p| (color, p))
    }

    /// The 64-entry mailbox, indexed a1 = 0 ... h8 = 63.
    #[must_use]
    pub fn mailbox(&self) -> [MailboxEntry; 64] {
        let mut squares = [None; 64];
        for (idx, entry) in squares.iter_mut().enumerate() {
            *entry = self.piece_at(Square::from_index(idx));
        }
        squares
    }

    /// The mailbox as integer codes: White 0-5, Black 6-11, empty -1.
    #[must_use]
    pub fn mailbox_codes(&self) -> [i8; 64] {
        self.mailbox()
            .map(|entry| entry.map_or(EMPTY_CODE, |(c, p)| mailbox_code(c, p)))
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    #[must_use]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    /// The en passant target square implied by the stored file.
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        let rank = self.side_to_move.opponent().en_passant_rank();
        self.en_passant_file.and_then(|f| Square::new(rank, f))
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub(crate) fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Hash computed from scratch.
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in [Color::White, Color::Black] {
            for piece in Piece::ALL {
                for sq in self.pieces_of(color, piece).iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side();
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        hash ^= ZOBRIST.en_passant(self.en_passant_file);
        hash
    }

    pub(crate) fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color, Piece::King).iter().next()
    }

    /// True if any piece of `by` attacks `sq`.
    pub(crate) fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let idx = sq.index();
        let occ = self.all_occupied.0;
        // A pawn of `by` attacks sq iff a pawn of the other color on sq would attack it
        if PAWN_ATTACKS[by.opponent().index()][idx] & self.pieces_of(by, Piece::Pawn).0 != 0 {
            return true;
        }
        if KNIGHT_ATTACKS[idx] & self.pieces_of(by, Piece::Knight).0 != 0 {
            return true;
        }
        if KING_ATTACKS[idx] & self.pieces_of(by, Piece::King).0 != 0 {
            return true;
        }
        let queens = self.pieces_of(by, Piece::Queen).0;
        let diagonal = self.pieces_of(by, Piece::Bishop).0 | queens;
        if slider_attacks(idx, occ, true) & diagonal != 0 {
            return true;
        }
        let straight = self.pieces_of(by, Piece::Rook).0 | queens;
        slider_attacks(idx, occ, false) & straight != 0
    }

    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|k| self.is_square_attacked(k, color.opponent()))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
