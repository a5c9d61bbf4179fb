use super::{Board, CastlingRights, Color, Move, Piece, Square};
use crate::zobrist::ZOBRIST;

/// State needed to take a move back.
#[derive(Clone, Debug)]
pub struct UnmakeInfo {
    captured: Option<(Color, Piece, Square)>,
    rook_move: Option<(Square, Square)>,
    previous_castling_rights: CastlingRights,
    previous_en_passant_file: Option<u8>,
    previous_halfmove_clock: u32,
    previous_fullmove_number: u32,
    previous_hash: u64,
}

impl Board {
    /// Apply a codec move for the side to move.
    ///
    /// The move's metadata drives the update: a pawn capture onto an empty
    /// square removes the pawn beside the destination (en passant), a castle
    /// flag relocates the rook, and a promotion replaces the pawn. Legality
    /// is not checked.
    pub fn do_move(&mut self, mv: Move) -> UnmakeInfo {
        let mover = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        let mut info = UnmakeInfo {
            captured: None,
            rook_move: None,
            previous_castling_rights: self.castling_rights,
            previous_en_passant_file: self.en_passant_file,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
            previous_hash: self.hash,
        };

        if let Some((color, victim)) = self.piece_at(to) {
            self.remove_piece(to, color, victim);
            info.captured = Some((color, victim, to));
        } else if mv.is_capture() && piece == Piece::Pawn {
            if let Some(ep_sq) = Square::new(from.rank(), to.file()) {
                if self.piece_at(ep_sq) == Some((mover.opponent(), Piece::Pawn)) {
                    self.remove_piece(ep_sq, mover.opponent(), Piece::Pawn);
                    info.captured = Some((mover.opponent(), Piece::Pawn, ep_sq));
                }
            }
        }

        if let Some((color, moving)) = self.piece_at(from) {
            self.remove_piece(from, color, moving);
        }
        let placed = match (piece, mv.promotion()) {
            (Piece::Pawn, Some(promo)) => promo,
            _ => piece,
        };
        self.set_piece(to, mover, placed);

        if mv.is_castle() && piece == Piece::King {
            let rank = from.rank();
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::new(rank, 7), Square::new(rank, 5))
            } else {
                (Square::new(rank, 0), Square::new(rank, 3))
            };
            if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                if self.piece_at(rook_from) == Some((mover, Piece::Rook))
                    && self.piece_at(rook_to).is_none()
                {
                    self.remove_piece(rook_from, mover, Piece::Rook);
                    self.set_piece(rook_to, mover, Piece::Rook);
                    info.rook_move = Some((rook_from, rook_to));
                }
            }
        }

        let mut rights = self.castling_rights;
        if piece == Piece::King {
            rights.remove_color(mover);
        }
        for sq in [from, to] {
            match sq {
                Square::A1 => rights.remove(Color::White, false),
                Square::H1 => rights.remove(Color::White, true),
                Square::A8 => rights.remove(Color::Black, false),
                Square::H8 => rights.remove(Color::Black, true),
                _ => {}
            }
        }
        self.hash ^= ZOBRIST.castling(self.castling_rights) ^ ZOBRIST.castling(rights);
        self.castling_rights = rights;

        let en_passant_file = if piece == Piece::Pawn && from.index().abs_diff(to.index()) == 16 {
            Some(from.file())
        } else {
            None
        };
        self.hash ^= ZOBRIST.en_passant(self.en_passant_file) ^ ZOBRIST.en_passant(en_passant_file);
        self.en_passant_file = en_passant_file;

        if piece == Piece::Pawn || info.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = mover.opponent();
        self.hash ^= ZOBRIST.side();
        info
    }

    /// Take back a move made by [`Board::do_move`].
    pub fn undo_move(&mut self, mv: Move, info: UnmakeInfo) {
        let mover = self.side_to_move.opponent();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        if let Some((rook_from, rook_to)) = info.rook_move {
            self.remove_piece(rook_to, mover, Piece::Rook);
            self.set_piece(rook_from, mover, Piece::Rook);
        }

        if let Some((color, placed)) = self.piece_at(to) {
            self.remove_piece(to, color, placed);
        }
        self.set_piece(from, mover, piece);

        if let Some((color, victim, sq)) = info.captured {
            self.set_piece(sq, color, victim);
        }

        self.side_to_move = mover;
        self.castling_rights = info.previous_castling_rights;
        self.en_passant_file = info.previous_en_passant_file;
        self.halfmove_clock = info.previous_halfmove_clock;
        self.fullmove_number = info.previous_fullmove_number;
        self.hash = info.previous_hash;
    }
}
