use super::attack_tables::{slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use super::{Bitboard, Board, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Board {
    /// All legal moves for the side to move.
    ///
    /// Pseudo-legal moves are generated first and each one is made and
    /// unmade to reject those that leave the mover's king attacked.
    pub fn generate_moves(&mut self) -> MoveList {
        let pseudo = self.generate_pseudo_moves();
        let mover = self.side_to_move;
        let mut legal = MoveList::new();
        for &mv in pseudo.iter() {
            let info = self.do_move(mv);
            if !self.in_check(mover) {
                legal.push(mv);
            }
            self.undo_move(mv, info);
        }
        legal
    }

    /// True if the side to move has at least one legal move.
    pub fn has_legal_move(&mut self) -> bool {
        let pseudo = self.generate_pseudo_moves();
        let mover = self.side_to_move;
        pseudo.iter().any(|&mv| {
            let info = self.do_move(mv);
            let legal = !self.in_check(mover);
            self.undo_move(mv, info);
            legal
        })
    }

    pub(crate) fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let us = self.side_to_move;
        let own = self.occupied[us.index()].0;
        let occ = self.all_occupied.0;

        self.generate_pawn_moves(&mut moves);

        for sq in self.pieces_of(us, Piece::Knight).iter() {
            self.push_targets(&mut moves, sq, Piece::Knight, KNIGHT_ATTACKS[sq.index()] & !own);
        }
        for sq in self.pieces_of(us, Piece::Bishop).iter() {
            let targets = slider_attacks(sq.index(), occ, true) & !own;
            self.push_targets(&mut moves, sq, Piece::Bishop, targets);
        }
        for sq in self.pieces_of(us, Piece::Rook).iter() {
            let targets = slider_attacks(sq.index(), occ, false) & !own;
            self.push_targets(&mut moves, sq, Piece::Rook, targets);
        }
        for sq in self.pieces_of(us, Piece::Queen).iter() {
            let targets = (slider_attacks(sq.index(), occ, true)
                | slider_attacks(sq.index(), occ, false))
                & !own;
            self.push_targets(&mut moves, sq, Piece::Queen, targets);
        }
        for sq in self.pieces_of(us, Piece::King).iter() {
            self.push_targets(&mut moves, sq, Piece::King, KING_ATTACKS[sq.index()] & !own);
            self.generate_castles(&mut moves, sq);
        }
        moves
    }

    fn push_targets(&self, moves: &mut MoveList, from: Square, piece: Piece, targets: u64) {
        for to in Bitboard(targets).iter() {
            let is_capture = self.all_occupied.contains(to);
            moves.push(Move::encode(from, to, piece, is_capture));
        }
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move;
        let them_occ = self.occupied[us.opponent().index()].0;
        let (forward, start_rank, promo_rank): (isize, u8, u8) = match us {
            Color::White => (8, 1, 7),
            Color::Black => (-8, 6, 0),
        };
        let ep_target = self.en_passant_square();

        for from in self.pieces_of(us, Piece::Pawn).iter() {
            let one = from.index() as isize + forward;
            if (0..64).contains(&one) {
                let one_sq = Square::from_index(one as usize);
                if !self.all_occupied.contains(one_sq) {
                    push_pawn_move(moves, from, one_sq, false, promo_rank);
                    let two = one + forward;
                    if from.rank() == start_rank {
                        let two_sq = Square::from_index(two as usize);
                        if !self.all_occupied.contains(two_sq) {
                            moves.push(Move::encode(from, two_sq, Piece::Pawn, false));
                        }
                    }
                }
            }

            let attacks = PAWN_ATTACKS[us.index()][from.index()];
            for to in Bitboard(attacks & them_occ).iter() {
                push_pawn_move(moves, from, to, true, promo_rank);
            }
            if let Some(ep) = ep_target {
                if attacks & ep.bit() != 0 && !self.all_occupied.contains(ep) {
                    moves.push(Move::encode(from, ep, Piece::Pawn, true));
                }
            }
        }
    }

    fn generate_castles(&self, moves: &mut MoveList, king_sq: Square) {
        let us = self.side_to_move;
        let them = us.opponent();
        let rank = us.back_rank();
        if king_sq.rank() != rank || king_sq.file() != 4 || self.in_check(us) {
            return;
        }
        // (kingside, rook file, squares that must be empty, squares the king crosses)
        let sides: [(bool, u8, &[u8], [u8; 2]); 2] =
            [(true, 7, &[5, 6], [5, 6]), (false, 0, &[1, 2, 3], [3, 2])];
        for (kingside, rook_file, between, crossed) in sides {
            if !self.castling_rights.has(us, kingside) {
                continue;
            }
            let rook_sq = Square::new(rank, rook_file);
            if rook_sq.and_then(|sq| self.piece_at(sq)) != Some((us, Piece::Rook)) {
                continue;
            }
            let clear = between.iter().all(|&f| {
                Square::new(rank, f).is_some_and(|sq| !self.all_occupied.contains(sq))
            });
            let safe = crossed.iter().all(|&f| {
                Square::new(rank, f).is_some_and(|sq| !self.is_square_attacked(sq, them))
            });
            if clear && safe {
                if let Some(to) = Square::new(rank, crossed[1]) {
                    moves.push(Move::encode(king_sq, to, Piece::King, false).with_castle(true));
                }
            }
        }
    }
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, is_capture: bool, promo_rank: u8) {
    let mv = Move::encode(from, to, Piece::Pawn, is_capture);
    if to.rank() == promo_rank {
        for promo in PROMOTION_PIECES {
            moves.push(mv.with_promotion(Some(promo)));
        }
    } else {
        moves.push(mv);
    }
}
