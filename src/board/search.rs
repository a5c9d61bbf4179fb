//! Iterative-deepening alpha-beta search.
//!
//! - Negamax with a transposition table for move ordering and cutoffs
//! - Quiescence search over captures and promotions with stand-pat
//! - MVV-LVA ordering for tactical moves
//! - Cooperative cancellation through a [`StopFlag`] and an optional deadline

use std::time::{Duration, Instant};

use crate::sync::StopFlag;
use crate::tt::{BoundType, TranspositionTable};

use super::{Board, Move, MoveList, Piece};

/// Score of being mated at the root; mate in `n` plies scores `MATE_SCORE - n`.
pub const MATE_SCORE: i32 = 30_000;
const INFINITY: i32 = 31_000;
/// Deepest ply the search will ever reach, quiescence included.
pub(crate) const MAX_PLY: u32 = 128;
/// Scores beyond this are mate scores.
const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;
/// Stop flag and deadline are polled whenever the node count hits a multiple
/// of this.
const POLL_INTERVAL: u64 = 2048;

/// How far and how long to search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u32,
    pub deadline: Option<Instant>,
}

/// Shared resources a search runs against.
pub struct SearchContext<'a> {
    pub tt: &'a TranspositionTable,
    pub stop: &'a StopFlag,
    /// Transposition table age for this search
    pub generation: u8,
}

/// Report for one completed iteration.
#[derive(Clone, Debug)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub best_move: Option<Move>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u32,
    pub nodes: u64,
}

/// If `score` is a mate score, the signed number of moves to mate.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if score >= MATE_THRESHOLD {
        Some((MATE_SCORE - score + 1) / 2)
    } else if score <= -MATE_THRESHOLD {
        Some(-(MATE_SCORE + score) / 2)
    } else {
        None
    }
}

/// Run an iterative-deepening search from `board`.
///
/// `on_iteration` is called after every iteration that completes without
/// being cut short. The board is restored before returning.
pub fn search(
    board: &mut Board,
    ctx: &SearchContext<'_>,
    limits: SearchLimits,
    mut on_iteration: impl FnMut(&SearchInfo),
) -> SearchResult {
    let mut searcher = Searcher {
        board,
        ctx,
        deadline: limits.deadline,
        start: Instant::now(),
        nodes: 0,
        aborted: false,
    };

    let mut root_moves = searcher.board.generate_moves();
    let mut result = SearchResult {
        best_move: root_moves.as_slice().first().copied(),
        score: 0,
        depth: 0,
        nodes: 0,
    };
    if root_moves.is_empty() {
        result.score = if searcher.board.in_check(searcher.board.side_to_move()) {
            -MATE_SCORE
        } else {
            0
        };
        return result;
    }

    let tt_move = ctx.tt.probe(searcher.board.hash()).and_then(|e| e.best_move);
    searcher.order_moves(&mut root_moves, tt_move);

    for depth in 1..=limits.max_depth.clamp(1, MAX_PLY - 1) {
        let (best, score, completed) = searcher.search_root(&mut root_moves, depth);
        if completed {
            result.best_move = best;
            result.score = score;
            result.depth = depth;
            result.nodes = searcher.nodes;
            on_iteration(&SearchInfo {
                depth,
                score,
                nodes: searcher.nodes,
                elapsed: searcher.start.elapsed(),
                best_move: best,
            });
            if score.abs() >= MATE_THRESHOLD {
                log::debug!("mate found at depth {depth}, stopping early");
                break;
            }
        } else {
            // A partial iteration searches the previous best move first, so
            // any move it settled on scored at least as well.
            if best.is_some() {
                result.best_move = best;
                result.score = score;
            }
            break;
        }
    }

    result.nodes = searcher.nodes;
    result
}

struct Searcher<'a, 'b> {
    board: &'a mut Board,
    ctx: &'a SearchContext<'b>,
    deadline: Option<Instant>,
    start: Instant,
    nodes: u64,
    aborted: bool,
}

impl Searcher<'_, '_> {
    fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.nodes % POLL_INTERVAL == 0 {
            let past_deadline = self.deadline.is_some_and(|d| Instant::now() >= d);
            if past_deadline || self.ctx.stop.is_stopped() {
                self.aborted = true;
            }
        }
        self.aborted
    }

    /// Search every root move at `depth`. Returns the best move found, its
    /// score and whether the iteration ran to completion. On completion the
    /// best move is moved to the front of `moves`.
    fn search_root(&mut self, moves: &mut MoveList, depth: u32) -> (Option<Move>, i32, bool) {
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(usize, Move)> = None;

        for (idx, &mv) in moves.iter().enumerate() {
            let info = self.board.do_move(mv);
            let score = -self.negamax(depth - 1, 1, -beta, -alpha);
            self.board.undo_move(mv, info);
            if self.aborted {
                break;
            }
            if score > alpha {
                alpha = score;
                best = Some((idx, mv));
            }
        }

        let completed = !self.aborted;
        if let Some((idx, mv)) = best {
            if completed {
                moves.as_mut_slice()[..=idx].rotate_right(1);
                self.ctx.tt.store(
                    self.board.hash(),
                    depth,
                    alpha,
                    BoundType::Exact,
                    Some(mv),
                    self.ctx.generation,
                );
            }
        }
        (best.map(|(_, mv)| mv), alpha, completed)
    }

    fn negamax(&mut self, depth: u32, ply: u32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }
        if self.board.halfmove_clock() >= 100 {
            return 0;
        }
        if depth == 0 || ply >= MAX_PLY {
            return self.quiescence(ply, alpha, beta);
        }

        let hash = self.board.hash();
        let mut tt_move = None;
        if let Some(entry) = self.ctx.tt.probe(hash) {
            tt_move = entry.best_move;
            if u32::from(entry.depth) >= depth {
                let score = score_from_tt(i32::from(entry.score), ply);
                let cutoff = match entry.bound_type {
                    BoundType::Exact => true,
                    BoundType::LowerBound => score >= beta,
                    BoundType::UpperBound => score <= alpha,
                };
                if cutoff {
                    return score;
                }
            }
        }

        let mut moves = self.board.generate_moves();
        if moves.is_empty() {
            return if self.board.in_check(self.board.side_to_move()) {
                -MATE_SCORE + ply as i32
            } else {
                0
            };
        }
        self.order_moves(&mut moves, tt_move);

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;
        for &mv in moves.iter() {
            let info = self.board.do_move(mv);
            let score = -self.negamax(depth - 1, ply + 1, -beta, -alpha);
            self.board.undo_move(mv, info);
            if self.aborted {
                return 0;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score >= beta {
            BoundType::LowerBound
        } else if best_score > original_alpha {
            BoundType::Exact
        } else {
            BoundType::UpperBound
        };
        self.ctx.tt.store(
            hash,
            depth,
            score_to_tt(best_score, ply),
            bound,
            best_move,
            self.ctx.generation,
        );
        best_score
    }

    fn quiescence(&mut self, ply: u32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }

        let stand_pat = self.board.evaluate();
        if ply >= MAX_PLY || stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);

        let all = self.board.generate_moves();
        let mut tactical = MoveList::new();
        for &mv in all.iter().filter(|m| m.is_tactical()) {
            tactical.push(mv);
        }
        self.order_moves(&mut tactical, None);

        for &mv in tactical.iter() {
            let info = self.board.do_move(mv);
            let score = -self.quiescence(ply + 1, -beta, -alpha);
            self.board.undo_move(mv, info);
            if self.aborted {
                return 0;
            }
            if score >= beta {
                return score;
            }
            alpha = alpha.max(score);
        }
        alpha
    }

    /// TT move first, then captures by MVV-LVA, then promotions, then quiet moves.
    fn order_moves(&self, moves: &mut MoveList, tt_move: Option<Move>) {
        moves
            .as_mut_slice()
            .sort_by_cached_key(|&mv| std::cmp::Reverse(self.move_score(mv, tt_move)));
    }

    fn move_score(&self, mv: Move, tt_move: Option<Move>) -> i32 {
        if Some(mv) == tt_move {
            return 1_000_000;
        }
        let mut score = 0;
        if mv.is_capture() {
            let victim = self
                .board
                .piece_at(mv.to())
                .map_or(Piece::Pawn, |(_, piece)| piece);
            score += 100_000 + victim.value() * 10 - mv.piece().value() / 10;
        }
        if let Some(promo) = mv.promotion() {
            score += 50_000 + promo.value();
        }
        score
    }
}

fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(fen: &str, depth: u32) -> SearchResult {
        let mut board = Board::try_from_fen(fen).unwrap();
        let tt = TranspositionTable::new(1);
        let stop = StopFlag::new();
        let ctx = SearchContext {
            tt: &tt,
            stop: &stop,
            generation: 0,
        };
        let limits = SearchLimits {
            max_depth: depth,
            deadline: None,
        };
        search(&mut board, &ctx, limits, |_| {})
    }

    #[test]
    fn test_finds_mate_in_one() {
        // Back-rank mate: Ra8#
        let result = run("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("a1a8"));
        assert_eq!(mate_in(result.score), Some(1));
    }

    #[test]
    fn test_takes_hanging_queen() {
        let result = run("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", 2);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("d2d5"));
    }

    #[test]
    fn test_no_move_when_mated() {
        let result = run("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3", 4);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn test_stopped_search_still_returns_a_legal_move() {
        let mut board = Board::new();
        let tt = TranspositionTable::new(1);
        let stop = StopFlag::new();
        stop.stop();
        let ctx = SearchContext {
            tt: &tt,
            stop: &stop,
            generation: 0,
        };
        let limits = SearchLimits {
            max_depth: 64,
            deadline: None,
        };
        let result = search(&mut board, &ctx, limits, |_| {});
        let legal = board.generate_moves();
        assert!(legal.contains(result.best_move.unwrap()));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_iterations_reported_in_order() {
        let mut board = Board::new();
        let tt = TranspositionTable::new(1);
        let stop = StopFlag::new();
        let ctx = SearchContext {
            tt: &tt,
            stop: &stop,
            generation: 0,
        };
        let limits = SearchLimits {
            max_depth: 3,
            deadline: None,
        };
        let mut depths = Vec::new();
        let result = search(&mut board, &ctx, limits, |info| depths.push(info.depth));
        assert_eq!(depths, vec![1, 2, 3]);
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn test_mate_in_conversion() {
        assert_eq!(mate_in(MATE_SCORE - 1), Some(1));
        assert_eq!(mate_in(MATE_SCORE - 3), Some(2));
        assert_eq!(mate_in(-(MATE_SCORE - 2)), Some(-1));
        assert_eq!(mate_in(150), None);
    }
}
