use super::Board;

/// Leaf totals from a perft run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    /// Leaf moves that capture, en passant included
    pub captures: u64,
}

impl std::ops::AddAssign for PerftCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
    }
}

impl Board {
    /// Count leaf nodes `depth` plies below this position.
    pub fn perft(&mut self, depth: u32) -> u64 {
        self.perft_counts(depth).nodes
    }

    /// Count leaf nodes and leaf captures `depth` plies below this position.
    pub fn perft_counts(&mut self, depth: u32) -> PerftCounts {
        if depth == 0 {
            return PerftCounts {
                nodes: 1,
                captures: 0,
            };
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return PerftCounts {
                nodes: moves.len() as u64,
                captures: moves.iter().filter(|m| m.is_capture()).count() as u64,
            };
        }

        let mut counts = PerftCounts::default();
        for &mv in moves.iter() {
            let info = self.do_move(mv);
            counts += self.perft_counts(depth - 1);
            self.undo_move(mv, info);
        }
        counts
    }
}
