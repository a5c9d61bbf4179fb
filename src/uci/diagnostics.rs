//! Non-standard debugging commands: `perft <depth>` and `mailbox`.
//!
//! Output goes to the diagnostic stream only. Perft depth is taken at face
//! value; large depths simply take a long time.

use std::time::Instant;

use crate::board::{Board, PerftCounts};

/// Count leaf nodes and captures from the start position.
///
/// Returns the counts and the formatted report lines.
#[must_use]
pub fn run_perft(depth: u32) -> (PerftCounts, Vec<String>) {
    let mut board = Board::new();
    let start = Instant::now();
    let counts = board.perft_counts(depth);
    let elapsed = start.elapsed();
    log::info!("perft {depth}: {} nodes in {elapsed:?}", counts.nodes);

    let lines = vec![
        format!("Nodes: {}", counts.nodes),
        format!("Captures: {}", counts.captures),
        format!("{}", elapsed.as_secs_f64()),
    ];
    (counts, lines)
}

/// The mailbox as 8 rows of codes, rank 1 first.
#[must_use]
pub fn mailbox_grid(board: &Board) -> Vec<String> {
    board
        .mailbox_codes()
        .chunks(8)
        .map(|rank| {
            rank.iter()
                .map(i8::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_one() {
        let (counts, lines) = run_perft(1);
        assert_eq!(counts.nodes, 20);
        assert_eq!(counts.captures, 0);
        assert_eq!(lines[0], "Nodes: 20");
        assert_eq!(lines[1], "Captures: 0");
        assert!(lines[2].parse::<f64>().is_ok());
    }

    #[test]
    fn test_start_grid() {
        let grid = mailbox_grid(&Board::new());
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0], "3 1 2 4 5 2 1 3");
        assert_eq!(grid[1], "0 0 0 0 0 0 0 0");
        assert_eq!(grid[3], "-1 -1 -1 -1 -1 -1 -1 -1");
        assert_eq!(grid[6], "6 6 6 6 6 6 6 6");
        assert_eq!(grid[7], "9 7 8 10 11 8 7 9");
    }
}
