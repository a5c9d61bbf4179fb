use std::str::FromStr;

use super::error::FenError;
use super::{Board, CastlingRights, Color, Piece, Square};

impl Board {
    /// Parse a board position from a 6-field FEN string.
    ///
    /// Every class of malformed input is reported as its own [`FenError`]
    /// variant; nothing is accepted silently.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        // Ranks are listed from 8 down to 1
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += run as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(rank, file as u8).ok_or(FenError::BadRankWidth {
                    rank: rank + 1,
                    files: file + 1,
                })?;
                board.set_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut rights = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                if !rights.set_from_fen_char(c) {
                    return Err(FenError::InvalidCastling { char: c });
                }
            }
        }
        board.castling_rights = rights;

        board.en_passant_file = match parts[3] {
            "-" => None,
            other => {
                let sq: Square = other.parse().map_err(|_| FenError::InvalidEnPassant {
                    found: other.to_string(),
                })?;
                if sq.rank() != 2 && sq.rank() != 5 {
                    return Err(FenError::InvalidEnPassant {
                        found: other.to_string(),
                    });
                }
                Some(sq.file())
            }
        };

        board.halfmove_clock = parse_counter(parts[4], "halfmove clock")?;
        board.fullmove_number = parse_counter(parts[5], "fullmove number")?;

        for (color, name) in [(Color::White, "White"), (Color::Black, "Black")] {
            let kings = board.pieces_of(color, Piece::King).popcount();
            if kings != 1 {
                return Err(FenError::KingCount {
                    color: name,
                    found: kings,
                });
            }
        }

        let waiting = board.side_to_move.opponent();
        if board.in_check(waiting) {
            return Err(FenError::OpponentInCheck {
                color: match waiting {
                    Color::White => "White",
                    Color::Black => "Black",
                },
            });
        }

        board.hash = board.compute_hash();
        Ok(board)
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                let entry = Square::new(rank, file).and_then(|sq| self.piece_at(sq));
                match entry {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let en_passant = self
            .en_passant_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            side,
            self.castling_rights.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn parse_counter(field: &str, name: &'static str) -> Result<u32, FenError> {
    field.parse().map_err(|_| FenError::InvalidCounter {
        field: name,
        found: field.to_string(),
    })
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            STARTPOS_FEN,
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
        ] {
            let board = Board::try_from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn test_startpos_matches_new() {
        assert_eq!(Board::try_from_fen(STARTPOS_FEN).unwrap(), Board::new());
    }

    #[test]
    fn test_fen_black_to_move() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant_file(), Some(4));
        assert_eq!(board.en_passant_square(), "e3".parse().ok());
    }

    #[test]
    fn test_fen_error_wrong_field_count() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -");
        assert_eq!(result, Err(FenError::WrongFieldCount { found: 4 }));
        let result = Board::try_from_fen(&format!("{STARTPOS_FEN} extra"));
        assert_eq!(result, Err(FenError::WrongFieldCount { found: 7 }));
    }

    #[test]
    fn test_fen_error_ranks() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(result, Err(FenError::WrongRankCount { found: 7 }));
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K8 w - - 0 1");
        assert!(matches!(result, Err(FenError::BadRankWidth { rank: 1, .. })));
        let result = Board::try_from_fen("k6/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(result, Err(FenError::BadRankWidth { rank: 8, files: 7 }));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result = Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result, Err(FenError::InvalidPiece { char: 'x' }));
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K06 w - - 0 1");
        assert_eq!(result, Err(FenError::InvalidPiece { char: '0' }));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K7 x - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K7 w KX - 0 1");
        assert_eq!(result, Err(FenError::InvalidCastling { char: 'X' }));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        for ep in ["z9", "e4", "e"] {
            let fen = format!("k7/8/8/8/8/8/8/K7 w - {ep} 0 1");
            assert!(matches!(
                Board::try_from_fen(&fen),
                Err(FenError::InvalidEnPassant { .. })
            ));
        }
    }

    #[test]
    fn test_fen_error_counters() {
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K7 w - - x 1");
        assert_eq!(
            result,
            Err(FenError::InvalidCounter {
                field: "halfmove clock",
                found: "x".to_string()
            })
        );
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K7 w - - 0 -3");
        assert!(matches!(
            result,
            Err(FenError::InvalidCounter {
                field: "fullmove number",
                ..
            })
        ));
    }

    #[test]
    fn test_fen_error_king_count() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::KingCount {
                color: "Black",
                found: 0
            })
        );
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/KK6 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::KingCount {
                color: "White",
                found: 2
            })
        ));
    }

    #[test]
    fn test_fen_error_opponent_in_check() {
        let result = Board::try_from_fen("QQQQQQQQ/QQQQQQQQ/8/8/8/8/8/K6k w - - 0 1");
        assert_eq!(result, Err(FenError::OpponentInCheck { color: "Black" }));
        // The side to move may be in check
        assert!(Board::try_from_fen("k7/8/8/8/8/8/8/K6r w - - 0 1").is_ok());
        assert_eq!(
            Board::try_from_fen("k7/8/8/8/8/8/8/K6r b - - 0 1"),
            Err(FenError::OpponentInCheck { color: "White" })
        );
    }

    #[test]
    fn test_fen_partial_castling() {
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let rights = board.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn test_counters_parsed() {
        let board = Board::try_from_fen("k7/8/8/8/8/8/8/K7 b - - 37 112").unwrap();
        assert_eq!(board.halfmove_clock(), 37);
        assert_eq!(board.fullmove_number(), 112);
    }

    #[test]
    fn test_from_str_trait() {
        let board: Board = STARTPOS_FEN.parse().unwrap();
        assert_eq!(board.mailbox().len(), 64);
        assert_eq!(board.side_to_move(), Color::White);
    }
}
