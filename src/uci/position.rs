//! `position` command parsing.

use crate::board::Board;

use super::UciError;

/// Number of fields in a complete FEN string.
const FEN_FIELDS: usize = 6;
/// Counters assumed when a host sends only the first four FEN fields.
const DEFAULT_COUNTERS: [&str; 2] = ["0", "1"];

/// Build the board described by a tokenized `position` command.
///
/// Supports `position startpos` and `position fen <fields>`, optionally
/// followed by `moves <m1> <m2> ...`. The FEN may omit its two counters.
/// The result is a fresh board; callers keep their current one on error.
pub fn parse_position(parts: &[&str]) -> Result<Board, UciError> {
    let mut rest = match parts.first() {
        Some(&"position") => &parts[1..],
        _ => parts,
    };

    let mut board = match rest.first() {
        Some(&"startpos") => {
            rest = &rest[1..];
            Board::new()
        }
        Some(&"fen") => {
            let fields_end = rest[1..]
                .iter()
                .position(|t| *t == "moves")
                .map_or(rest.len(), |i| i + 1);
            let mut fields: Vec<&str> = rest[1..fields_end].to_vec();
            if fields.len() == FEN_FIELDS - DEFAULT_COUNTERS.len() {
                fields.extend(DEFAULT_COUNTERS);
            }
            rest = &rest[fields_end..];
            Board::try_from_fen(&fields.join(" "))?
        }
        _ => return Err(UciError::MissingParts),
    };

    match rest.split_first() {
        None => {}
        Some((&"moves", moves)) => {
            for notation in moves {
                board
                    .apply_uci_move(notation)
                    .map_err(|source| UciError::InvalidMove {
                        notation: (*notation).to_string(),
                        source,
                    })?;
            }
        }
        Some((token, _)) => {
            return Err(UciError::UnexpectedToken {
                token: (*token).to_string(),
            })
        }
    }

    Ok(board)
}
