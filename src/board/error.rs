//! Error types for board parsing.

use thiserror::Error;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have 6 fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("FEN board must have 8 ranks, found {found}")]
    WrongRankCount { found: usize },
    #[error("rank {rank} of FEN board describes {files} files")]
    BadRankWidth { rank: u8, files: usize },
    #[error("invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    #[error("invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    #[error("invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    #[error("invalid {field} '{found}'")]
    InvalidCounter { field: &'static str, found: String },
    #[error("{color} must have exactly one king, found {found}")]
    KingCount { color: &'static str, found: u32 },
    #[error("{color} is in check but it is not {color}'s move")]
    OpponentInCheck { color: &'static str },
}

/// Error type for long-algebraic move replay failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move '{notation}' must be 4 or 5 characters")]
    InvalidLength { notation: String },
    #[error("invalid square in move '{notation}'")]
    InvalidSquare { notation: String },
    #[error("no piece on the start square of '{notation}'")]
    EmptySquare { notation: String },
    #[error("move '{notation}' moves a piece of the side not to move")]
    WrongColor { notation: String },
    #[error("invalid promotion piece '{char}'")]
    InvalidPromotion { char: char },
}

/// Error type for square construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("rank {rank} out of bounds (0-7)")]
    RankOutOfBounds { rank: u8 },
    #[error("file {file} out of bounds (0-7)")]
    FileOutOfBounds { file: u8 },
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}
