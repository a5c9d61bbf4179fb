//! A UCI chess engine.
//!
//! - [`board`]: position model, FEN, long algebraic replay, move generation, search
//! - [`engine`]: `go` resolution and the single-search controller
//! - [`uci`]: the command session and its output streams

pub mod board;
pub mod engine;
pub mod sync;
pub mod tt;
pub mod uci;
mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::{EngineController, SearchMode, SearchParams};
pub use tt::TranspositionTable;
pub use uci::Session;
