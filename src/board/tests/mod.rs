//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node and capture counts for move generation
//! - `make_unmake.rs` - Move application and undo correctness
//! - `proptest.rs` - Property-based tests

mod make_unmake;
mod proptest;
