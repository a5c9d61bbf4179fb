//! Engine controller and search parameter resolution.
//!
//! The controller owns the position and the transposition table and runs at
//! most one search on its own thread; `time` turns `go` arguments into a
//! normalized search request.

mod controller;
pub mod time;

pub use controller::{EngineController, SearchJob, SearchListener, STOP_TIMEOUT};
pub use time::{GoArgs, GoError, SearchMode, SearchParams, MAX_DEPTH};
