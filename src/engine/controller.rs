//! Engine controller implementation.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};

use crate::board::search::{search, SearchContext, SearchInfo, SearchLimits, SearchResult};
use crate::board::{Board, Move};
use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

use super::time::{SearchMode, SearchParams, MAX_DEPTH};

/// Search thread stack size (16 MB)
const SEARCH_STACK_SIZE: usize = 16 * 1024 * 1024;

/// How long `stop` waits for the search thread to acknowledge
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Receives progress from a running search, on the search thread.
pub trait SearchListener: Send + 'static {
    /// Called after each completed iteration.
    fn on_iteration(&self, info: &SearchInfo, hashfull: u32);
    /// Called once with the final result, before completion is signalled.
    fn on_complete(&self, result: &SearchResult);
}

/// Active search job state
pub struct SearchJob {
    stop: StopFlag,
    done: Receiver<SearchResult>,
    handle: JoinHandle<()>,
}

/// Owns the position, the transposition table and at most one search.
///
/// The search thread works on a snapshot of the position and reports back
/// over a channel, so replacing the position while a search runs is safe.
pub struct EngineController {
    board: Board,
    tt: Arc<TranspositionTable>,
    current_job: Option<SearchJob>,
    /// Best move of the most recently finished search
    best_move: Option<Move>,
    generation: u8,
}

impl EngineController {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        EngineController {
            board: Board::new(),
            tt: Arc::new(TranspositionTable::new(tt_mb)),
            current_job: None,
            best_move: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the position. A running search keeps its own snapshot.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    #[must_use]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// The result slot: best move of the last finished search.
    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job.is_some()
    }

    /// Reset to the start position and clear the transposition table,
    /// stopping any search first.
    pub fn new_game(&mut self) {
        self.stop_search();
        self.board = Board::new();
        self.tt.clear();
        self.generation = 0;
    }

    /// Replace the transposition table with one of `mb` megabytes.
    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        self.tt = Arc::new(TranspositionTable::new(mb));
        log::info!("transposition table resized to {} MB", self.tt.size_mb());
    }

    /// Reap a search that finished on its own. Returns true if one was reaped.
    pub fn poll(&mut self) -> bool {
        let Some(job) = &self.current_job else {
            return false;
        };
        match job.done.try_recv() {
            Ok(result) => {
                self.finish_job(Some(result));
                true
            }
            Err(TryRecvError::Disconnected) => {
                log::error!("search thread exited without reporting a result");
                self.finish_job(None);
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    /// Start a search on a snapshot of the current position.
    ///
    /// Returns `Ok(false)` without doing anything if a search is already
    /// running.
    pub fn start_search<L: SearchListener>(
        &mut self,
        params: SearchParams,
        listener: L,
    ) -> io::Result<bool> {
        if self.current_job.is_some() {
            return Ok(false);
        }

        self.best_move = None;
        self.generation = self.generation.wrapping_add(1) & 0x3F;

        let limits = match params.mode {
            SearchMode::FixedDepth => SearchLimits {
                max_depth: params.value.min(MAX_DEPTH) as u32,
                deadline: None,
            },
            SearchMode::TimeBudget => SearchLimits {
                max_depth: MAX_DEPTH as u32,
                deadline: Some(Instant::now() + Duration::from_millis(params.value)),
            },
        };
        log::info!("starting search: {params:?}");

        let stop = StopFlag::new();
        let (tx, done) = bounded(1);
        let mut search_board = self.board.clone();
        let tt = Arc::clone(&self.tt);
        let stop_clone = stop.clone();
        let generation = self.generation;

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let ctx = SearchContext {
                    tt: &tt,
                    stop: &stop_clone,
                    generation,
                };
                let result = search(&mut search_board, &ctx, limits, |info| {
                    listener.on_iteration(info, tt.hashfull_per_mille());
                });
                listener.on_complete(&result);
                // The receiver is gone only if the controller was dropped
                let _ = tx.send(result);
            })?;

        self.current_job = Some(SearchJob { stop, done, handle });
        Ok(true)
    }

    /// Stop the running search and wait for it to acknowledge.
    ///
    /// Blocks until the search thread has reported its result, or for at
    /// most [`STOP_TIMEOUT`]. Returns false if the acknowledgment timed out;
    /// the job is then kept so a later call can reap it.
    pub fn stop_search(&mut self) -> bool {
        let Some(job) = &self.current_job else {
            return true;
        };
        job.stop.stop();
        match job.done.recv_timeout(STOP_TIMEOUT) {
            Ok(result) => {
                self.finish_job(Some(result));
                true
            }
            Err(RecvTimeoutError::Disconnected) => {
                log::error!("search thread exited without reporting a result");
                self.finish_job(None);
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "search did not acknowledge stop within {} ms",
                    STOP_TIMEOUT.as_millis()
                );
                false
            }
        }
    }

    fn finish_job(&mut self, result: Option<SearchResult>) {
        if let Some(job) = self.current_job.take() {
            if job.handle.join().is_err() {
                log::error!("search thread panicked");
            }
        }
        if let Some(result) = result {
            log::info!(
                "search finished: depth {} nodes {} best {:?}",
                result.depth,
                result.nodes,
                result.best_move
            );
            self.best_move = result.best_move;
        }
    }
}

impl Drop for EngineController {
    fn drop(&mut self) {
        self.stop_search();
    }
}
