//! Protocol and diagnostic output channels.
//!
//! The host parses only the protocol stream, so anything meant for a human
//! (perft counts, the mailbox dump, rejected input) goes to the diagnostic
//! stream instead. Both are shared with the search thread, which prints
//! `info` and `bestmove` lines as it goes.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::search::{mate_in, SearchInfo, SearchResult};
use crate::engine::SearchListener;

type Sink = Box<dyn Write + Send>;

/// A line-oriented, thread-shareable writer.
#[derive(Clone)]
pub struct Output(Arc<Mutex<Sink>>);

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Output(Arc::new(Mutex::new(Box::new(writer))))
    }

    #[must_use]
    pub fn stdout() -> Self {
        Output::new(io::stdout())
    }

    #[must_use]
    pub fn stderr() -> Self {
        Output::new(io::stderr())
    }

    /// An output whose lines can be read back, for tests and embedding.
    #[must_use]
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (Output::new(buffer.clone()), buffer)
    }

    /// Write one line and flush. Failures are logged; a closed host pipe
    /// must not take the engine down mid-search.
    pub fn line(&self, text: &str) {
        let mut sink = self.0.lock();
        let result = writeln!(sink, "{text}").and_then(|()| sink.flush());
        if let Err(e) = result {
            log::warn!("failed to write output line: {e}");
        }
    }
}

/// Shared in-memory sink.
#[derive(Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    /// Everything written so far, split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Drain and return the captured lines.
    pub fn take_lines(&self) -> Vec<String> {
        let lines = self.lines();
        self.0.lock().clear();
        lines
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Prints search progress in UCI form on the protocol stream.
pub struct UciReporter {
    out: Output,
}

impl UciReporter {
    #[must_use]
    pub fn new(out: Output) -> Self {
        UciReporter { out }
    }
}

impl SearchListener for UciReporter {
    fn on_iteration(&self, info: &SearchInfo, hashfull: u32) {
        self.out.line(&format_info(info, hashfull));
    }

    fn on_complete(&self, result: &SearchResult) {
        self.out.line(&format_bestmove(result));
    }
}

#[must_use]
pub fn format_info(info: &SearchInfo, hashfull: u32) -> String {
    let score = match mate_in(info.score) {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", info.score),
    };
    let mut line = format!(
        "info depth {} score {} nodes {} time {} hashfull {}",
        info.depth,
        score,
        info.nodes,
        info.elapsed.as_millis(),
        hashfull
    );
    if let Some(mv) = info.best_move {
        line.push_str(&format!(" pv {mv}"));
    }
    line
}

#[must_use]
pub fn format_bestmove(result: &SearchResult) -> String {
    match result.best_move {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove (none)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::search::MATE_SCORE;
    use crate::board::Board;
    use std::time::Duration;

    #[test]
    fn test_capture_collects_lines() {
        let (out, buffer) = Output::capture();
        out.line("readyok");
        out.line("uciok");
        assert_eq!(buffer.take_lines(), vec!["readyok", "uciok"]);
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_info_line_format() {
        let mv = Board::new().parse_uci_move("e2e4").unwrap();
        let info = SearchInfo {
            depth: 3,
            score: 25,
            nodes: 1234,
            elapsed: Duration::from_millis(56),
            best_move: Some(mv),
        };
        assert_eq!(
            format_info(&info, 7),
            "info depth 3 score cp 25 nodes 1234 time 56 hashfull 7 pv e2e4"
        );
    }

    #[test]
    fn test_info_line_reports_mate() {
        let info = SearchInfo {
            depth: 2,
            score: MATE_SCORE - 1,
            nodes: 10,
            elapsed: Duration::ZERO,
            best_move: None,
        };
        assert_eq!(
            format_info(&info, 0),
            "info depth 2 score mate 1 nodes 10 time 0 hashfull 0"
        );
    }

    #[test]
    fn test_bestmove_without_move() {
        let result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        };
        assert_eq!(format_bestmove(&result), "bestmove (none)");
    }
}
