//! Universal Chess Interface (UCI) protocol implementation.
//!
//! A [`Session`] reads one command per line and answers on the protocol
//! stream. Anything it does not understand is ignored, as UCI requires;
//! malformed arguments to commands it does understand are reported on the
//! diagnostic stream and leave the session unchanged.

use std::io::{self, BufRead};

use thiserror::Error;

use crate::board::{FenError, MoveParseError};
use crate::engine::{EngineController, GoArgs, GoError};

pub mod diagnostics;
pub mod options;
pub mod output;
pub mod position;

pub use options::{parse_setoption, UciOptionAction, UciOptions};
pub use output::{CaptureBuffer, Output, UciReporter};
pub use position::parse_position;

pub const ENGINE_NAME: &str = "UCI Chess Engine";
pub const ENGINE_AUTHOR: &str = "Jeffrey An and Michael An";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for rejected UCI command arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),
    #[error("invalid move '{notation}': {source}")]
    InvalidMove {
        notation: String,
        #[source]
        source: MoveParseError,
    },
    #[error("missing required parts in position command")]
    MissingParts,
    #[error("unexpected token '{token}' in position command")]
    UnexpectedToken { token: String },
    #[error("invalid go command: {0}")]
    Go(#[from] GoError),
    #[error("invalid perft depth '{value}'")]
    InvalidDepth { value: String },
    #[error("unknown option '{name}'")]
    UnknownOption { name: String },
    #[error("option '{name}' needs a value")]
    MissingOptionValue { name: String },
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOptionValue { name: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Searching,
}

/// Whether the command loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Command dispatcher. Owns the engine and both output streams.
pub struct Session {
    controller: EngineController,
    options: UciOptions,
    out: Output,
    diag: Output,
}

impl Session {
    #[must_use]
    pub fn new(hash_mb: usize, out: Output, diag: Output) -> Self {
        let options = UciOptions::new(hash_mb);
        Session {
            controller: EngineController::new(options.hash_mb),
            options,
            out,
            diag,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.controller.is_searching() {
            SessionState::Searching
        } else {
            SessionState::Idle
        }
    }

    #[must_use]
    pub fn controller(&self) -> &EngineController {
        &self.controller
    }

    #[must_use]
    pub fn options(&self) -> &UciOptions {
        &self.options
    }

    /// Reap a search that has finished on its own.
    pub fn poll(&mut self) {
        if self.controller.poll() {
            log::debug!("search completed");
        }
    }

    /// Read commands until `quit` or end of input, then stop any search.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and so end up
    /// ignored like any other unrecognized input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line) == Flow::Quit {
                return Ok(());
            }
        }
        log::debug!("input closed");
        self.controller.stop_search();
        Ok(())
    }

    /// Dispatch one input line.
    ///
    /// Checks are independent rather than exclusive. A line is matched on
    /// its whole first token, not a raw string prefix, so `gopher` is not
    /// taken for `go`.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        self.poll();

        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Flow::Continue;
        };
        let mut handled = false;

        if command == "uci" {
            self.identify();
            handled = true;
        }
        if command == "isready" {
            self.out.line("readyok");
            handled = true;
        }
        if command == "ucinewgame" {
            self.controller.new_game();
            handled = true;
        }
        if command == "setoption" {
            self.set_option(&parts);
            handled = true;
        }
        if command == "position" {
            match parse_position(&parts) {
                Ok(board) => self.controller.set_board(board),
                Err(e) => self.reject(line, &e),
            }
            handled = true;
        }
        if command == "go" {
            self.go(line, &parts);
            handled = true;
        }
        if command == "stop" {
            self.controller.stop_search();
            handled = true;
        }
        if command == "mailbox" {
            for row in diagnostics::mailbox_grid(self.controller.board()) {
                self.diag.line(&row);
            }
            handled = true;
        }
        if command == "perft" {
            self.perft(line, &parts);
            handled = true;
        }
        if command == "quit" {
            self.controller.stop_search();
            return Flow::Quit;
        }

        if !handled {
            log::debug!("ignoring unrecognized input: {line}");
        }
        Flow::Continue
    }

    fn identify(&self) {
        self.out
            .line(&format!("id name {ENGINE_NAME} {ENGINE_VERSION}"));
        self.out.line(&format!("id author {ENGINE_AUTHOR}"));
        for declaration in self.options.declarations() {
            self.out.line(&declaration);
        }
        self.out.line("uciok");
    }

    fn set_option(&mut self, parts: &[&str]) {
        let Some((name, value)) = parse_setoption(parts) else {
            log::debug!("ignoring setoption without a name");
            return;
        };
        match self.options.apply_setoption(&name, value.as_deref()) {
            Ok(Some(UciOptionAction::ReinitHash(mb))) => self.controller.resize_hash(mb),
            Ok(None) => {}
            Err(e) => self.reject(&parts.join(" "), &e),
        }
    }

    fn go(&mut self, line: &str, parts: &[&str]) {
        if self.controller.is_searching() {
            log::debug!("ignoring go while a search is running");
            return;
        }
        let args = match GoArgs::parse(parts) {
            Ok(args) => args,
            Err(e) => return self.reject(line, &UciError::from(e)),
        };
        let params = args.resolve(self.controller.board().side_to_move());
        let reporter = UciReporter::new(self.out.clone());
        if let Err(e) = self.controller.start_search(params, reporter) {
            log::error!("failed to spawn search thread: {e}");
        }
    }

    fn perft(&self, line: &str, parts: &[&str]) {
        let [_, depth] = parts else {
            log::debug!("ignoring perft without exactly one argument");
            return;
        };
        let Ok(depth) = depth.parse::<u32>() else {
            return self.reject(
                line,
                &UciError::InvalidDepth {
                    value: (*depth).to_string(),
                },
            );
        };
        let (_, report) = diagnostics::run_perft(depth);
        for report_line in report {
            self.diag.line(&report_line);
        }
    }

    fn reject(&self, line: &str, error: &UciError) {
        log::warn!("rejected '{line}': {error}");
        self.diag.line(&format!("error: {error}"));
    }
}
