//! `go` command arguments and their resolution into search parameters.
//!
//! Time management is a fixed heuristic: roughly a fortieth of the remaining
//! clock (plus forty increments) minus a 200 ms safety margin. It does not
//! adapt to the game phase or to `movestogo`.

use thiserror::Error;

use crate::board::Color;

/// Deepest search `go infinite` asks for, in plies.
pub const MAX_DEPTH: u64 = 64;

/// Moves the remaining clock is spread over.
const MOVES_PER_BUDGET: u64 = 40;
/// Reserved for communication latency, in ms.
const SAFETY_MARGIN_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// `value` is a depth in plies
    FixedDepth,
    /// `value` is a time budget in milliseconds
    TimeBudget,
}

/// Normalized search request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub mode: SearchMode,
    pub value: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            mode: SearchMode::FixedDepth,
            value: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoError {
    #[error("'{keyword}' expects a number, got '{value}'")]
    InvalidNumber { keyword: String, value: String },
    #[error("'{keyword}' is missing its value")]
    MissingValue { keyword: String },
}

/// Recognized keywords of a `go` line. Absent keywords are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoArgs {
    pub movetime: Option<u64>,
    pub depth: Option<u64>,
    pub infinite: bool,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
}

impl GoArgs {
    /// Scan a tokenized `go` line for recognized keywords, wherever they
    /// appear. A leading `go` token is allowed. Unrecognized tokens such as
    /// `ponder` or `nodes 5000` are skipped. Negative clock values, which
    /// some hosts send after a flag fall, count as zero.
    pub fn parse(tokens: &[&str]) -> Result<Self, GoError> {
        let mut args = GoArgs::default();
        let mut iter = tokens.iter().copied().skip_while(|t| *t == "go");

        while let Some(token) = iter.next() {
            let slot = match token {
                "movetime" => &mut args.movetime,
                "depth" => &mut args.depth,
                "wtime" => &mut args.wtime,
                "btime" => &mut args.btime,
                "winc" => &mut args.winc,
                "binc" => &mut args.binc,
                "infinite" => {
                    args.infinite = true;
                    continue;
                }
                _ => continue,
            };
            let value = iter.next().ok_or_else(|| GoError::MissingValue {
                keyword: token.to_string(),
            })?;
            let number: i64 = value.parse().map_err(|_| GoError::InvalidNumber {
                keyword: token.to_string(),
                value: value.to_string(),
            })?;
            *slot = Some(number.max(0) as u64);
        }
        Ok(args)
    }

    /// Resolve into a single (mode, value) pair for `side`.
    ///
    /// Clauses apply in the fixed order movetime, depth, infinite, clock;
    /// each one present overrides the ones before it. With none present the
    /// result is a depth-1 search. The clock clause needs the side to move's
    /// own clock; its increment defaults to zero.
    #[must_use]
    pub fn resolve(&self, side: Color) -> SearchParams {
        let mut params = SearchParams::default();

        if let Some(ms) = self.movetime {
            params = SearchParams {
                mode: SearchMode::TimeBudget,
                value: ms,
            };
        }
        if let Some(depth) = self.depth {
            params = SearchParams {
                mode: SearchMode::FixedDepth,
                value: depth,
            };
        }
        if self.infinite {
            params = SearchParams {
                mode: SearchMode::FixedDepth,
                value: MAX_DEPTH,
            };
        }
        let (clock, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        if let Some(clock) = clock {
            params = SearchParams {
                mode: SearchMode::TimeBudget,
                value: time_budget_ms(clock, inc.unwrap_or(0)),
            };
        }
        params
    }
}

/// `(clock + 40 * inc - 200) / 40`, saturating at zero.
#[must_use]
pub fn time_budget_ms(clock_ms: u64, inc_ms: u64) -> u64 {
    clock_ms
        .saturating_add(inc_ms.saturating_mul(MOVES_PER_BUDGET))
        .saturating_sub(SAFETY_MARGIN_MS)
        / MOVES_PER_BUDGET
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(line: &str, side: Color) -> SearchParams {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        GoArgs::parse(&tokens).unwrap().resolve(side)
    }

    fn params(mode: SearchMode, value: u64) -> SearchParams {
        SearchParams { mode, value }
    }

    #[test]
    fn test_depth() {
        assert_eq!(resolve("go depth 6", Color::White), params(SearchMode::FixedDepth, 6));
    }

    #[test]
    fn test_movetime() {
        assert_eq!(
            resolve("go movetime 5000", Color::White),
            params(SearchMode::TimeBudget, 5000)
        );
    }

    #[test]
    fn test_infinite() {
        assert_eq!(
            resolve("go infinite", Color::Black),
            params(SearchMode::FixedDepth, MAX_DEPTH)
        );
    }

    #[test]
    fn test_clock_without_increment() {
        assert_eq!(
            resolve("go wtime 60000 btime 60000", Color::White),
            params(SearchMode::TimeBudget, 1495)
        );
    }

    #[test]
    fn test_clock_with_increment_for_black() {
        assert_eq!(
            resolve("go wtime 60000 btime 60000 winc 1000 binc 1000", Color::Black),
            params(SearchMode::TimeBudget, 2495)
        );
    }

    #[test]
    fn test_clock_uses_own_side() {
        assert_eq!(
            resolve("go wtime 1000 btime 81000", Color::Black),
            params(SearchMode::TimeBudget, 2020)
        );
        assert_eq!(
            resolve("go wtime 1000 btime 81000", Color::White),
            params(SearchMode::TimeBudget, 20)
        );
    }

    #[test]
    fn test_default_is_depth_one() {
        assert_eq!(resolve("go", Color::White), SearchParams::default());
        assert_eq!(resolve("go ponder", Color::White), params(SearchMode::FixedDepth, 1));
    }

    #[test]
    fn test_later_clauses_override_earlier() {
        // depth beats movetime regardless of textual order
        assert_eq!(
            resolve("go depth 3 movetime 100", Color::White),
            params(SearchMode::FixedDepth, 3)
        );
        // infinite beats depth
        assert_eq!(
            resolve("go infinite depth 3", Color::White),
            params(SearchMode::FixedDepth, MAX_DEPTH)
        );
        // clock beats everything
        assert_eq!(
            resolve("go infinite wtime 4200", Color::White),
            params(SearchMode::TimeBudget, 100)
        );
    }

    #[test]
    fn test_keyword_order_is_free() {
        assert_eq!(
            resolve("go binc 1000 winc 1000 btime 60000 wtime 60000", Color::Black),
            resolve("go wtime 60000 btime 60000 winc 1000 binc 1000", Color::Black)
        );
        assert_eq!(
            resolve("go movestogo 20 nodes 5000 depth 4", Color::White),
            params(SearchMode::FixedDepth, 4)
        );
    }

    #[test]
    fn test_missing_own_clock_skips_clock_clause() {
        assert_eq!(
            resolve("go depth 5 btime 60000", Color::White),
            params(SearchMode::FixedDepth, 5)
        );
    }

    #[test]
    fn test_tiny_clock_saturates_at_zero() {
        assert_eq!(
            resolve("go wtime 150 btime 150", Color::White),
            params(SearchMode::TimeBudget, 0)
        );
        assert_eq!(
            resolve("go wtime -300 btime 150", Color::White),
            params(SearchMode::TimeBudget, 0)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            GoArgs::parse(&["go", "depth", "six"]),
            Err(GoError::InvalidNumber {
                keyword: "depth".to_string(),
                value: "six".to_string()
            })
        );
        assert_eq!(
            GoArgs::parse(&["go", "movetime"]),
            Err(GoError::MissingValue {
                keyword: "movetime".to_string()
            })
        );
    }
}
