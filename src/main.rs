use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::Parser;

use uci_chess::tt::{DEFAULT_TT_MB, MAX_TT_MB, MIN_TT_MB};
use uci_chess::uci::{Output, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial transposition table size in MB
    #[arg(
        long,
        default_value_t = DEFAULT_TT_MB,
        value_parser = RangedU64ValueParser::<usize>::new().range(MIN_TT_MB as u64..=MAX_TT_MB as u64)
    )]
    hash: usize,

    /// Log filter (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout is the protocol stream; logs must never reach it
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, &args.log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    log::info!("starting with {} MB hash", args.hash);
    let mut session = Session::new(args.hash, Output::stdout(), Output::stderr());
    session
        .run(io::stdin().lock())
        .context("failed to read commands from stdin")?;
    Ok(())
}
