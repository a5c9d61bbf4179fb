//! Benchmarks for move generation, perft, FEN parsing, move replay and `go`
//! resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use uci_chess::board::Board;
use uci_chess::engine::GoArgs;
use uci_chess::uci::parse_position;
use uci_chess::Color;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let mut board = Board::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| board.perft_counts(black_box(depth)))
        });
    }

    let mut kiwipete = Board::try_from_fen(KIWIPETE).unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft_counts(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let mut startpos = Board::new();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.generate_moves()))
    });

    let mut middlegame = Board::try_from_fen(MIDDLEGAME).unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.generate_moves()))
    });

    let mut kiwipete = Board::try_from_fen(KIWIPETE).unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(kiwipete.generate_moves()))
    });

    group.finish();
}

fn bench_fen(c: &mut Criterion) {
    let mut group = c.benchmark_group("fen");

    for (name, fen) in [("kiwipete", KIWIPETE), ("middlegame", MIDDLEGAME)] {
        group.bench_with_input(BenchmarkId::new("parse", name), fen, |b, fen| {
            b.iter(|| Board::try_from_fen(black_box(fen)))
        });
    }

    let kiwipete = Board::try_from_fen(KIWIPETE).unwrap();
    group.bench_function("write", |b| b.iter(|| black_box(&kiwipete).to_fen()));

    group.finish();
}

fn bench_position_command(c: &mut Criterion) {
    let line = "position startpos moves e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1 f8e7 \
                f1e1 b7b5 a4b3 d7d6 c2c3 e8g8";
    let parts: Vec<&str> = line.split_whitespace().collect();
    c.bench_function("position/ruy_lopez", |b| {
        b.iter(|| parse_position(black_box(&parts)))
    });
}

fn bench_go(c: &mut Criterion) {
    let line = "go wtime 300000 btime 298000 winc 2000 binc 2000 movestogo 40";
    let tokens: Vec<&str> = line.split_whitespace().collect();
    c.bench_function("go/resolve_clock", |b| {
        b.iter(|| {
            GoArgs::parse(black_box(&tokens))
                .map(|args| args.resolve(Color::Black))
        })
    });
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_fen,
    bench_position_command,
    bench_go
);
criterion_main!(benches);
