use std::hint::black_box;

use arbiter::{legal, perft, Board, Square};
use criterion::{criterion_group, criterion_main, Criterion};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let board = Board::default();
    c.bench_function("perft startpos 3", |b| {
        b.iter(|| assert_eq!(perft(black_box(&board), 3), 8_902))
    });

    let board: Board = KIWIPETE.parse().expect("valid fen");
    c.bench_function("perft kiwipete 2", |b| {
        b.iter(|| assert_eq!(perft(black_box(&board), 2), 2_039))
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let board: Board = MIDDLEGAME.parse().expect("valid fen");
    c.bench_function("legal moves", |b| {
        b.iter(|| assert_eq!(legal::legal_moves(black_box(&board)).len(), 39))
    });
    c.bench_function("legal destinations", |b| {
        b.iter(|| legal::legal_destinations(black_box(&board), black_box(Square::D8)))
    });
}

fn bench_play(c: &mut Criterion) {
    let board: Board = MIDDLEGAME.parse().expect("valid fen");
    c.bench_function("play", |b| {
        b.iter(|| legal::play(black_box(&board), Square::F8, Square::E7, None).expect("legal move"))
    });
}

fn bench_validate(c: &mut Criterion) {
    let board: Board = KIWIPETE.parse().expect("valid fen");
    c.bench_function("validate", |b| b.iter(|| black_box(&board).validate()));
}

fn bench_fen(c: &mut Criterion) {
    c.bench_function("parse fen", |b| {
        b.iter(|| black_box(KIWIPETE).parse::<Board>().expect("valid fen"))
    });
    let board: Board = KIWIPETE.parse().expect("valid fen");
    c.bench_function("write fen", |b| b.iter(|| black_box(&board).to_fen()));
}

criterion_group!(
    benches,
    bench_perft,
    bench_legal_moves,
    bench_play,
    bench_validate,
    bench_fen
);
criterion_main!(benches);
