use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use board_lab::game_state::chess_types::Color;
use board_lab::game_state::position::Position;
use board_lab::move_generation::legal_move_generator::generate_all_moves_in_place;
use board_lab::search::board_scoring::CenterControlScorer;
use board_lab::search::minimax::{find_best_move, SearchConfig};
use board_lab::utils::fen_parser::parse_fen;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    /// Pseudo-legal move count for the side to move.
    expected_moves: usize,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_moves: 20,
    },
    BenchCase {
        name: "open_center",
        fen: "r1bqkbnr/pppppppp/2n5/7Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 0 1",
        expected_moves: 21,
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_moves: 16,
    },
];

fn load(case: &BenchCase) -> (Position, Color) {
    parse_fen(case.fen).expect("benchmark FEN should parse")
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("pseudo_legal_movegen");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let (position, side) = load(case);
        let mut buffer = Vec::new();

        // Correctness guard before benchmarking.
        generate_all_moves_in_place(&position, side, &mut buffer);
        assert_eq!(buffer.len(), case.expected_moves, "move count mismatch for {}", case.name);

        group.throughput(Throughput::Elements(case.expected_moves as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &position, |b, position| {
            b.iter(|| {
                generate_all_moves_in_place(black_box(position), side, &mut buffer);
                black_box(buffer.len())
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax_depth3");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let config = SearchConfig::default();

    for case in CASES {
        let (position, side) = load(case);
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &position, |b, position| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let result = find_best_move(black_box(position), side, &CenterControlScorer, config, &mut rng);
                black_box(result.best_move)
            });
        });
    }

    group.finish();
}

criterion_group!(movegen_benches, bench_movegen, bench_search);
criterion_main!(movegen_benches);
