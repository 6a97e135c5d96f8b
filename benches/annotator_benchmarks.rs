//! Benchmarks for single-game parsing and annotation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pgn_annotator::board::Board;
use pgn_annotator::pgn::parse_game;

const IMMORTAL_GAME: &str = r#"[Event "Casual game"]
[White "Anderssen"]
[Black "Kieseritzky"]
[Result "1-0"]

1. e4 e5 2. f4 exf4 3. Bc4 Qh4+ 4. Kf1 b5 5. Bxb5 Nf6 6. Nf3 Qh6
7. d3 Nh5 8. Nh4 Qg5 9. Nf5 c6 10. g4 Nf6 11. Rg1 cxb5 12. h4 Qg6
13. h5 Qg5 14. Qf3 Ng8 15. Bxf4 Qf6 16. Nc3 Bc5 17. Nd5 Qxb2
18. Bd6 Bxg1 19. e5 Qxa1+ 20. Ke2 Na6 21. Nxg7+ Kd8 22. Qf6+ Nxf6
23. Be7# 1-0
"#;

const VARIATION_HEAVY: &str =
    "1. e4 e5 (1... c5 2. Nf3 (2. Nc3 Nc6 (2... e6 3. d4)) d6) 2. Nf3 Nc6 (2... Nf6 3. Nxe5) 3. Bb5 *";

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");

    group.bench_function("immortal_game", |b| {
        b.iter(|| parse_game(black_box(IMMORTAL_GAME)).unwrap())
    });

    group.bench_function("variation_heavy", |b| {
        b.iter(|| parse_game(black_box(VARIATION_HEAVY)).unwrap())
    });

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Board::new();
    group.bench_function("startpos", |b| b.iter(|| black_box(startpos.legal_moves())));

    let middlegame =
        Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(middlegame.legal_moves()))
    });

    group.finish();
}

criterion_group!(benches, bench_annotate, bench_movegen);
criterion_main!(benches);
