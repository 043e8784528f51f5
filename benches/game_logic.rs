use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_snakes::core::{builtin_levels, parse_level, Board, GameState, Intent, Snake};
use tui_snakes::types::{Direction, Point, SnakeId};

fn bench_step(c: &mut Criterion) {
    let level = builtin_levels().remove(0);
    let mut state = GameState::from_level(&level).unwrap();
    state.settle();
    let intents = [
        Intent::new(SnakeId::new(0), Direction::Left),
        Intent::new(SnakeId::new(1), Direction::Right),
    ];

    c.bench_function("step_level_1", |b| {
        b.iter(|| {
            black_box(state.step(black_box(&intents)));
        })
    });
}

fn bench_settle_tall_drop(c: &mut Criterion) {
    let board = Board::new(40, 200).unwrap();
    let body: Vec<Point> = (0..20).map(|x| Point::new(x, 0)).collect();

    c.bench_function("settle_20_segments_200_rows", |b| {
        b.iter(|| {
            let snake =
                Snake::from_segments(SnakeId::new(0), body.iter().copied(), Direction::Left, 20)
                    .unwrap();
            let mut state = GameState::from_parts("tall", board.clone(), vec![snake], vec![]).unwrap();
            black_box(state.settle());
        })
    });
}

fn bench_parse_levels(c: &mut Criterion) {
    let levels = builtin_levels();

    c.bench_function("parse_builtin_levels", |b| {
        b.iter(|| {
            for level in &levels {
                black_box(parse_level(black_box(level)));
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let level = builtin_levels().remove(3);
    let state = GameState::from_level(&level).unwrap();
    let mut snap = state.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_settle_tall_drop,
    bench_parse_levels,
    bench_snapshot
);
criterion_main!(benches);
