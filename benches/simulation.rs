use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use crypt_raider::core::{explode, parse_level, tick_gravity, Board, LevelSession, LevelSet};
use crypt_raider::types::{Pos, TileKind};

fn shipped_levels() -> LevelSet {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
    LevelSet::load_dir(&dir, 18, 12).unwrap()
}

fn bench_session_tick(c: &mut Criterion) {
    let mut session = LevelSession::new(shipped_levels());
    session.start_at(2);

    c.bench_function("session_tick_level3", |b| {
        b.iter(|| {
            black_box(session.tick());
            if session.state() != crypt_raider::types::SessionState::Active {
                session.restart_level();
            }
        })
    });
}

fn bench_gravity_column(c: &mut Criterion) {
    // A full-height column of rocks over open floor.
    let mut rows = vec!["R".repeat(18); 6];
    rows.extend(std::iter::repeat(".".repeat(18)).take(5));
    rows.push(format!("U{}", ".".repeat(17)));
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let board = Board::from_rows(&rows).unwrap();

    c.bench_function("gravity_108_rocks", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(tick_gravity(&mut board)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_chain_explosion(c: &mut Criterion) {
    let mut rows = vec!["B".repeat(18); 11];
    rows.push(format!("{}U", "H".repeat(17)));
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let board = Board::from_rows(&rows).unwrap();
    assert_eq!(board.count(TileKind::Bomb), 198);

    c.bench_function("chain_198_bombs", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(explode(&mut board, Pos::new(0, 0))),
            BatchSize::SmallInput,
        )
    });
}

fn bench_parse_level(c: &mut Criterion) {
    let source = std::fs::read_to_string(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("levels/level2.txt"),
    )
    .unwrap();

    c.bench_function("parse_level", |b| {
        b.iter(|| parse_level(black_box(&source), 18, 12).unwrap())
    });
}

criterion_group!(
    benches,
    bench_session_tick,
    bench_gravity_column,
    bench_chain_explosion,
    bench_parse_level
);
criterion_main!(benches);
