use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{base_shape, has_collision, rotate, Field, Game};
use blockfall::types::{Cell, Key, PieceKind, PlayerInput, RotateDirection};

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::new(12345);
    game.start();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if !game.playing() {
                game.start();
            }
            black_box(game.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::new();
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..10 {
                    field.set(row, col, Cell::Filled(PieceKind::I));
                }
            }
            black_box(field.clear_full_rows());
        })
    });
}

fn bench_merge(c: &mut Criterion) {
    let mut field = Field::new();
    for col in 0..8 {
        field.set(19, col, Cell::Filled(PieceKind::J));
    }
    let o = base_shape(PieceKind::O);

    c.bench_function("merge_and_clear", |b| {
        b.iter(|| black_box(field.merged(&o, black_box(18), 8, PieceKind::O)))
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut field = Field::new();
    for row in 10..20 {
        field.set(row, row % 10, Cell::Filled(PieceKind::S));
    }
    let t = base_shape(PieceKind::T);

    c.bench_function("has_collision", |b| {
        b.iter(|| has_collision(&field, &t, black_box(8), black_box(4)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let i = base_shape(PieceKind::I);

    c.bench_function("rotate", |b| {
        b.iter(|| rotate(black_box(&i), RotateDirection::Clockwise))
    });
}

fn bench_input(c: &mut Criterion) {
    let mut game = Game::new(12345);
    game.start();

    c.bench_function("handle_input", |b| {
        b.iter(|| {
            game.handle_input(PlayerInput::Press(Key::RotateCw));
            game.handle_input(PlayerInput::Press(Key::Right));
            game.handle_input(PlayerInput::Release(Key::Right));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_merge,
    bench_collision,
    bench_rotate,
    bench_input
);
criterion_main!(benches);
