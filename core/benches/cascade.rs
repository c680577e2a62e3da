use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sweeper_core::*;

fn open_board(size: Coord2) -> Board {
    Board::new(MineLayout::from_mine_coords(size, &[]).expect("empty layout fits"))
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    for size in [(16, 30), (100, 100), (400, 400)] {
        group.bench_function(format!("open_{}x{}", size.0, size.1), |b| {
            b.iter_batched(
                || open_board(size),
                |mut board| black_box(board.reveal((size.0 / 2, size.1 / 2))),
                BatchSize::LargeInput,
            )
        });
    }

    group.bench_function("expert_first_click", |b| {
        let mut seed = 0;
        b.iter_batched(
            || {
                seed += 1;
                Board::random_seeded(Difficulty::Expert.config(), seed, StartTile::AlwaysZero)
            },
            |mut board| black_box(board.reveal((8, 15))),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_cascade);
criterion_main!(benches);
