use criterion::{criterion_group, criterion_main, Criterion};
use mazecarver::{
    generators,
    grid::Grid,
    maze,
    units::{ColumnsCount, RowsCount},
};

// Regeneration is wholesale, so every iteration pays for a fresh grid too.
fn bench_hunt_and_kill_maze_32(c: &mut Criterion) {
    c.bench_function("hunt_and_kill_maze_32", |b| {
        let mut rng = rand::weak_rng();
        b.iter(|| {
            let mut g = Grid::new(RowsCount(32), ColumnsCount(32));
            generators::hunt_and_kill(&mut g, &mut rng);
            g
        })
    });
}

fn bench_generate_maze_with_walls_export_32(c: &mut Criterion) {
    c.bench_function("generate_maze_with_walls_export_32", |b| {
        let mut rng = rand::weak_rng();
        b.iter(|| maze::generate_with_rng(32, 32, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_hunt_and_kill_maze_32,
    bench_generate_maze_with_walls_export_32
);
criterion_main!(benches);
