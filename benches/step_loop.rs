use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rust_agentsim::{
    Arena, ConstantAgent, Environment, Grid, HomogeneousPairTask, NavigationArena,
    NavigationConfig, NavigationEnvironment, PaddleBallConfig, PaddleBallEnvironment,
    SingleAgentTask, TaskConfig,
};

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");

    let maze = Arc::new(NavigationArena::preset("maze").expect("preset"));
    group.bench_function("sensor_step_maze", |b| {
        b.iter_batched(
            || NavigationEnvironment::new(Arc::clone(&maze), NavigationConfig::default(), 7),
            |mut env| {
                for k in 0..100 {
                    black_box(env.step(k as f64 * 0.1, &vec![0.3, -1.0]).expect("step"));
                }
            },
            BatchSize::SmallInput,
        )
    });

    let grid = Arc::new(
        NavigationArena::from_text_grid(
            "wwwwwwwwww|w........w|w.wwww.w.w|w.w..t.w.w|w.w.ww.w.w|w......w.w|w.wwwwww.w|w...s....w|wwwwwwwwww",
            0.1,
            false,
        )
        .expect("grid"),
    );
    group.bench_function("episode_grid_1000_steps", |b| {
        let arena = Arc::clone(&grid);
        let task = SingleAgentTask::new(
            move || NavigationEnvironment::new(Arc::clone(&arena), NavigationConfig::default(), 3),
            TaskConfig::new(0.0, 99.9, 0.1).expect("config"),
        );
        b.iter(|| {
            let mut agent = ConstantAgent::new(vec![0.5, -0.5]);
            black_box(task.run(&mut agent).expect("run"))
        })
    });

    group.finish();
}

fn bench_paddle_ball(c: &mut Criterion) {
    let mut group = c.benchmark_group("paddle_ball");

    group.bench_function("episode_1000_steps", |b| {
        let task = HomogeneousPairTask::new(
            || PaddleBallEnvironment::new(PaddleBallConfig::default(), 11),
            TaskConfig::new(0.0, 99.9, 0.1).expect("config"),
        );
        b.iter(|| {
            let mut left = ConstantAgent::new(vec![0.2]);
            let mut right = ConstantAgent::new(vec![-0.2]);
            black_box(task.run(&mut left, &mut right).expect("run"))
        })
    });

    group.finish();
}

fn bench_arena_build(c: &mut Criterion) {
    let mut grid = Grid::filled(40, 40, false);
    for i in 0..40 {
        grid.set(i, 0, true);
        grid.set(i, 39, true);
        grid.set(0, i, true);
        grid.set(39, i, true);
        grid.set(i, i, true);
    }

    c.bench_function("arena_from_grid_40x40_diagonal", |b| {
        b.iter(|| black_box(Arena::from_obstacle_grid(&grid, 0.025, true).expect("arena")))
    });
}

criterion_group!(benches, bench_navigation, bench_paddle_ball, bench_arena_build);
criterion_main!(benches);
