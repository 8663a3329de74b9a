use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trajectoid::{rounded_hull, star_body, ConvexHull, DirectionSet};

const N_POINTS: usize = 10_000;

fn random_cloud(count: usize) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| [i as f64, rng.gen_range(0.0..1.0), rng.gen_range(-3.1..3.1)])
        .collect()
}

fn benchmark_support(c: &mut Criterion) {
    let points = random_cloud(N_POINTS);
    let mut group = c.benchmark_group("support");
    group.sample_size(10);

    for depth in [2, 3, 4] {
        let directions = DirectionSet::icosphere(depth);
        group.bench_with_input(BenchmarkId::new("star_body", depth), &directions, |b, dirs| {
            b.iter(|| star_body(black_box(&points), 0.9, dirs))
        });
        group.bench_with_input(BenchmarkId::new("rounded_hull", depth), &directions, |b, dirs| {
            b.iter(|| rounded_hull(black_box(&points), 0.08, dirs))
        });
    }

    group.bench_function("convex_hull", |b| b.iter(|| ConvexHull::new(black_box(&points))));
    group.finish();
}

fn benchmark_parallelism(c: &mut Criterion) {
    let points = random_cloud(N_POINTS);
    let directions = DirectionSet::icosphere(4);
    let mut group = c.benchmark_group(format!("star_body_parallelism_{}k", N_POINTS / 1000));
    group.sample_size(10);

    let max_cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);
    let mut cores_list = Vec::new();
    let mut cores = 1;
    while cores <= max_cores {
        cores_list.push(cores);
        cores *= 2;
    }
    if cores_list.last().is_some_and(|&last| last < max_cores) {
        cores_list.push(max_cores);
    }

    for &num_threads in &cores_list {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(num_threads), &num_threads, |b, _| {
            b.iter(|| pool.install(|| star_body(black_box(&points), 0.9, &directions)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_support, benchmark_parallelism);
criterion_main!(benches);
